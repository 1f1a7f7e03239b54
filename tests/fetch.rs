use std::time::Duration;

use beyond_sheet::{derive_sheet, Fetcher, RawCharacter};

/// Port 9 (discard) is closed on any sane machine, so every attempt fails
/// fast with connection refused and the retry loop runs to exhaustion.
#[test]
fn exhausted_retries_yield_an_error_payload() {
    let fetcher =
        Fetcher::with_base_url("http://127.0.0.1:9").timeout(Duration::from_millis(250));

    let raw = fetcher.fetch("1234567");
    let RawCharacter::Error(payload) = &raw else {
        panic!("expected an error payload, got a record");
    };
    assert!(payload.error.contains("Failed to fetch character data"));
    assert_eq!(payload.character_id, "1234567");
    assert!(payload.details.is_some());

    // The engine passes the payload through without deriving anything.
    let output = derive_sheet(&raw);
    let serialized = serde_json::to_value(&output).unwrap();
    assert_eq!(serialized["character_id"], "1234567");
    assert!(serialized.get("error").is_some());
    assert!(serialized.get("stats").is_none());
}
