use anyhow::{bail, Result};

use beyond_sheet::{derive_sheet, Fetcher, SheetOutput};

fn main() -> Result<()> {
    env_logger::init();

    let Some(character_id) = std::env::args().nth(1) else {
        bail!("usage: beyond_sheet <character-id>");
    };

    let raw = Fetcher::new().fetch(&character_id);
    let output = derive_sheet(&raw);
    println!("{}", serde_json::to_string_pretty(&output)?);

    if matches!(output, SheetOutput::Error(_)) {
        std::process::exit(1);
    }
    Ok(())
}
