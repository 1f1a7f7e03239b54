use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::character::CharacterSheet;

/// Structured failure returned instead of a record when the fetch gives up.
/// Callers detect failure purely by the presence of the `error` key in the
/// serialized output; no error type crosses the public boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub character_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// What the fetcher hands to the derivation engine: either the semi-typed
/// record from the service or the error payload built after retries ran out.
#[derive(Debug, Clone)]
pub enum RawCharacter {
    Record(Value),
    Error(ErrorPayload),
}

impl RawCharacter {
    pub fn is_error(&self) -> bool {
        matches!(self, RawCharacter::Error(_))
    }
}

/// Final output of fetch + derive. Serializes either to the flat sheet shape
/// or to the untouched error payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SheetOutput {
    Sheet(CharacterSheet),
    Error(ErrorPayload),
}

impl SheetOutput {
    pub fn as_sheet(&self) -> Option<&CharacterSheet> {
        match self {
            SheetOutput::Sheet(sheet) => Some(sheet),
            SheetOutput::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorPayload> {
        match self {
            SheetOutput::Sheet(_) => None,
            SheetOutput::Error(payload) => Some(payload),
        }
    }
}
