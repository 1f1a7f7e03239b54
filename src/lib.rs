//! Fetch a character from the D&D Beyond character service and flatten its
//! nested record into a computed-stat summary: ability scores, saves,
//! skills, attacks, spells, inventory and features.
//!
//! One fetch, one derivation, no shared state. Transport failures come back
//! as an error payload rather than an error type, and the derivation engine
//! never fails on partial data.

pub mod engine;
pub mod model;
pub mod text;

pub use engine::derive::derive_sheet;
pub use engine::fetch::Fetcher;
pub use model::payload::{ErrorPayload, RawCharacter, SheetOutput};
