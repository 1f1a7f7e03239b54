pub mod derive;
pub mod equipment;
pub mod fetch;
pub mod raw;
pub mod spells;
