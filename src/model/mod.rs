pub mod abilities;
pub mod character;
pub mod modifier;
pub mod payload;
