pub mod fmt;
pub mod grid;
