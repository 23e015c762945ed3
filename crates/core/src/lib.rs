//! Domain layer for the reelrate service.
//!
//! Pure types and validation shared by the database and API crates.
//! No I/O happens here.

pub mod error;
pub mod rating;
pub mod types;
