//! Entity models and DTOs, one module per table.

pub mod movie;
pub mod rating;
pub mod user;
