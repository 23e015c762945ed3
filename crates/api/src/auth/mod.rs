//! Credential verification and token issuance.

pub mod jwt;
pub mod password;
