//! Database entities.

pub mod admin;
pub mod push_subscription;
pub mod suggestion;
