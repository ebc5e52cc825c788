//! CLI command implementations.

pub mod admin;
pub mod check;
pub mod seed;
