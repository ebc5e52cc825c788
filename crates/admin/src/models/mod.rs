//! Session models for the admin panel.

pub mod session;

pub use session::session_keys;
