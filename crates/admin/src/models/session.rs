//! Admin session keys and helpers.

use tower_sessions::Session;

/// Session storage keys.
pub mod session_keys {
    /// Boolean flag set after a successful login.
    pub const ADMIN_AUTHENTICATED: &str = "admin_authenticated";
}

/// Mark the session as authenticated after a successful login.
///
/// # Errors
///
/// Returns an error when the session store rejects the write.
pub async fn set_authenticated(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::ADMIN_AUTHENTICATED, true)
        .await
}

/// Log out: drop the whole session, not just the flag.
///
/// # Errors
///
/// Returns an error when the session store rejects the delete.
pub async fn clear_authenticated(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
