//! Roster status values and username rules.

use crate::error::{ChatError, Result};

pub const STATUS_ONLINE: &str = "online";
pub const STATUS_TYPING: &str = "typing";

/// Server-side limit; longer usernames are rejected at handshake.
pub const MAX_USERNAME_LENGTH: usize = 20;

const EXTRA_USERNAME_CHARS: &str = "åäöÅÄÖ_ -";

/// Roster status for a `typing` event.
pub fn typing_status(is_typing: bool) -> &'static str {
    if is_typing {
        STATUS_TYPING
    } else {
        STATUS_ONLINE
    }
}

/// Applies the server's username rule locally so a bad name fails at
/// startup instead of as a `connection_reject`.
pub fn validate_username(username: &str) -> Result<()> {
    let name = username.trim();
    if name.is_empty() {
        return Err(ChatError::Config("username must not be empty".into()));
    }
    if name.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ChatError::Config(format!(
            "username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !EXTRA_USERNAME_CHARS.contains(*c))
    {
        return Err(ChatError::Config(format!(
            "username contains invalid character {c:?}"
        )));
    }
    Ok(())
}
