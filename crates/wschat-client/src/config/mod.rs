//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use wschat_core::error::{ChatError, Result};

pub use schema::{ClientConfig, ServerSection, SessionSection, TypingSection, UserSection};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ChatError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let mut cfg: ClientConfig =
        serde_yaml::from_str(s).map_err(|e| ChatError::Config(format!("invalid yaml: {e}")))?;
    // the server strips usernames before comparing them
    cfg.user.username = cfg.user.username.trim().to_owned();
    cfg.validate()?;
    Ok(cfg)
}
