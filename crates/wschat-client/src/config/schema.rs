use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use tokio::time::Duration;

use wschat_core::error::{ChatError, Result};
use wschat_core::protocol::presence::validate_username;
use wschat_core::protocol::room::is_default_room;

/// Characters escaped in the room segment of the endpoint path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub user: UserSection,

    #[serde(default)]
    pub typing: TypingSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ChatError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        validate_username(&self.user.username)?;
        self.typing.validate()?;
        self.session.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// `host:port`, without scheme.
    #[serde(default = "default_address")]
    pub address: String,

    /// Selects `wss` instead of `ws`.
    #[serde(default)]
    pub use_tls: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            address: default_address(),
            use_tls: false,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(ChatError::Config("server.address must not be empty".into()));
        }
        if address.contains("://") {
            return Err(ChatError::Config(
                "server.address must be host:port without a scheme".into(),
            ));
        }
        Ok(())
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls {
            "wss"
        } else {
            "ws"
        }
    }

    /// `<scheme>://<address>/ws[/<room>]`; the default room has no suffix.
    /// The room segment is percent-encoded.
    pub fn ws_url(&self, room_name: &str) -> String {
        let base = format!("{}://{}/ws", self.scheme(), self.address.trim());
        if is_default_room(room_name) {
            return base;
        }
        format!("{base}/{}", utf8_percent_encode(room_name, PATH_SEGMENT))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSection {
    pub username: String,

    /// Empty joins the default room.
    #[serde(default)]
    pub room_name: String,

    #[serde(default)]
    pub subscribe_for_events: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypingSection {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for TypingSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl TypingSection {
    pub fn validate(&self) -> Result<()> {
        if !(50..=5000).contains(&self.poll_interval_ms) {
            return Err(ChatError::Config(
                "typing.poll_interval_ms must be between 50 and 5000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.poll_interval_ms || self.idle_timeout_ms > 60000 {
            return Err(ChatError::Config(
                "typing.idle_timeout_ms must be greater than poll_interval_ms and at most 60000"
                    .into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    /// Capacity of the queue between the session and the socket writer.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=4096).contains(&self.outbound_queue) {
            return Err(ChatError::Config(
                "session.outbound_queue must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_address() -> String {
    "localhost:5000".into()
}
fn default_poll_interval_ms() -> u64 {
    500
}
fn default_idle_timeout_ms() -> u64 {
    2500
}
fn default_outbound_queue() -> usize {
    64
}
