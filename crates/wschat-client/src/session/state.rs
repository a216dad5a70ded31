use tracing::{debug, info};

use wschat_core::error::{ChatError, Result};
use wschat_core::protocol::room::canonical_room_name;
use wschat_core::protocol::Outbound;

use super::Channel;

/// Lifecycle of one channel instance.
///
/// `Idle -> Connecting -> Open -> Closed`; any state may move to `Closed`.
/// A new connect attempt from `Closed` starts a fresh instance at `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Idle,
    Connecting,
    Open,
    Closed,
}

impl ConnState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnState::Idle => "idle",
            ConnState::Connecting => "connecting",
            ConnState::Open => "open",
            ConnState::Closed => "closed",
        }
    }
}

/// Client-side session state.
#[derive(Debug)]
pub struct Session {
    username: String,
    room_name: String,
    subscribe_for_events: Vec<String>,
    state: ConnState,
    channel: Option<Channel>,
    /// Last typing state put on the wire; repeated `true` sends are dropped.
    typing_announced: bool,
}

impl Session {
    /// `username` is stored trimmed, the form the server compares against.
    pub fn new(username: impl Into<String>, room_name: &str) -> Self {
        let username: String = username.into();
        Self {
            username: username.trim().to_owned(),
            room_name: canonical_room_name(room_name).to_owned(),
            subscribe_for_events: Vec::new(),
            state: ConnState::Idle,
            channel: None,
            typing_announced: false,
        }
    }

    /// Server pushes requested in the handshake (e.g. `past_chats`).
    pub fn with_subscriptions(mut self, events: Vec<String>) -> Self {
        self.subscribe_for_events = events;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    pub fn set_room_name(&mut self, room_name: &str) {
        self.room_name = canonical_room_name(room_name).to_owned();
    }

    pub fn is_self(&self, username: &str) -> bool {
        username == self.username
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnState::Open && self.channel.as_ref().is_some_and(Channel::is_open)
    }

    /// Start a new connection attempt. Any previous channel is released.
    pub fn begin_connect(&mut self) {
        self.channel = None;
        self.typing_announced = false;
        self.transition(ConnState::Connecting);
    }

    /// Transport open event: adopt the channel and send the handshake.
    pub fn on_open(&mut self, channel: Channel) -> Result<()> {
        if self.state != ConnState::Connecting {
            return Err(ChatError::Internal(format!(
                "open event in state {}",
                self.state.as_str()
            )));
        }
        self.channel = Some(channel);
        self.transition(ConnState::Open);
        self.write(&Outbound::connection_request(
            &self.username,
            &self.subscribe_for_events,
        ))
    }

    /// Transport close event (local or remote). Later sends fail fast.
    pub fn on_close(&mut self) {
        self.channel = None;
        self.typing_announced = false;
        self.transition(ConnState::Closed);
    }

    /// Send a chat line. The server echoes it back; nothing is shown locally.
    pub fn send(&self, message: &str) -> Result<()> {
        self.write(&Outbound::message(&self.username, message))
    }

    /// Announce a typing transition. A `true` while `true` is already
    /// announced is dropped without touching the wire.
    pub fn send_typing(&mut self, is_typing: bool) -> Result<()> {
        if is_typing && self.typing_announced && self.is_connected() {
            debug!("typing already announced");
            return Ok(());
        }
        self.write(&Outbound::typing(&self.username, is_typing))?;
        self.typing_announced = is_typing;
        Ok(())
    }

    pub fn send_room_switch(&self, room_name: &str) -> Result<()> {
        self.write(&Outbound::room_switch_request(room_name))
    }

    pub fn send_room_create(&self, room_name: &str) -> Result<()> {
        self.write(&Outbound::room_create(room_name))
    }

    pub fn send_room_chat_clear(&self, room_name: &str) -> Result<()> {
        self.write(&Outbound::room_chat_clear(room_name, &self.username))
    }

    fn write(&self, out: &Outbound) -> Result<()> {
        let channel = match &self.channel {
            Some(c) if self.state == ConnState::Open && c.is_open() => c,
            _ => return Err(ChatError::NotConnected),
        };
        let frame = out.encode()?;
        debug!(event_type = %out.event_type(), "frame queued");
        channel.write(frame)
    }

    fn transition(&mut self, next: ConnState) {
        if self.state != next {
            info!(
                user = %self.username,
                from = self.state.as_str(),
                to = next.as_str(),
                "session state"
            );
            self.state = next;
        }
    }
}
