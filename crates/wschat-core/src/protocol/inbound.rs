//! Server → client envelopes.
//!
//! Decoding happens in two steps: the `event_type` header is checked against
//! the closed [`EventType`] set first, then the body is parsed into the typed
//! variant. Unknown fields are ignored so the server can add payload fields
//! without breaking older clients.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChatError, Result};
use crate::protocol::event::EventType;
use crate::protocol::presence::STATUS_ONLINE;

/// A chat line, either live or replayed from history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Human-readable server answer (acks and rejects).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OnlineUser {
    pub username: String,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsersOnline {
    #[serde(default)]
    pub users: Vec<OnlineUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserPresence {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypingStatus {
    pub username: String,
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemNotice {
    pub message: String,
    /// Raw wire value; mapped by the dispatcher.
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomInfo {
    pub room_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllRooms {
    #[serde(default)]
    pub rooms: Vec<RoomInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomCreated {
    pub room: RoomInfo,
    /// Creator, when the server reports one.
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomRef {
    pub room_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomChatClear {
    pub room_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Every envelope the server may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum InboundEvent {
    Message(ChatMessage),
    MessageHistory(MessageHistory),
    ConnectionResponse(ServerResponse),
    ConnectionReject(ServerResponse),
    UsersOnline(UsersOnline),
    UserJoin(UserPresence),
    UserLeave(UserPresence),
    Typing(TypingStatus),
    System(SystemNotice),
    AllRooms(AllRooms),
    RoomCreate(RoomCreated),
    RoomCreateReject(ServerResponse),
    RoomSwitchResponse(RoomRef),
    RoomSwitchReject(ServerResponse),
    RoomChatClear(RoomChatClear),
}

impl InboundEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            InboundEvent::Message(_) => EventType::Message,
            InboundEvent::MessageHistory(_) => EventType::MessageHistory,
            InboundEvent::ConnectionResponse(_) => EventType::ConnectionResponse,
            InboundEvent::ConnectionReject(_) => EventType::ConnectionReject,
            InboundEvent::UsersOnline(_) => EventType::UsersOnline,
            InboundEvent::UserJoin(_) => EventType::UserJoin,
            InboundEvent::UserLeave(_) => EventType::UserLeave,
            InboundEvent::Typing(_) => EventType::Typing,
            InboundEvent::System(_) => EventType::System,
            InboundEvent::AllRooms(_) => EventType::AllRooms,
            InboundEvent::RoomCreate(_) => EventType::RoomCreate,
            InboundEvent::RoomCreateReject(_) => EventType::RoomCreateReject,
            InboundEvent::RoomSwitchResponse(_) => EventType::RoomSwitchResponse,
            InboundEvent::RoomSwitchReject(_) => EventType::RoomSwitchReject,
            InboundEvent::RoomChatClear(_) => EventType::RoomChatClear,
        }
    }
}

/// Decode one text frame.
///
/// Errors:
/// - `MalformedFrame`: not JSON, not an object, no string `event_type`, or a
///   known discriminator whose body does not match its schema.
/// - `UnknownEventType`: a well-formed envelope whose discriminator this
///   client does not handle.
pub fn decode(text: &str) -> Result<InboundEvent> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ChatError::MalformedFrame(format!("invalid envelope json: {e}")))?;

    let tag = value
        .as_object()
        .ok_or_else(|| ChatError::MalformedFrame("envelope must be a json object".into()))?
        .get("event_type")
        .and_then(Value::as_str)
        .ok_or_else(|| ChatError::MalformedFrame("missing event_type".into()))?
        .to_owned();

    match EventType::from_wire(&tag) {
        Some(kind) if kind.is_inbound() => {}
        _ => return Err(ChatError::UnknownEventType(tag)),
    }

    serde_json::from_value(value)
        .map_err(|e| ChatError::MalformedFrame(format!("invalid {tag} body: {e}")))
}

fn default_status() -> String {
    STATUS_ONLINE.into()
}
