//! Client → server envelopes.
//!
//! Constructed fresh for every send; `encode` yields the text frame.

use serde::Serialize;

use crate::error::{ChatError, Result};
use crate::protocol::event::EventType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum Outbound {
    /// Handshake, sent once right after the channel opens.
    ConnectionRequest {
        username: String,
        /// Opt-in server pushes such as `past_chats`.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        subscribe_for_events: Vec<String>,
    },
    Message {
        username: String,
        message: String,
    },
    Typing {
        username: String,
        is_typing: bool,
    },
    RoomSwitchRequest {
        room_name: String,
    },
    RoomCreate {
        room_name: String,
    },
    RoomChatClear {
        room_name: String,
        username: String,
    },
}

impl Outbound {
    pub fn connection_request(username: &str, subscribe_for_events: &[String]) -> Self {
        Outbound::ConnectionRequest {
            username: username.to_owned(),
            subscribe_for_events: subscribe_for_events.to_vec(),
        }
    }

    pub fn message(username: &str, message: &str) -> Self {
        Outbound::Message {
            username: username.to_owned(),
            message: message.to_owned(),
        }
    }

    pub fn typing(username: &str, is_typing: bool) -> Self {
        Outbound::Typing {
            username: username.to_owned(),
            is_typing,
        }
    }

    pub fn room_switch_request(room_name: &str) -> Self {
        Outbound::RoomSwitchRequest {
            room_name: room_name.to_owned(),
        }
    }

    pub fn room_create(room_name: &str) -> Self {
        Outbound::RoomCreate {
            room_name: room_name.to_owned(),
        }
    }

    pub fn room_chat_clear(room_name: &str, username: &str) -> Self {
        Outbound::RoomChatClear {
            room_name: room_name.to_owned(),
            username: username.to_owned(),
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Outbound::ConnectionRequest { .. } => EventType::ConnectionRequest,
            Outbound::Message { .. } => EventType::Message,
            Outbound::Typing { .. } => EventType::Typing,
            Outbound::RoomSwitchRequest { .. } => EventType::RoomSwitchRequest,
            Outbound::RoomCreate { .. } => EventType::RoomCreate,
            Outbound::RoomChatClear { .. } => EventType::RoomChatClear,
        }
    }

    /// Serialize to JSON text for sending over WebSocket.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ChatError::Internal(format!("json encode failed: {e}")))
    }
}
