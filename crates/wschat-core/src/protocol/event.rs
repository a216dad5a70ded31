//! `event_type` discriminators.
//!
//! The set is closed and versioned together with the server. Anything outside
//! it is reported as `UnknownEventType` by the decoder and ignored upstream.

/// Every discriminator the protocol defines, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    ConnectionRequest,
    ConnectionResponse,
    ConnectionReject,
    Message,
    MessageHistory,
    Typing,
    System,
    UsersOnline,
    UserJoin,
    UserLeave,
    AllRooms,
    RoomCreate,
    RoomCreateReject,
    RoomChatClear,
    RoomSwitchRequest,
    RoomSwitchResponse,
    RoomSwitchReject,
}

impl EventType {
    pub const ALL: [EventType; 17] = [
        EventType::ConnectionRequest,
        EventType::ConnectionResponse,
        EventType::ConnectionReject,
        EventType::Message,
        EventType::MessageHistory,
        EventType::Typing,
        EventType::System,
        EventType::UsersOnline,
        EventType::UserJoin,
        EventType::UserLeave,
        EventType::AllRooms,
        EventType::RoomCreate,
        EventType::RoomCreateReject,
        EventType::RoomChatClear,
        EventType::RoomSwitchRequest,
        EventType::RoomSwitchResponse,
        EventType::RoomSwitchReject,
    ];

    /// Wire name (value of the `event_type` field).
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::ConnectionRequest => "connection_request",
            EventType::ConnectionResponse => "connection_response",
            EventType::ConnectionReject => "connection_reject",
            EventType::Message => "message",
            EventType::MessageHistory => "message_history",
            EventType::Typing => "typing",
            EventType::System => "system",
            EventType::UsersOnline => "users_online",
            EventType::UserJoin => "user_join",
            EventType::UserLeave => "user_leave",
            EventType::AllRooms => "all_rooms",
            EventType::RoomCreate => "room_create",
            EventType::RoomCreateReject => "room_create_reject",
            EventType::RoomChatClear => "room_chat_clear",
            EventType::RoomSwitchRequest => "room_switch_request",
            EventType::RoomSwitchResponse => "room_switch_response",
            EventType::RoomSwitchReject => "room_switch_reject",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Whether the server may send this discriminator to a client.
    pub fn is_inbound(self) -> bool {
        !matches!(
            self,
            EventType::ConnectionRequest | EventType::RoomSwitchRequest
        )
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
