//! Routes decoded envelopes to UI reactions.
//!
//! Each envelope produces exactly one category of reaction. The match over
//! [`InboundEvent`] is exhaustive; discriminators outside the known set never
//! reach it and are dropped in [`dispatch_text`].
//!
//! Own messages (live and replayed) are displayed with `is_own = true`: the
//! client never echoes locally, so the server copy is the only rendering.

use tracing::{debug, info};

use wschat_core::error::{ChatError, Result};
use wschat_core::protocol::inbound::{decode, InboundEvent};
use wschat_core::protocol::presence::{typing_status, STATUS_ONLINE};
use wschat_core::protocol::room::{canonical_room_name, is_default_room};
use wschat_core::protocol::Severity;

use crate::session::Session;
use crate::ui::ChatUi;

/// Decode one text frame and dispatch it.
///
/// Unknown discriminators are logged and ignored. A `MalformedFrame` error is
/// returned for the caller to log; it concerns this frame only.
pub fn dispatch_text(session: &mut Session, text: &str, ui: &mut dyn ChatUi) -> Result<()> {
    match decode(text) {
        Ok(event) => {
            dispatch(session, event, ui);
            Ok(())
        }
        Err(ChatError::UnknownEventType(tag)) => {
            debug!(event_type = %tag, "ignoring unknown event");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn dispatch(session: &mut Session, event: InboundEvent, ui: &mut dyn ChatUi) {
    debug!(event_type = %event.event_type(), "dispatch");

    match event {
        InboundEvent::Message(m) => {
            let own = session.is_self(&m.username);
            ui.display_message(&m.message, own, &m.username);
        }
        InboundEvent::MessageHistory(history) => {
            for m in history.messages {
                let own = session.is_self(&m.username);
                ui.display_message(&m.message, own, &m.username);
            }
        }
        InboundEvent::ConnectionResponse(ack) => {
            info!(response = %ack.response, "connection accepted");
        }
        InboundEvent::ConnectionReject(r)
        | InboundEvent::RoomCreateReject(r)
        | InboundEvent::RoomSwitchReject(r) => {
            ui.raise_notice(&r.response, Severity::Error);
        }
        InboundEvent::UsersOnline(online) => {
            ui.mark_self_online();
            for user in online.users.iter().filter(|u| !session.is_self(&u.username)) {
                ui.add_roster_member(&user.username, &user.status);
            }
            ui.refresh_roster_count();
        }
        InboundEvent::UserJoin(p) => {
            if session.is_self(&p.username) {
                return;
            }
            ui.raise_notice(&format!("User {} joined the chat", p.username), Severity::Info);
            ui.add_roster_member(&p.username, STATUS_ONLINE);
            ui.refresh_roster_count();
        }
        InboundEvent::UserLeave(p) => {
            if session.is_self(&p.username) {
                return;
            }
            ui.raise_notice(&format!("User {} left the chat", p.username), Severity::Info);
            ui.remove_roster_member(&p.username);
            ui.refresh_roster_count();
        }
        InboundEvent::Typing(t) => {
            ui.set_member_status(&t.username, typing_status(t.is_typing));
        }
        InboundEvent::System(notice) => {
            match notice.severity.as_deref().and_then(Severity::from_wire) {
                Some(severity) => ui.raise_notice(&notice.message, severity),
                None => debug!(severity = ?notice.severity, "system notice without known severity dropped"),
            }
        }
        InboundEvent::AllRooms(all) => {
            for room in all.rooms.iter().filter(|r| !is_default_room(&r.room_name)) {
                ui.add_room_to_list(&room.room_name, false);
            }
        }
        InboundEvent::RoomCreate(created) => {
            let name = created.room.room_name;
            if is_default_room(&name) {
                return;
            }
            ui.add_room_to_list(&name, false);
            let text = match created.username {
                Some(by) => format!("Room {name} created by {by}"),
                None => format!("Room {name} created"),
            };
            ui.raise_notice(&text, Severity::Success);
        }
        InboundEvent::RoomSwitchResponse(target) => {
            let room = canonical_room_name(&target.room_name);
            if room == session.room_name() {
                return;
            }
            ui.switch_to_room_view(room);
            session.set_room_name(room);
        }
        InboundEvent::RoomChatClear(clear) => {
            ui.clear_room_transcript(&clear.room_name);
        }
    }
}
