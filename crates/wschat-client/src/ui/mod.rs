//! UI collaborator surface.
//!
//! The protocol core never stores roster or room entries itself; it forwards
//! identifiers and statuses to an implementation of [`ChatUi`].

mod terminal;

pub use terminal::TerminalUi;
pub use wschat_core::protocol::Severity;

/// Presentation callbacks driven by the dispatcher and the client loop.
pub trait ChatUi {
    fn display_message(&mut self, text: &str, is_own: bool, sender: &str);
    fn mark_self_online(&mut self);
    fn add_roster_member(&mut self, username: &str, status: &str);
    fn remove_roster_member(&mut self, username: &str);
    fn refresh_roster_count(&mut self);
    fn set_member_status(&mut self, username: &str, status: &str);
    fn add_room_to_list(&mut self, room_name: &str, is_active: bool);
    fn switch_to_room_view(&mut self, room_name: &str);
    fn clear_room_transcript(&mut self, room_name: &str);
    fn raise_notice(&mut self, text: &str, severity: Severity);
}
