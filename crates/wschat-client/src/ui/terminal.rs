use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use wschat_core::protocol::presence::{STATUS_ONLINE, STATUS_TYPING};

use super::{ChatUi, Severity};

/// Line-oriented renderer for the `wschat` binary.
#[derive(Debug)]
pub struct TerminalUi<W: Write = io::Stdout> {
    out: W,
    username: String,
    roster: BTreeMap<String, String>,
    rooms: BTreeSet<String>,
}

impl TerminalUi {
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_writer(username, io::stdout())
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn with_writer(username: impl Into<String>, out: W) -> Self {
        Self {
            out,
            username: username.into(),
            roster: BTreeMap::new(),
            rooms: BTreeSet::new(),
        }
    }

    pub fn online_count(&self) -> usize {
        self.roster.len()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // a broken stdout is not worth tearing the session down for
    fn line(&mut self, s: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{s}");
    }
}

impl<W: Write> ChatUi for TerminalUi<W> {
    fn display_message(&mut self, text: &str, is_own: bool, sender: &str) {
        if is_own {
            self.line(format_args!("  me> {text}"));
        } else {
            self.line(format_args!("{sender}> {text}"));
        }
    }

    fn mark_self_online(&mut self) {
        let me = self.username.clone();
        self.roster.insert(me, STATUS_ONLINE.into());
    }

    fn add_roster_member(&mut self, username: &str, status: &str) {
        self.roster.insert(username.to_owned(), status.to_owned());
    }

    fn remove_roster_member(&mut self, username: &str) {
        self.roster.remove(username);
    }

    fn refresh_roster_count(&mut self) {
        let n = self.online_count();
        self.line(format_args!("-- {n} online"));
    }

    fn set_member_status(&mut self, username: &str, status: &str) {
        let changed = match self.roster.get_mut(username) {
            Some(current) if current.as_str() != status => {
                *current = status.to_owned();
                true
            }
            _ => false,
        };
        if changed && status == STATUS_TYPING && username != self.username {
            self.line(format_args!("-- {username} is typing..."));
        }
    }

    fn add_room_to_list(&mut self, room_name: &str, is_active: bool) {
        if self.rooms.insert(room_name.to_owned()) {
            let marker = if is_active { " (active)" } else { "" };
            self.line(format_args!("-- room available: {room_name}{marker}"));
        }
    }

    fn switch_to_room_view(&mut self, room_name: &str) {
        self.roster.clear();
        self.line(format_args!("== now in room {room_name}"));
    }

    fn clear_room_transcript(&mut self, room_name: &str) {
        self.line(format_args!("== transcript of {room_name} cleared"));
    }

    fn raise_notice(&mut self, text: &str, severity: Severity) {
        let tag = severity.as_str().to_uppercase();
        self.line(format_args!("[{tag}] {text}"));
    }
}
