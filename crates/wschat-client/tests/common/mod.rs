#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use wschat_client::config::{self, ClientConfig};
use wschat_client::transport::Transport;
use wschat_client::ui::{ChatUi, Severity};
use wschat_core::error::{ChatError, Result};

/// One recorded UI callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Message {
        text: String,
        is_own: bool,
        sender: String,
    },
    SelfOnline,
    AddMember(String, String),
    RemoveMember(String),
    RefreshCount,
    SetStatus(String, String),
    AddRoom(String, bool),
    SwitchRoom(String),
    ClearRoom(String),
    Notice(String, Severity),
}

/// UI that records every call. Clones share the same log, so a test can keep
/// a handle while the client owns the UI.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    calls: Arc<Mutex<Vec<UiCall>>>,
}

impl RecordingUi {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(String, Severity)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                UiCall::Notice(text, sev) => Some((text, sev)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: UiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ChatUi for RecordingUi {
    fn display_message(&mut self, text: &str, is_own: bool, sender: &str) {
        self.push(UiCall::Message {
            text: text.into(),
            is_own,
            sender: sender.into(),
        });
    }

    fn mark_self_online(&mut self) {
        self.push(UiCall::SelfOnline);
    }

    fn add_roster_member(&mut self, username: &str, status: &str) {
        self.push(UiCall::AddMember(username.into(), status.into()));
    }

    fn remove_roster_member(&mut self, username: &str) {
        self.push(UiCall::RemoveMember(username.into()));
    }

    fn refresh_roster_count(&mut self) {
        self.push(UiCall::RefreshCount);
    }

    fn set_member_status(&mut self, username: &str, status: &str) {
        self.push(UiCall::SetStatus(username.into(), status.into()));
    }

    fn add_room_to_list(&mut self, room_name: &str, is_active: bool) {
        self.push(UiCall::AddRoom(room_name.into(), is_active));
    }

    fn switch_to_room_view(&mut self, room_name: &str) {
        self.push(UiCall::SwitchRoom(room_name.into()));
    }

    fn clear_room_transcript(&mut self, room_name: &str) {
        self.push(UiCall::ClearRoom(room_name.into()));
    }

    fn raise_notice(&mut self, text: &str, severity: Severity) {
        self.push(UiCall::Notice(text.into(), severity));
    }
}

/// Channel-backed transport; the test drives the other end via [`MockPeer`].
pub struct MockTransport {
    sent: mpsc::UnboundedSender<String>,
    inbound: mpsc::UnboundedReceiver<Result<String>>,
}

pub struct MockPeer {
    sent: mpsc::UnboundedReceiver<String>,
    inbound: Option<mpsc::UnboundedSender<Result<String>>>,
}

pub fn mock_pair() -> (MockTransport, MockPeer) {
    let (sent_tx, sent_rx) = mpsc::unbounded_channel();
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    (
        MockTransport {
            sent: sent_tx,
            inbound: in_rx,
        },
        MockPeer {
            sent: sent_rx,
            inbound: Some(in_tx),
        },
    )
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, frame: String) -> Result<()> {
        self.sent
            .send(frame)
            .map_err(|_| ChatError::Transport("peer gone".into()))
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        self.inbound.recv().await
    }

    async fn close(&mut self) -> Result<()> {
        self.inbound.close();
        Ok(())
    }
}

impl MockPeer {
    /// Next frame written by the client, parsed as JSON.
    pub async fn next_frame(&mut self) -> Value {
        let text = self.sent.recv().await.expect("client transport dropped");
        serde_json::from_str(&text).expect("client wrote invalid json")
    }

    /// Frame already written, without waiting.
    pub fn try_frame(&mut self) -> Option<Value> {
        self.sent
            .try_recv()
            .ok()
            .map(|t| serde_json::from_str(&t).expect("client wrote invalid json"))
    }

    pub fn push(&self, frame: &str) {
        self.inbound().send(Ok(frame.to_owned())).unwrap();
    }

    pub fn push_err(&self, err: ChatError) {
        self.inbound().send(Err(err)).unwrap();
    }

    /// End the client's inbound stream once buffered frames are read.
    pub fn close_inbound(&mut self) {
        self.inbound = None;
    }

    fn inbound(&self) -> &mpsc::UnboundedSender<Result<String>> {
        self.inbound.as_ref().expect("inbound already closed")
    }
}

pub fn config_for(username: &str) -> ClientConfig {
    config::load_from_str(&format!(
        r#"
version: 1
server:
  address: "127.0.0.1:5000"
user:
  username: "{username}"
"#
    ))
    .expect("test config must load")
}
