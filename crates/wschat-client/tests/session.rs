#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};
use tokio::sync::mpsc;

use wschat_client::session::{Channel, ConnState, Session};

fn open(session: &mut Session) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    session.begin_connect();
    session.on_open(Channel::new(tx)).expect("handshake");
    rx
}

fn frames(rx: &mut mpsc::Receiver<String>) -> Vec<Value> {
    let mut out = Vec::new();
    while let Ok(text) = rx.try_recv() {
        out.push(serde_json::from_str(&text).unwrap());
    }
    out
}

#[test]
fn send_without_channel_is_not_connected() {
    let s = Session::new("alice", "");
    let err = s.send("hello").unwrap_err();
    assert_eq!(err.code().as_str(), "NOT_CONNECTED");
    assert_eq!(s.state(), ConnState::Idle);
}

#[test]
fn room_sends_without_channel_are_not_connected() {
    let s = Session::new("alice", "");
    for res in [
        s.send_room_switch("Lobby"),
        s.send_room_create("dev"),
        s.send_room_chat_clear("dev"),
    ] {
        assert_eq!(res.unwrap_err().code().as_str(), "NOT_CONNECTED");
    }
}

#[test]
fn handshake_is_first_frame() {
    let mut s = Session::new("alice", "").with_subscriptions(vec!["past_chats".into()]);
    let mut rx = open(&mut s);
    assert_eq!(s.state(), ConnState::Open);
    assert!(s.is_connected());

    s.send("hello").unwrap();
    assert_eq!(
        frames(&mut rx),
        vec![
            json!({
                "event_type": "connection_request",
                "username": "alice",
                "subscribe_for_events": ["past_chats"]
            }),
            json!({"event_type": "message", "username": "alice", "message": "hello"}),
        ]
    );
}

#[test]
fn open_outside_connecting_is_rejected() {
    let mut s = Session::new("alice", "");
    let (tx, _rx) = mpsc::channel(4);
    let err = s.on_open(Channel::new(tx)).unwrap_err();
    assert_eq!(err.code().as_str(), "INTERNAL");
    assert!(!s.is_connected());
}

#[test]
fn close_releases_channel() {
    let mut s = Session::new("alice", "");
    let mut rx = open(&mut s);
    frames(&mut rx);

    s.on_close();
    assert_eq!(s.state(), ConnState::Closed);
    let err = s.send("late").unwrap_err();
    assert_eq!(err.code().as_str(), "NOT_CONNECTED");
    assert!(frames(&mut rx).is_empty());
}

#[test]
fn dropped_writer_counts_as_disconnected() {
    let mut s = Session::new("alice", "");
    let rx = open(&mut s);
    drop(rx);
    assert!(!s.is_connected());
    assert_eq!(s.send("x").unwrap_err().code().as_str(), "NOT_CONNECTED");
}

#[test]
fn repeated_typing_true_writes_one_frame() {
    let mut s = Session::new("alice", "");
    let mut rx = open(&mut s);
    frames(&mut rx);

    s.send_typing(true).unwrap();
    s.send_typing(true).unwrap();
    s.send_typing(false).unwrap();
    s.send_typing(true).unwrap();

    let typing: Vec<bool> = frames(&mut rx)
        .iter()
        .map(|f| {
            assert_eq!(f["event_type"], "typing");
            assert_eq!(f["username"], "alice");
            f["is_typing"].as_bool().unwrap()
        })
        .collect();
    assert_eq!(typing, vec![true, false, true]);
}

#[test]
fn reconnect_starts_fresh_instance() {
    let mut s = Session::new("alice", "Lobby");
    let mut first = open(&mut s);
    s.send_typing(true).unwrap();
    s.on_close();

    let mut second = open(&mut s);
    s.send_typing(true).unwrap();
    assert_eq!(frames(&mut first).len(), 2);

    let f = frames(&mut second);
    assert_eq!(f.len(), 2);
    assert_eq!(f[0]["event_type"], "connection_request");
    assert_eq!(f[1]["is_typing"], true);
}

#[test]
fn room_envelopes() {
    let mut s = Session::new("alice", "");
    let mut rx = open(&mut s);
    frames(&mut rx);

    s.send_room_switch("Lobby").unwrap();
    s.send_room_create("dev").unwrap();
    s.send_room_chat_clear("dev").unwrap();
    assert_eq!(
        frames(&mut rx),
        vec![
            json!({"event_type": "room_switch_request", "room_name": "Lobby"}),
            json!({"event_type": "room_create", "room_name": "dev"}),
            json!({"event_type": "room_chat_clear", "room_name": "dev", "username": "alice"}),
        ]
    );
}

#[test]
fn default_room_is_global() {
    let mut s = Session::new("alice", "  ");
    assert_eq!(s.room_name(), "Global");
    s.set_room_name("Lobby");
    assert_eq!(s.room_name(), "Lobby");
}
