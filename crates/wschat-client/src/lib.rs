//! wschat client library entry.
//!
//! This crate wires the session, the dispatcher, the typing detector and the
//! WebSocket transport into one event-loop driver. It is consumed by the
//! `wschat` binary (`main.rs`) and by integration tests, which substitute
//! their own [`ui::ChatUi`] and [`transport::Transport`].

pub mod client;
pub mod config;
pub mod dispatch;
pub mod session;
pub mod transport;
pub mod typing;
pub mod ui;

pub use client::{ChatClient, Command, Exit};
