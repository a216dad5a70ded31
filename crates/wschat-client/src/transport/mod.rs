//! Transport layer (WebSocket client).
//!
//! Exposes the [`Transport`] seam used by the client loop, the
//! tokio-tungstenite implementation, and the codec that maps socket messages
//! to text frames before they reach the dispatcher.

pub mod codec;
pub mod ws;

pub use ws::{client_request, Transport, WsTransport};
