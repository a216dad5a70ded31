//! Protocol modules (JSON envelopes over WebSocket text frames).
//!
//! - [`event`]: the closed set of `event_type` discriminators.
//! - [`inbound`]: server → client envelopes and the frame decoder.
//! - [`outbound`]: client → server envelopes.
//! - [`notice`]: notice severities carried by `system` events.
//! - [`room`]: default-room naming rules.
//! - [`presence`]: roster status values and username rules.
//!
//! Decoding is panic-free: malformed input is reported as `ChatError`.

pub mod event;
pub mod inbound;
pub mod notice;
pub mod outbound;
pub mod presence;
pub mod room;

pub use event::EventType;
pub use inbound::{decode, InboundEvent};
pub use notice::Severity;
pub use outbound::Outbound;
