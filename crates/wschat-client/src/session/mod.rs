//! Connection session: lifecycle state plus the single send surface.
//!
//! The session exclusively owns the outbound [`Channel`]. The dispatcher and
//! the typing detector reach the wire only through [`Session`] methods.

mod channel;
mod state;

pub use channel::Channel;
pub use state::{ConnState, Session};
