//! Dispatcher module exports.
//!
//! Re-exports the routing functions so the client loop and tests can depend
//! on this module directly.

pub mod dispatcher;

pub use dispatcher::{dispatch, dispatch_text};
