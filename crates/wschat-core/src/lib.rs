//! wschat core: transport-agnostic protocol primitives and the shared error type.
//!
//! This crate defines the wire-level envelopes exchanged with the chat server
//! and the error surface shared by the client crates. It carries no transport
//! or runtime dependencies so it can be reused by any front-end.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Every fallible path surfaces as `ChatError`/`Result`, so a hostile or
//! buggy server cannot crash the client with a bad frame.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ChatError, Result};
