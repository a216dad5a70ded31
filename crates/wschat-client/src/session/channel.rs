use tokio::sync::mpsc::{self, error::TrySendError};

use wschat_core::error::{ChatError, Result};

/// Outbound queue sender for one open socket.
///
/// The socket writer drains the receiving half; writes never await, so a
/// reaction can never block on the network.
#[derive(Debug)]
pub struct Channel {
    tx: mpsc::Sender<String>,
}

impl Channel {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    pub fn write(&self, frame: String) -> Result<()> {
        self.tx.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => ChatError::Transport("outbound queue full".into()),
            TrySendError::Closed(_) => ChatError::NotConnected,
        })
    }
}
