//! WebSocket client transport.
//!
//! Responsibilities:
//! - Build and check the connect request (`ws://` / `wss://` only)
//! - Open the socket (tokio-tungstenite)
//! - Move text frames in both directions; lifecycle frames stay below the seam

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use wschat_core::error::{ChatError, Result};

use super::codec::{decode, encode, Inbound};

/// Bidirectional text-frame channel driven by the client loop.
///
/// `recv` must be cancel-safe: the loop polls it inside `tokio::select!`.
#[async_trait]
pub trait Transport: Send {
    async fn send(&mut self, frame: String) -> Result<()>;

    /// Next text frame. `None` once the peer closed the stream.
    async fn recv(&mut self) -> Option<Result<String>>;

    async fn close(&mut self) -> Result<()>;
}

/// Parse `url` into a handshake request.
///
/// Fails with `TransportConstruction` for unparsable addresses, schemes other
/// than `ws`/`wss`, and a missing host. Nothing is opened here.
pub fn client_request(url: &str) -> Result<Request> {
    let request = url
        .into_client_request()
        .map_err(|e| ChatError::TransportConstruction(format!("{url}: {e}")))?;

    match request.uri().scheme_str() {
        Some("ws") | Some("wss") => {}
        other => {
            return Err(ChatError::TransportConstruction(format!(
                "{url}: unsupported scheme {}",
                other.unwrap_or("<none>")
            )))
        }
    }
    if request.uri().host().map_or(true, str::is_empty) {
        return Err(ChatError::TransportConstruction(format!("{url}: missing host")));
    }
    Ok(request)
}

pub struct WsTransport {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    /// Perform the opening handshake.
    pub async fn open(request: Request) -> Result<Self> {
        let uri = request.uri().to_string();
        let (inner, response) = connect_async(request)
            .await
            .map_err(|e| ChatError::Transport(format!("connect {uri}: {e}")))?;
        info!(%uri, status = %response.status(), "websocket open");
        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, frame: String) -> Result<()> {
        self.inner
            .send(encode(frame))
            .await
            .map_err(|e| ChatError::Transport(format!("send: {e}")))
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        loop {
            let msg = match self.inner.next().await? {
                Ok(m) => m,
                Err(e) => return Some(Err(ChatError::Transport(format!("recv: {e}")))),
            };
            match decode(msg) {
                Ok(Inbound::Text(text)) => return Some(Ok(text)),
                Ok(Inbound::Control) => continue,
                Ok(Inbound::Close) => {
                    debug!("close frame received");
                    return None;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.inner
            .close(None)
            .await
            .map_err(|e| ChatError::Transport(format!("close: {e}")))
    }
}
