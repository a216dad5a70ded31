//! Socket message codec.
//!
//! - Text frames => envelope text (decoded later by the dispatcher)
//! - Binary frames => accepted only when they hold UTF-8 text
//! - Ping/Pong are answered by tungstenite and surface as `Control`
//! - Close ends the stream

use tokio_tungstenite::tungstenite::Message;

use wschat_core::error::{ChatError, Result};

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Control,
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => Ok(Inbound::Text(s.as_str().to_owned())),
        Message::Binary(b) => String::from_utf8(b.to_vec())
            .map(Inbound::Text)
            .map_err(|e| ChatError::MalformedFrame(format!("binary frame is not utf-8: {e}"))),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(Inbound::Control),
        Message::Close(_) => Ok(Inbound::Close),
    }
}

pub fn encode(frame: String) -> Message {
    Message::text(frame)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn text_passes_through() {
        let got = decode(Message::text(r#"{"event_type":"message"}"#)).unwrap();
        assert_eq!(got, Inbound::Text(r#"{"event_type":"message"}"#.into()));
    }

    #[test]
    fn binary_must_be_utf8() {
        let ok = decode(Message::binary(b"{}".to_vec())).unwrap();
        assert_eq!(ok, Inbound::Text("{}".into()));

        let err = decode(Message::binary(vec![0xffu8, 0xfe])).unwrap_err();
        assert_eq!(err.code().as_str(), "MALFORMED_FRAME");
    }

    #[test]
    fn lifecycle_frames() {
        assert_eq!(decode(Message::Close(None)).unwrap(), Inbound::Close);
        assert_eq!(
            decode(Message::Ping(Default::default())).unwrap(),
            Inbound::Control
        );
    }
}
