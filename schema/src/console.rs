//! The top-level envelope exchanged over the console link.

use stream::{Sink, Source};
use wire::field::{self, message, oneof};
use wire::{read_tag, size, DecodeResult, Message, WireType};

use crate::request::Request;
use crate::response::Response;
use crate::telemetry::{EngineUpdate, Event};

/// The envelope body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(clippy::large_enum_variant)]
pub enum ConsoleKind {
    EngineUpdate(EngineUpdate),
    Event(Event),
    Request(Request),
    Response(Response),
}

impl ConsoleKind {
    /// Wire field number of the selected alternative.
    #[must_use]
    pub const fn field(&self) -> u32 {
        match self {
            Self::EngineUpdate(_) => 2,
            Self::Event(_) => 3,
            Self::Request(_) => 4,
            Self::Response(_) => 5,
        }
    }

    fn engine_update_mut(&mut self) -> Option<&mut EngineUpdate> {
        match self {
            Self::EngineUpdate(inner) => Some(inner),
            _ => None,
        }
    }

    fn event_mut(&mut self) -> Option<&mut Event> {
        match self {
            Self::Event(inner) => Some(inner),
            _ => None,
        }
    }

    fn request_mut(&mut self) -> Option<&mut Request> {
        match self {
            Self::Request(inner) => Some(inner),
            _ => None,
        }
    }

    fn response_mut(&mut self) -> Option<&mut Response> {
        match self {
            Self::Response(inner) => Some(inner),
            _ => None,
        }
    }
}

/// One framed console message.
///
/// The transport wraps the encoded bytes with its own checksum; nothing here
/// computes or verifies it.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConsoleMessage {
    pub kind: Option<ConsoleKind>,
}

impl From<ConsoleKind> for ConsoleMessage {
    fn from(kind: ConsoleKind) -> Self {
        Self { kind: Some(kind) }
    }
}

impl Message for ConsoleMessage {
    const MAX_SIZE: usize = size::oneof(&[
        size::message(2, EngineUpdate::MAX_SIZE),
        size::message(3, Event::MAX_SIZE),
        size::message(4, Request::MAX_SIZE),
        size::message(5, Response::MAX_SIZE),
    ]);

    fn encoded_len(&self) -> usize {
        match &self.kind {
            Some(ConsoleKind::EngineUpdate(inner)) => message::encoded_len(2, inner),
            Some(ConsoleKind::Event(inner)) => message::encoded_len(3, inner),
            Some(ConsoleKind::Request(inner)) => message::encoded_len(4, inner),
            Some(ConsoleKind::Response(inner)) => message::encoded_len(5, inner),
            None => 0,
        }
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        match &self.kind {
            Some(ConsoleKind::EngineUpdate(inner)) => message::encode(2, inner, sink),
            Some(ConsoleKind::Event(inner)) => message::encode(3, inner, sink),
            Some(ConsoleKind::Request(inner)) => message::encode(4, inner, sink),
            Some(ConsoleKind::Response(inner)) => message::encode(5, inner, sink),
            None => Ok(()),
        }
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (2, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ConsoleKind::engine_update_mut,
                    ConsoleKind::EngineUpdate,
                    source,
                )?,
                (3, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ConsoleKind::event_mut,
                    ConsoleKind::Event,
                    source,
                )?,
                (4, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ConsoleKind::request_mut,
                    ConsoleKind::Request,
                    source,
                )?,
                (5, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ConsoleKind::response_mut,
                    ConsoleKind::Response,
                    source,
                )?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestKind;
    use crate::telemetry::{EventKind, Header};

    #[test]
    fn empty_envelope_is_empty() {
        assert!(ConsoleMessage::default().encode_to_vec().is_empty());
        assert_eq!(ConsoleMessage::decode_from_slice(&[]).unwrap(), ConsoleMessage::default());
    }

    #[test]
    fn event_envelope_bytes() {
        let msg = ConsoleMessage::from(ConsoleKind::Event(Event {
            header: Some(Header {
                seq: 1,
                timestamp: 0,
            }),
            kind: Some(EventKind::Trigger(0)),
        }));
        assert_eq!(
            msg.encode_to_vec(),
            vec![0x1A, 0x09, 0x0A, 0x05, 0x0D, 0x01, 0x00, 0x00, 0x00, 0x10, 0x00]
        );
    }

    #[test]
    fn request_envelope_roundtrip() {
        let msg = ConsoleMessage::from(ConsoleKind::Request(Request {
            id: 42,
            kind: Some(RequestKind::GetConfig),
        }));
        let bytes = msg.encode_to_vec();
        assert_eq!(bytes, vec![0x22, 0x04, 0x08, 0x2A, 0x2A, 0x00]);
        assert_eq!(ConsoleMessage::decode_from_slice(&bytes).unwrap(), msg);
    }

    #[test]
    fn max_size() {
        assert_eq!(ConsoleMessage::MAX_SIZE, 16502);
        assert_eq!(ConsoleKind::Response(Response::default()).field(), 5);
    }
}
