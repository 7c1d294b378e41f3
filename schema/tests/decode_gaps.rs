//! Known divergences from strict wire-format robustness.
//!
//! The decode loop stops at the first unreadable tag and does not skip the
//! payload of tags it does not recognize. These tests pin that behavior so a
//! change to it is a deliberate decision.

use schema::{
    ConsoleKind, ConsoleMessage, EngineUpdate, Event, EventKind, Header, Request, RequestKind,
};
use wire::Message;

#[test]
fn unknown_length_delimited_payload_is_read_as_tags() {
    // field 3 (not in Header), length 5, payload shaped like `seq = 9`.
    let bytes = [0x1A, 0x05, 0x0D, 0x09, 0x00, 0x00, 0x00];
    let header = Header::decode_from_slice(&bytes).unwrap();
    assert_eq!(header.seq, 9);
}

#[test]
fn unknown_field_inside_submessage_stays_in_its_span() {
    // EngineUpdate.header with an unknown length-delimited field inside, then
    // a well-formed position after the span.
    let bytes = [
        0x0A, 0x03, 0x1A, 0x01, 0x08, // header span: misparsed, but bounded
        0x12, 0x02, 0x20, 0x01, // position { synced: true }
    ];
    let update = EngineUpdate::decode_from_slice(&bytes).unwrap();
    assert!(update.header.is_some());
    assert!(update.position.unwrap().synced);
}

#[test]
fn stream_truncated_mid_tag_is_accepted() {
    // a complete seq field, then the first byte of a two-byte tag.
    let bytes = [0x0D, 0x05, 0x00, 0x00, 0x00, 0x95];
    let header = Header::decode_from_slice(&bytes).unwrap();
    assert_eq!(
        header,
        Header {
            seq: 5,
            timestamp: 0
        }
    );
}

#[test]
fn stream_truncated_mid_value_fails() {
    assert!(Header::decode_from_slice(&[0x0D, 0x05, 0x00]).is_err());
}

#[test]
fn wrong_wire_type_for_known_field_is_dropped() {
    // field 1 as a varint, where Header expects fixed32.
    let header = Header::decode_from_slice(&[0x08, 0x07]).unwrap();
    assert_eq!(header, Header::default());
}

#[test]
fn repeated_scalar_last_wins() {
    let bytes = [
        0x0D, 0x01, 0x00, 0x00, 0x00, // seq = 1
        0x0D, 0x02, 0x00, 0x00, 0x00, // seq = 2
    ];
    assert_eq!(Header::decode_from_slice(&bytes).unwrap().seq, 2);
}

#[test]
fn event_oneof_last_tag_wins() {
    let bytes = [0x10, 0x03, 0x20, 0x07];
    let event = Event::decode_from_slice(&bytes).unwrap();
    assert_eq!(event.kind, Some(EventKind::GpioPins(7)));
}

#[test]
fn envelope_oneof_discards_decoded_alternative() {
    let first = ConsoleMessage::from(ConsoleKind::EngineUpdate(EngineUpdate {
        header: Some(Header {
            seq: 1,
            timestamp: 2,
        }),
        ..EngineUpdate::default()
    }));
    let second = ConsoleMessage::from(ConsoleKind::Request(Request {
        id: 3,
        kind: Some(RequestKind::Ping),
    }));
    let mut bytes = first.encode_to_vec();
    bytes.extend_from_slice(&second.encode_to_vec());

    assert_eq!(ConsoleMessage::decode_from_slice(&bytes).unwrap(), second);
}

#[test]
fn envelope_same_alternative_merges() {
    let first = ConsoleMessage::from(ConsoleKind::Request(Request {
        id: 3,
        kind: None,
    }));
    let second = ConsoleMessage::from(ConsoleKind::Request(Request {
        id: 0,
        kind: Some(RequestKind::FlashConfig),
    }));
    let mut bytes = first.encode_to_vec();
    bytes.extend_from_slice(&second.encode_to_vec());

    let decoded = ConsoleMessage::decode_from_slice(&bytes).unwrap();
    assert_eq!(
        decoded.kind,
        Some(ConsoleKind::Request(Request {
            id: 3,
            kind: Some(RequestKind::FlashConfig),
        }))
    );
}
