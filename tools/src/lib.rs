//! Inspection and debugging tools for the ecupb codec.
//!
//! This crate provides utilities for looking at captured console traffic:
//!
//! - Walk the raw tag/length/value structure of a payload
//! - Decode a payload as a typed [`ConsoleMessage`]
//! - List the static worst-case size of every schema message
//!
//! # Design Principles
//!
//! - **Raw before typed** - `inspect` never needs the payload to be valid, so
//!   it can show where a broken capture goes wrong.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use anyhow::{bail, Context, Result};
use schema::{config, ConsoleKind, ConsoleMessage};
use serde::Serialize;
use stream::{decode_fixed32, decode_varint, SliceReader, Source};
use wire::{read_tag, Message, WireType};

/// Payload of one top-level field as seen on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawValue {
    Varint { value: u32 },
    Fixed32 { bits: u32, float: f32 },
    LengthDelimited { len: usize },
}

/// One tag/length/value entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawField {
    pub offset: usize,
    pub field: u32,
    pub value: RawValue,
}

/// Result of walking a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InspectReport {
    pub total_len: usize,
    pub fields: Vec<RawField>,
    /// Bytes left unwalked after the first malformed entry.
    pub trailing: usize,
    /// Why the walk stopped early, if it did.
    pub stopped: Option<String>,
    /// Envelope alternative, if the payload decodes as a console message.
    pub message_kind: Option<&'static str>,
}

/// Walks the top-level fields of `bytes` without interpreting them.
///
/// Length-delimited payloads are skipped by their declared length. The walk
/// stops at the first entry that cannot be read in full.
pub fn inspect_message(bytes: &[u8]) -> InspectReport {
    let mut reader = SliceReader::new(bytes);
    let mut report = InspectReport {
        total_len: bytes.len(),
        ..InspectReport::default()
    };

    loop {
        let offset = reader.position();
        let Some(tag) = read_tag(&mut reader) else {
            if !reader.is_empty() {
                report.stopped = Some(format!("unreadable tag at offset {offset}"));
            }
            break;
        };
        match read_value(tag.wire_type(), &mut reader) {
            Ok(value) => report.fields.push(RawField {
                offset,
                field: tag.field(),
                value,
            }),
            Err(err) => {
                report.stopped = Some(format!("field {} at offset {offset}: {err}", tag.field()));
                break;
            }
        }
    }

    report.trailing = reader.remaining();
    report.message_kind = ConsoleMessage::decode_from_slice(bytes)
        .ok()
        .and_then(|msg| msg.kind.as_ref().map(kind_name));
    log::debug!(
        "walked {} fields over {} bytes",
        report.fields.len(),
        report.total_len
    );
    report
}

fn read_value(wire_type: WireType, reader: &mut SliceReader<'_>) -> Result<RawValue> {
    match wire_type {
        WireType::Varint => Ok(RawValue::Varint {
            value: decode_varint(reader)?,
        }),
        WireType::Fixed32 => {
            let bits = decode_fixed32(reader)?;
            Ok(RawValue::Fixed32 {
                bits,
                float: f32::from_bits(bits),
            })
        }
        WireType::LengthDelimited => {
            let len = decode_varint(reader)? as usize;
            if len > reader.remaining() {
                bail!(
                    "declared length {len} exceeds the {} bytes left",
                    reader.remaining()
                );
            }
            let mut skip = vec![0u8; len];
            reader.read_exact(&mut skip)?;
            Ok(RawValue::LengthDelimited { len })
        }
        WireType::Unsupported(raw) => bail!("unsupported wire type {raw}"),
    }
}

/// Name of the envelope alternative.
pub const fn kind_name(kind: &ConsoleKind) -> &'static str {
    match kind {
        ConsoleKind::EngineUpdate(_) => "engine_update",
        ConsoleKind::Event(_) => "event",
        ConsoleKind::Request(_) => "request",
        ConsoleKind::Response(_) => "response",
    }
}

/// Decodes `bytes` as a console message.
pub fn decode_message(bytes: &[u8]) -> Result<ConsoleMessage> {
    ConsoleMessage::decode_from_slice(bytes).context("decode console message")
}

/// Decodes `bytes` and converts the message to JSON.
pub fn decode_message_json(bytes: &[u8]) -> Result<serde_json::Value> {
    let msg = decode_message(bytes)?;
    serde_json::to_value(&msg).context("serialize console message")
}

/// Renders a decoded message for terminal output.
pub fn format_decode_pretty(msg: &ConsoleMessage) -> String {
    let kind = msg.kind.as_ref().map_or("empty", kind_name);
    format!(
        "{kind} ({} bytes encoded)\n{:#?}",
        msg.encoded_len(),
        msg.kind
    )
}

/// Static worst-case encoded size of every schema message, leaves first.
pub fn size_table() -> Vec<(&'static str, usize)> {
    vec![
        ("Header", schema::Header::MAX_SIZE),
        ("Sensors", schema::Sensors::MAX_SIZE),
        ("Position", schema::Position::MAX_SIZE),
        ("Calculations", schema::Calculations::MAX_SIZE),
        ("Event", schema::Event::MAX_SIZE),
        ("EngineUpdate", schema::EngineUpdate::MAX_SIZE),
        ("TableRow", config::TableRow::MAX_SIZE),
        ("TableAxis", config::TableAxis::MAX_SIZE),
        ("Table1d", config::Table1d::MAX_SIZE),
        ("Table2d", config::Table2d::MAX_SIZE),
        ("Output", config::Output::MAX_SIZE),
        ("LinearConfig", config::LinearConfig::MAX_SIZE),
        ("ConstConfig", config::ConstConfig::MAX_SIZE),
        ("ThermistorConfig", config::ThermistorConfig::MAX_SIZE),
        ("FaultConfig", config::FaultConfig::MAX_SIZE),
        ("WindowConfig", config::WindowConfig::MAX_SIZE),
        ("Sensor", config::Sensor::MAX_SIZE),
        ("KnockSensor", config::KnockSensor::MAX_SIZE),
        ("SensorInputs", config::SensorInputs::MAX_SIZE),
        ("Decoder", config::Decoder::MAX_SIZE),
        ("TriggerInput", config::TriggerInput::MAX_SIZE),
        ("CrankEnrichment", config::CrankEnrichment::MAX_SIZE),
        ("Fueling", config::Fueling::MAX_SIZE),
        ("Ignition", config::Ignition::MAX_SIZE),
        ("BoostControl", config::BoostControl::MAX_SIZE),
        ("CheckEngineLight", config::CheckEngineLight::MAX_SIZE),
        ("RpmCut", config::RpmCut::MAX_SIZE),
        ("DebugOptions", config::DebugOptions::MAX_SIZE),
        ("Configuration", schema::Configuration::MAX_SIZE),
        ("SetConfigRequest", schema::SetConfigRequest::MAX_SIZE),
        ("Request", schema::Request::MAX_SIZE),
        ("FirmwareInfo", schema::FirmwareInfo::MAX_SIZE),
        ("SetConfigResponse", schema::SetConfigResponse::MAX_SIZE),
        ("GetConfigResponse", schema::GetConfigResponse::MAX_SIZE),
        ("FlashConfigResponse", schema::FlashConfigResponse::MAX_SIZE),
        ("Response", schema::Response::MAX_SIZE),
        ("ConsoleMessage", ConsoleMessage::MAX_SIZE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{Header, Request, RequestKind};

    fn ping(id: u32) -> Vec<u8> {
        ConsoleMessage::from(ConsoleKind::Request(Request {
            id,
            kind: Some(RequestKind::Ping),
        }))
        .encode_to_vec()
    }

    #[test]
    fn inspect_walks_top_level() {
        let report = inspect_message(&ping(7));
        assert_eq!(report.total_len, 6);
        assert_eq!(
            report.fields,
            vec![RawField {
                offset: 0,
                field: 4,
                value: RawValue::LengthDelimited { len: 4 },
            }]
        );
        assert_eq!(report.trailing, 0);
        assert_eq!(report.stopped, None);
        assert_eq!(report.message_kind, Some("request"));
    }

    #[test]
    fn inspect_reads_scalars() {
        let bytes = Header {
            seq: 5,
            timestamp: 1000,
        }
        .encode_to_vec();
        let report = inspect_message(&bytes);
        assert_eq!(report.fields.len(), 2);
        assert_eq!(
            report.fields[1].value,
            RawValue::Fixed32 {
                bits: 1000,
                float: f32::from_bits(1000),
            }
        );
        assert_eq!(report.fields[1].offset, 5);
    }

    #[test]
    fn inspect_stops_at_overlong_length() {
        let report = inspect_message(&[0x08, 0x01, 0x12, 0x09, 0x00]);
        assert_eq!(report.fields.len(), 1);
        assert!(report.stopped.is_some());
        assert_eq!(report.trailing, 1);
        assert_eq!(report.message_kind, None);
    }

    #[test]
    fn decode_json_names_fields() {
        let json = decode_message_json(&ping(9)).unwrap();
        assert_eq!(json["kind"]["Request"]["id"], 9);
    }

    #[test]
    fn decode_reports_errors() {
        assert!(decode_message(&[0x1A, 0x05, 0x00]).is_err());
    }

    #[test]
    fn pretty_output_has_kind() {
        let msg = decode_message(&ping(1)).unwrap();
        assert!(format_decode_pretty(&msg).starts_with("request (6 bytes encoded)"));
        assert!(format_decode_pretty(&ConsoleMessage::default()).starts_with("empty"));
    }

    #[test]
    fn size_table_ends_with_envelope() {
        let table = size_table();
        assert_eq!(table.last(), Some(&("ConsoleMessage", 16502)));
        assert!(table.iter().all(|(_, size)| *size > 0));
    }
}
