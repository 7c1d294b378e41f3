//! ECU-to-host responses.

use heapless::String;
use stream::{Sink, Source};
use wire::field::scalar::{self, Bool, UInt32};
use wire::field::{self, message, oneof, string};
use wire::{read_tag, size, DecodeResult, Empty, Message, WireType};

use crate::config::Configuration;
use crate::limits::{FIRMWARE_VERSION_LEN, PLATFORM_LEN, PROTO_LEN};

/// Build identification and the schema the firmware was built against.
///
/// Strings use implicit presence: an empty string is not sent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FirmwareInfo {
    pub version: String<FIRMWARE_VERSION_LEN>,
    pub platform: String<PLATFORM_LEN>,
    pub proto: String<PROTO_LEN>,
}

impl Message for FirmwareInfo {
    const MAX_SIZE: usize = size::string(1, FIRMWARE_VERSION_LEN)
        + size::string(2, PLATFORM_LEN)
        + size::string(3, PROTO_LEN);

    fn encoded_len(&self) -> usize {
        string::implicit_len(1, &self.version)
            + string::implicit_len(2, &self.platform)
            + string::implicit_len(3, &self.proto)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        string::encode_implicit(1, &self.version, sink)?;
        string::encode_implicit(2, &self.platform, sink)?;
        string::encode_implicit(3, &self.proto, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => self.version = string::merge(1, source)?,
                (2, WireType::LengthDelimited) => self.platform = string::merge(2, source)?,
                (3, WireType::LengthDelimited) => self.proto = string::merge(3, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Outcome of applying a configuration.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetConfigResponse {
    pub config: Option<Configuration>,
    pub success: Option<bool>,
    pub requires_restart: Option<bool>,
}

impl Message for SetConfigResponse {
    const MAX_SIZE: usize =
        size::message(1, Configuration::MAX_SIZE) + size::boolean(2) + size::boolean(3);

    fn encoded_len(&self) -> usize {
        message::optional_len(1, self.config.as_ref())
            + scalar::optional_len::<Bool>(2, self.success)
            + scalar::optional_len::<Bool>(3, self.requires_restart)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        message::encode_optional(1, self.config.as_ref(), sink)?;
        scalar::encode_optional::<Bool, W>(2, self.success, sink)?;
        scalar::encode_optional::<Bool, W>(3, self.requires_restart, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => message::merge_optional(&mut self.config, source)?,
                (2, WireType::Varint) => self.success = Some(scalar::merge::<Bool, R>(2, source)?),
                (3, WireType::Varint) => {
                    self.requires_restart = Some(scalar::merge::<Bool, R>(3, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// The running configuration.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GetConfigResponse {
    pub config: Option<Configuration>,
    pub needs_flash: Option<bool>,
}

impl Message for GetConfigResponse {
    const MAX_SIZE: usize = size::message(1, Configuration::MAX_SIZE) + size::boolean(2);

    fn encoded_len(&self) -> usize {
        message::optional_len(1, self.config.as_ref())
            + scalar::optional_len::<Bool>(2, self.needs_flash)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        message::encode_optional(1, self.config.as_ref(), sink)?;
        scalar::encode_optional::<Bool, W>(2, self.needs_flash, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => message::merge_optional(&mut self.config, source)?,
                (2, WireType::Varint) => {
                    self.needs_flash = Some(scalar::merge::<Bool, R>(2, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Outcome of writing the configuration to flash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlashConfigResponse {
    pub success: Option<bool>,
}

impl Message for FlashConfigResponse {
    const MAX_SIZE: usize = size::boolean(1);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Bool>(1, self.success)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Bool, W>(1, self.success, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => self.success = Some(scalar::merge::<Bool, R>(1, source)?),
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// The response body; at most one is carried.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(clippy::large_enum_variant)]
pub enum ResponseKind {
    Pong,
    FirmwareInfo(FirmwareInfo),
    SetConfig(SetConfigResponse),
    GetConfig(GetConfigResponse),
    FlashConfig(FlashConfigResponse),
}

impl ResponseKind {
    /// Wire field number of the selected alternative.
    #[must_use]
    pub const fn field(&self) -> u32 {
        match self {
            Self::Pong => 2,
            Self::FirmwareInfo(_) => 3,
            Self::SetConfig(_) => 4,
            Self::GetConfig(_) => 5,
            Self::FlashConfig(_) => 6,
        }
    }

    fn firmware_info_mut(&mut self) -> Option<&mut FirmwareInfo> {
        match self {
            Self::FirmwareInfo(inner) => Some(inner),
            _ => None,
        }
    }

    fn set_config_mut(&mut self) -> Option<&mut SetConfigResponse> {
        match self {
            Self::SetConfig(inner) => Some(inner),
            _ => None,
        }
    }

    fn get_config_mut(&mut self) -> Option<&mut GetConfigResponse> {
        match self {
            Self::GetConfig(inner) => Some(inner),
            _ => None,
        }
    }

    fn flash_config_mut(&mut self) -> Option<&mut FlashConfigResponse> {
        match self {
            Self::FlashConfig(inner) => Some(inner),
            _ => None,
        }
    }

    fn encoded_len(&self) -> usize {
        let field = self.field();
        match self {
            Self::Pong => message::encoded_len(field, &Empty),
            Self::FirmwareInfo(inner) => message::encoded_len(field, inner),
            Self::SetConfig(inner) => message::encoded_len(field, inner),
            Self::GetConfig(inner) => message::encoded_len(field, inner),
            Self::FlashConfig(inner) => message::encoded_len(field, inner),
        }
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        let field = self.field();
        match self {
            Self::Pong => message::encode(field, &Empty, sink),
            Self::FirmwareInfo(inner) => message::encode(field, inner, sink),
            Self::SetConfig(inner) => message::encode(field, inner, sink),
            Self::GetConfig(inner) => message::encode(field, inner, sink),
            Self::FlashConfig(inner) => message::encode(field, inner, sink),
        }
    }
}

/// A response carrying the id of the request it answers.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Response {
    pub id: u32,
    pub kind: Option<ResponseKind>,
}

impl Message for Response {
    const MAX_SIZE: usize = size::uint32(1)
        + size::oneof(&[
            size::message(2, Empty::MAX_SIZE),
            size::message(3, FirmwareInfo::MAX_SIZE),
            size::message(4, SetConfigResponse::MAX_SIZE),
            size::message(5, GetConfigResponse::MAX_SIZE),
            size::message(6, FlashConfigResponse::MAX_SIZE),
        ]);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<UInt32>(1, self.id)
            + self.kind.as_ref().map_or(0, ResponseKind::encoded_len)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<UInt32, W>(1, self.id, sink)?;
        match &self.kind {
            Some(kind) => kind.encode(sink),
            None => Ok(()),
        }
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => self.id = scalar::merge::<UInt32, R>(1, source)?,
                (2, WireType::LengthDelimited) => {
                    oneof::merge_empty(&mut self.kind, ResponseKind::Pong, source)?;
                }
                (3, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ResponseKind::firmware_info_mut,
                    ResponseKind::FirmwareInfo,
                    source,
                )?,
                (4, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ResponseKind::set_config_mut,
                    ResponseKind::SetConfig,
                    source,
                )?,
                (5, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ResponseKind::get_config_mut,
                    ResponseKind::GetConfig,
                    source,
                )?,
                (6, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    ResponseKind::flash_config_mut,
                    ResponseKind::FlashConfig,
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
    use wire::DecodeError;

    #[test]
    fn firmware_info_omits_empty_strings() {
        let info = FirmwareInfo {
            version: String::try_from("1.2").unwrap(),
            ..FirmwareInfo::default()
        };
        assert_eq!(info.encode_to_vec(), vec![0x0A, 0x03, b'1', b'.', b'2']);
    }

    #[test]
    fn firmware_info_roundtrip_in_response() {
        let response = Response {
            id: 300,
            kind: Some(ResponseKind::FirmwareInfo(FirmwareInfo {
                version: String::try_from("v0.4.1").unwrap(),
                platform: String::try_from("stm32f4").unwrap(),
                proto: String::try_from("syntax = \"proto3\";").unwrap(),
            })),
        };
        let bytes = response.encode_to_vec();
        assert_eq!(bytes[..3], [0x08, 0xAC, 0x02]);
        assert_eq!(Response::decode_from_slice(&bytes).unwrap(), response);
    }

    #[test]
    fn platform_too_long() {
        let mut bytes = vec![0x12, 33];
        bytes.extend_from_slice(&[b'p'; 33]);
        assert_eq!(
            FirmwareInfo::decode_from_slice(&bytes).unwrap_err(),
            DecodeError::CapacityExceeded {
                field: 2,
                capacity: PLATFORM_LEN
            }
        );
    }

    #[test]
    fn flash_config_false_is_sent() {
        let response = Response {
            id: 0,
            kind: Some(ResponseKind::FlashConfig(FlashConfigResponse {
                success: Some(false),
            })),
        };
        assert_eq!(response.encode_to_vec(), vec![0x32, 0x02, 0x08, 0x00]);
    }

    #[test]
    fn pong_then_getconfig() {
        let bytes = [0x12, 0x00, 0x2A, 0x02, 0x10, 0x01];
        let response = Response::decode_from_slice(&bytes).unwrap();
        assert_eq!(
            response.kind,
            Some(ResponseKind::GetConfig(GetConfigResponse {
                config: None,
                needs_flash: Some(true),
            }))
        );
    }

    #[test]
    fn max_sizes() {
        assert_eq!(FirmwareInfo::MAX_SIZE, 16488);
        assert_eq!(SetConfigResponse::MAX_SIZE, 16212);
        assert_eq!(GetConfigResponse::MAX_SIZE, 16210);
        assert_eq!(FlashConfigResponse::MAX_SIZE, 2);
        assert_eq!(Response::MAX_SIZE, 16498);
    }
}
