//! Host-to-ECU requests.

use stream::{Sink, Source};
use wire::field::scalar::{self, UInt32};
use wire::field::{self, message, oneof};
use wire::{read_tag, size, DecodeResult, Empty, Message, WireType};

use crate::config::Configuration;

/// Replace (or patch) the running configuration.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetConfigRequest {
    pub config: Option<Configuration>,
}

impl Message for SetConfigRequest {
    const MAX_SIZE: usize = size::message(1, Configuration::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        message::optional_len(1, self.config.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        message::encode_optional(1, self.config.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => message::merge_optional(&mut self.config, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// The request body; at most one is carried.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(clippy::large_enum_variant)]
pub enum RequestKind {
    Ping,
    FirmwareInfo,
    SetConfig(SetConfigRequest),
    GetConfig,
    FlashConfig,
    ResetToBootloader,
}

impl RequestKind {
    /// Wire field number of the selected alternative.
    #[must_use]
    pub const fn field(&self) -> u32 {
        match self {
            Self::Ping => 2,
            Self::FirmwareInfo => 3,
            Self::SetConfig(_) => 4,
            Self::GetConfig => 5,
            Self::FlashConfig => 6,
            Self::ResetToBootloader => 7,
        }
    }

    fn set_config_mut(&mut self) -> Option<&mut SetConfigRequest> {
        match self {
            Self::SetConfig(inner) => Some(inner),
            _ => None,
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            Self::SetConfig(inner) => message::encoded_len(self.field(), inner),
            _ => message::encoded_len(self.field(), &Empty),
        }
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        match self {
            Self::SetConfig(inner) => message::encode(self.field(), inner, sink),
            _ => message::encode(self.field(), &Empty, sink),
        }
    }
}

/// A request and the id its response will echo.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Request {
    pub id: u32,
    pub kind: Option<RequestKind>,
}

impl Message for Request {
    const MAX_SIZE: usize = size::uint32(1)
        + size::oneof(&[
            size::message(2, Empty::MAX_SIZE),
            size::message(3, Empty::MAX_SIZE),
            size::message(4, SetConfigRequest::MAX_SIZE),
            size::message(5, Empty::MAX_SIZE),
            size::message(6, Empty::MAX_SIZE),
            size::message(7, Empty::MAX_SIZE),
        ]);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<UInt32>(1, self.id)
            + self.kind.as_ref().map_or(0, RequestKind::encoded_len)
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
                    oneof::merge_empty(&mut self.kind, RequestKind::Ping, source)?;
                }
                (3, WireType::LengthDelimited) => {
                    oneof::merge_empty(&mut self.kind, RequestKind::FirmwareInfo, source)?;
                }
                (4, WireType::LengthDelimited) => oneof::merge_message(
                    &mut self.kind,
                    RequestKind::set_config_mut,
                    RequestKind::SetConfig,
                    source,
                )?,
                (5, WireType::LengthDelimited) => {
                    oneof::merge_empty(&mut self.kind, RequestKind::GetConfig, source)?;
                }
                (6, WireType::LengthDelimited) => {
                    oneof::merge_empty(&mut self.kind, RequestKind::FlashConfig, source)?;
                }
                (7, WireType::LengthDelimited) => {
                    oneof::merge_empty(&mut self.kind, RequestKind::ResetToBootloader, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}
