//! Sensor input configuration.

use stream::{Sink, Source};
use wire::field::scalar::{self, Bool, Enum, Float, UInt32};
use wire::field::{self, message};
use wire::{read_tag, size, DecodeResult, Message, WireType};

use crate::enums::{SensorMethod, SensorSource};

/// Linear mapping from raw input range to output range.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinearConfig {
    pub output_min: f32,
    pub output_max: f32,
    pub input_min: f32,
    pub input_max: f32,
}

impl Message for LinearConfig {
    const MAX_SIZE: usize = 4 * size::fixed32(1);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Float>(1, self.output_min)
            + scalar::implicit_len::<Float>(2, self.output_max)
            + scalar::implicit_len::<Float>(3, self.input_min)
            + scalar::implicit_len::<Float>(4, self.input_max)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Float, W>(1, self.output_min, sink)?;
        scalar::encode_implicit::<Float, W>(2, self.output_max, sink)?;
        scalar::encode_implicit::<Float, W>(3, self.input_min, sink)?;
        scalar::encode_implicit::<Float, W>(4, self.input_max, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => self.output_min = scalar::merge::<Float, R>(1, source)?,
                (2, WireType::Fixed32) => self.output_max = scalar::merge::<Float, R>(2, source)?,
                (3, WireType::Fixed32) => self.input_min = scalar::merge::<Float, R>(3, source)?,
                (4, WireType::Fixed32) => self.input_max = scalar::merge::<Float, R>(4, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// A sensor pinned to a fixed value.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstConfig {
    pub fixed_value: f32,
}

impl Message for ConstConfig {
    const MAX_SIZE: usize = size::fixed32(1);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Float>(1, self.fixed_value)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Float, W>(1, self.fixed_value, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => self.fixed_value = scalar::merge::<Float, R>(1, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Steinhart-Hart coefficients and bias resistor.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ThermistorConfig {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub bias: f32,
}

impl Message for ThermistorConfig {
    const MAX_SIZE: usize = 4 * size::fixed32(1);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Float>(1, self.a)
            + scalar::implicit_len::<Float>(2, self.b)
            + scalar::implicit_len::<Float>(3, self.c)
            + scalar::implicit_len::<Float>(4, self.bias)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Float, W>(1, self.a, sink)?;
        scalar::encode_implicit::<Float, W>(2, self.b, sink)?;
        scalar::encode_implicit::<Float, W>(3, self.c, sink)?;
        scalar::encode_implicit::<Float, W>(4, self.bias, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => self.a = scalar::merge::<Float, R>(1, source)?,
                (2, WireType::Fixed32) => self.b = scalar::merge::<Float, R>(2, source)?,
                (3, WireType::Fixed32) => self.c = scalar::merge::<Float, R>(3, source)?,
                (4, WireType::Fixed32) => self.bias = scalar::merge::<Float, R>(4, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Valid raw range and the value substituted outside it.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FaultConfig {
    pub min: f32,
    pub max: f32,
    pub value: f32,
}

impl Message for FaultConfig {
    const MAX_SIZE: usize = 3 * size::fixed32(1);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Float>(1, self.min)
            + scalar::implicit_len::<Float>(2, self.max)
            + scalar::implicit_len::<Float>(3, self.value)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Float, W>(1, self.min, sink)?;
        scalar::encode_implicit::<Float, W>(2, self.max, sink)?;
        scalar::encode_implicit::<Float, W>(3, self.value, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => self.min = scalar::merge::<Float, R>(1, source)?,
                (2, WireType::Fixed32) => self.max = scalar::merge::<Float, R>(2, source)?,
                (3, WireType::Fixed32) => self.value = scalar::merge::<Float, R>(3, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Angular capture window for windowed sampling.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowConfig {
    pub capture_width: f32,
    pub total_width: f32,
    pub offset: f32,
}

impl Message for WindowConfig {
    const MAX_SIZE: usize = 3 * size::fixed32(1);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Float>(1, self.capture_width)
            + scalar::implicit_len::<Float>(2, self.total_width)
            + scalar::implicit_len::<Float>(3, self.offset)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Float, W>(1, self.capture_width, sink)?;
        scalar::encode_implicit::<Float, W>(2, self.total_width, sink)?;
        scalar::encode_implicit::<Float, W>(3, self.offset, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => {
                    self.capture_width = scalar::merge::<Float, R>(1, source)?;
                }
                (2, WireType::Fixed32) => self.total_width = scalar::merge::<Float, R>(2, source)?,
                (3, WireType::Fixed32) => self.offset = scalar::merge::<Float, R>(3, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// One analog or frequency sensor.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sensor {
    pub source: Option<SensorSource>,
    pub method: Option<SensorMethod>,
    pub pin: Option<u32>,
    pub lag: Option<f32>,
    pub linear_config: Option<LinearConfig>,
    pub const_config: Option<ConstConfig>,
    pub thermistor_config: Option<ThermistorConfig>,
    pub fault_config: Option<FaultConfig>,
    pub window_config: Option<WindowConfig>,
}

impl Message for Sensor {
    const MAX_SIZE: usize = size::enumeration(1, SensorSource::MAX_RAW)
        + size::enumeration(2, SensorMethod::MAX_RAW)
        + size::uint32(3)
        + size::fixed32(4)
        + size::message(5, LinearConfig::MAX_SIZE)
        + size::message(6, ConstConfig::MAX_SIZE)
        + size::message(7, ThermistorConfig::MAX_SIZE)
        + size::message(8, FaultConfig::MAX_SIZE)
        + size::message(9, WindowConfig::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Enum<SensorSource>>(1, self.source)
            + scalar::optional_len::<Enum<SensorMethod>>(2, self.method)
            + scalar::optional_len::<UInt32>(3, self.pin)
            + scalar::optional_len::<Float>(4, self.lag)
            + message::optional_len(5, self.linear_config.as_ref())
            + message::optional_len(6, self.const_config.as_ref())
            + message::optional_len(7, self.thermistor_config.as_ref())
            + message::optional_len(8, self.fault_config.as_ref())
            + message::optional_len(9, self.window_config.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Enum<SensorSource>, W>(1, self.source, sink)?;
        scalar::encode_optional::<Enum<SensorMethod>, W>(2, self.method, sink)?;
        scalar::encode_optional::<UInt32, W>(3, self.pin, sink)?;
        scalar::encode_optional::<Float, W>(4, self.lag, sink)?;
        message::encode_optional(5, self.linear_config.as_ref(), sink)?;
        message::encode_optional(6, self.const_config.as_ref(), sink)?;
        message::encode_optional(7, self.thermistor_config.as_ref(), sink)?;
        message::encode_optional(8, self.fault_config.as_ref(), sink)?;
        message::encode_optional(9, self.window_config.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => {
                    self.source = Some(scalar::merge::<Enum<SensorSource>, R>(1, source)?);
                }
                (2, WireType::Varint) => {
                    self.method = Some(scalar::merge::<Enum<SensorMethod>, R>(2, source)?);
                }
                (3, WireType::Varint) => self.pin = Some(scalar::merge::<UInt32, R>(3, source)?),
                (4, WireType::Fixed32) => self.lag = Some(scalar::merge::<Float, R>(4, source)?),
                (5, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.linear_config, source)?;
                }
                (6, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.const_config, source)?;
                }
                (7, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.thermistor_config, source)?;
                }
                (8, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.fault_config, source)?;
                }
                (9, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.window_config, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// A knock sensor channel.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KnockSensor {
    pub enabled: Option<bool>,
    pub frequency: Option<f32>,
    pub threshold: Option<f32>,
}

impl Message for KnockSensor {
    const MAX_SIZE: usize = size::boolean(1) + size::fixed32(2) + size::fixed32(3);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Bool>(1, self.enabled)
            + scalar::optional_len::<Float>(2, self.frequency)
            + scalar::optional_len::<Float>(3, self.threshold)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Bool, W>(1, self.enabled, sink)?;
        scalar::encode_optional::<Float, W>(2, self.frequency, sink)?;
        scalar::encode_optional::<Float, W>(3, self.threshold, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => self.enabled = Some(scalar::merge::<Bool, R>(1, source)?),
                (2, WireType::Fixed32) => {
                    self.frequency = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.threshold = Some(scalar::merge::<Float, R>(3, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Every configured sensor input.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorInputs {
    pub aap: Option<Sensor>,
    pub brv: Option<Sensor>,
    pub clt: Option<Sensor>,
    pub ego: Option<Sensor>,
    pub frt: Option<Sensor>,
    pub iat: Option<Sensor>,
    pub map: Option<Sensor>,
    pub tps: Option<Sensor>,
    pub frp: Option<Sensor>,
    pub eth: Option<Sensor>,
    pub knock1: Option<KnockSensor>,
    pub knock2: Option<KnockSensor>,
}

impl SensorInputs {
    /// Analog sensors in field order 1..=10.
    const fn analog(&self) -> [(u32, Option<&Sensor>); 10] {
        [
            (1, self.aap.as_ref()),
            (2, self.brv.as_ref()),
            (3, self.clt.as_ref()),
            (4, self.ego.as_ref()),
            (5, self.frt.as_ref()),
            (6, self.iat.as_ref()),
            (7, self.map.as_ref()),
            (8, self.tps.as_ref()),
            (9, self.frp.as_ref()),
            (10, self.eth.as_ref()),
        ]
    }

    fn analog_mut(&mut self, field: u32) -> Option<&mut Option<Sensor>> {
        Some(match field {
            1 => &mut self.aap,
            2 => &mut self.brv,
            3 => &mut self.clt,
            4 => &mut self.ego,
            5 => &mut self.frt,
            6 => &mut self.iat,
            7 => &mut self.map,
            8 => &mut self.tps,
            9 => &mut self.frp,
            10 => &mut self.eth,
            _ => return None,
        })
    }
}

impl Message for SensorInputs {
    const MAX_SIZE: usize = 10 * size::message(1, Sensor::MAX_SIZE)
        + size::message(14, KnockSensor::MAX_SIZE)
        + size::message(15, KnockSensor::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        let analog: usize = self
            .analog()
            .into_iter()
            .map(|(field, sensor)| message::optional_len(field, sensor))
            .sum();
        analog
            + message::optional_len(14, self.knock1.as_ref())
            + message::optional_len(15, self.knock2.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        for (field, sensor) in self.analog() {
            message::encode_optional(field, sensor, sink)?;
        }
        message::encode_optional(14, self.knock1.as_ref(), sink)?;
        message::encode_optional(15, self.knock2.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (14, WireType::LengthDelimited) => message::merge_optional(&mut self.knock1, source)?,
                (15, WireType::LengthDelimited) => message::merge_optional(&mut self.knock2, source)?,
                (number, WireType::LengthDelimited) => match self.analog_mut(number) {
                    Some(slot) => message::merge_optional(slot, source)?,
                    None => field::unknown(tag),
                },
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}
