//! Outputs, triggers, and the fuel, spark and protection settings.

use stream::{Sink, Source};
use wire::field::scalar::{self, Bool, Enum, Float, UInt32};
use wire::field::{self, message};
use wire::{read_tag, size, DecodeResult, Message, WireType};

use super::table::{Table1d, Table2d};
use crate::enums::{DwellType, InputEdge, InputType, OutputType, TriggerType};

/// An injector or coil output channel.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Output {
    pub pin: Option<u32>,
    pub output_type: Option<OutputType>,
    pub inverted: Option<bool>,
    pub angle: Option<f32>,
}

impl Message for Output {
    const MAX_SIZE: usize = size::uint32(1)
        + size::enumeration(2, OutputType::MAX_RAW)
        + size::boolean(3)
        + size::fixed32(4);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<UInt32>(1, self.pin)
            + scalar::optional_len::<Enum<OutputType>>(2, self.output_type)
            + scalar::optional_len::<Bool>(3, self.inverted)
            + scalar::optional_len::<Float>(4, self.angle)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<UInt32, W>(1, self.pin, sink)?;
        scalar::encode_optional::<Enum<OutputType>, W>(2, self.output_type, sink)?;
        scalar::encode_optional::<Bool, W>(3, self.inverted, sink)?;
        scalar::encode_optional::<Float, W>(4, self.angle, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => self.pin = Some(scalar::merge::<UInt32, R>(1, source)?),
                (2, WireType::Varint) => {
                    self.output_type = Some(scalar::merge::<Enum<OutputType>, R>(2, source)?);
                }
                (3, WireType::Varint) => self.inverted = Some(scalar::merge::<Bool, R>(3, source)?),
                (4, WireType::Fixed32) => self.angle = Some(scalar::merge::<Float, R>(4, source)?),
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Crank decoder geometry.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoder {
    pub trigger_type: Option<TriggerType>,
    pub degrees_per_trigger: Option<f32>,
    pub max_tooth_variance: Option<f32>,
    pub min_rpm: Option<f32>,
    pub num_triggers: Option<u32>,
    pub offset: Option<f32>,
}

impl Message for Decoder {
    const MAX_SIZE: usize = size::enumeration(1, TriggerType::MAX_RAW)
        + size::fixed32(2)
        + size::fixed32(3)
        + size::fixed32(4)
        + size::uint32(5)
        + size::fixed32(6);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Enum<TriggerType>>(1, self.trigger_type)
            + scalar::optional_len::<Float>(2, self.degrees_per_trigger)
            + scalar::optional_len::<Float>(3, self.max_tooth_variance)
            + scalar::optional_len::<Float>(4, self.min_rpm)
            + scalar::optional_len::<UInt32>(5, self.num_triggers)
            + scalar::optional_len::<Float>(6, self.offset)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Enum<TriggerType>, W>(1, self.trigger_type, sink)?;
        scalar::encode_optional::<Float, W>(2, self.degrees_per_trigger, sink)?;
        scalar::encode_optional::<Float, W>(3, self.max_tooth_variance, sink)?;
        scalar::encode_optional::<Float, W>(4, self.min_rpm, sink)?;
        scalar::encode_optional::<UInt32, W>(5, self.num_triggers, sink)?;
        scalar::encode_optional::<Float, W>(6, self.offset, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => {
                    self.trigger_type = Some(scalar::merge::<Enum<TriggerType>, R>(1, source)?);
                }
                (2, WireType::Fixed32) => {
                    self.degrees_per_trigger = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.max_tooth_variance = Some(scalar::merge::<Float, R>(3, source)?);
                }
                (4, WireType::Fixed32) => self.min_rpm = Some(scalar::merge::<Float, R>(4, source)?),
                (5, WireType::Varint) => {
                    self.num_triggers = Some(scalar::merge::<UInt32, R>(5, source)?);
                }
                (6, WireType::Fixed32) => self.offset = Some(scalar::merge::<Float, R>(6, source)?),
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// One trigger input channel.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriggerInput {
    pub edge: Option<InputEdge>,
    pub input_type: Option<InputType>,
}

impl Message for TriggerInput {
    const MAX_SIZE: usize =
        size::enumeration(1, InputEdge::MAX_RAW) + size::enumeration(2, InputType::MAX_RAW);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Enum<InputEdge>>(1, self.edge)
            + scalar::optional_len::<Enum<InputType>>(2, self.input_type)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Enum<InputEdge>, W>(1, self.edge, sink)?;
        scalar::encode_optional::<Enum<InputType>, W>(2, self.input_type, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => {
                    self.edge = Some(scalar::merge::<Enum<InputEdge>, R>(1, source)?);
                }
                (2, WireType::Varint) => {
                    self.input_type = Some(scalar::merge::<Enum<InputType>, R>(2, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Extra fuel while cranking.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CrankEnrichment {
    pub cranking_rpm: Option<f32>,
    pub cranking_temp: Option<f32>,
    pub enrich_amt: Option<f32>,
}

impl Message for CrankEnrichment {
    const MAX_SIZE: usize = 3 * size::fixed32(1);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Float>(1, self.cranking_rpm)
            + scalar::optional_len::<Float>(2, self.cranking_temp)
            + scalar::optional_len::<Float>(3, self.enrich_amt)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Float, W>(1, self.cranking_rpm, sink)?;
        scalar::encode_optional::<Float, W>(2, self.cranking_temp, sink)?;
        scalar::encode_optional::<Float, W>(3, self.enrich_amt, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => {
                    self.cranking_rpm = Some(scalar::merge::<Float, R>(1, source)?);
                }
                (2, WireType::Fixed32) => {
                    self.cranking_temp = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.enrich_amt = Some(scalar::merge::<Float, R>(3, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Fuel system parameters and fueling tables.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fueling {
    pub fuel_pump_pin: Option<u32>,
    pub cylinder_cc: Option<f32>,
    pub fuel_density: Option<f32>,
    pub fuel_stoich_ratio: Option<f32>,
    pub injections_per_cycle: Option<u32>,
    pub injector_cc: Option<f32>,
    pub max_duty_cycle: Option<f32>,
    pub crank_enrich: Option<CrankEnrichment>,
    pub pulse_width_compensation: Option<Table1d>,
    pub injector_dead_time: Option<Table1d>,
    pub engine_temp_enrichment: Option<Table2d>,
    pub commanded_lambda: Option<Table2d>,
    pub ve: Option<Table2d>,
    pub tipin_enrich_amount: Option<Table2d>,
    pub tipin_enrich_duration: Option<Table1d>,
}

impl Message for Fueling {
    const MAX_SIZE: usize = size::uint32(1)
        + size::fixed32(2)
        + size::fixed32(3)
        + size::fixed32(4)
        + size::uint32(5)
        + size::fixed32(6)
        + size::fixed32(7)
        + size::message(16, CrankEnrichment::MAX_SIZE)
        + size::message(17, Table1d::MAX_SIZE)
        + size::message(18, Table1d::MAX_SIZE)
        + size::message(19, Table2d::MAX_SIZE)
        + size::message(20, Table2d::MAX_SIZE)
        + size::message(21, Table2d::MAX_SIZE)
        + size::message(22, Table2d::MAX_SIZE)
        + size::message(23, Table1d::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<UInt32>(1, self.fuel_pump_pin)
            + scalar::optional_len::<Float>(2, self.cylinder_cc)
            + scalar::optional_len::<Float>(3, self.fuel_density)
            + scalar::optional_len::<Float>(4, self.fuel_stoich_ratio)
            + scalar::optional_len::<UInt32>(5, self.injections_per_cycle)
            + scalar::optional_len::<Float>(6, self.injector_cc)
            + scalar::optional_len::<Float>(7, self.max_duty_cycle)
            + message::optional_len(16, self.crank_enrich.as_ref())
            + message::optional_len(17, self.pulse_width_compensation.as_ref())
            + message::optional_len(18, self.injector_dead_time.as_ref())
            + message::optional_len(19, self.engine_temp_enrichment.as_ref())
            + message::optional_len(20, self.commanded_lambda.as_ref())
            + message::optional_len(21, self.ve.as_ref())
            + message::optional_len(22, self.tipin_enrich_amount.as_ref())
            + message::optional_len(23, self.tipin_enrich_duration.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<UInt32, W>(1, self.fuel_pump_pin, sink)?;
        scalar::encode_optional::<Float, W>(2, self.cylinder_cc, sink)?;
        scalar::encode_optional::<Float, W>(3, self.fuel_density, sink)?;
        scalar::encode_optional::<Float, W>(4, self.fuel_stoich_ratio, sink)?;
        scalar::encode_optional::<UInt32, W>(5, self.injections_per_cycle, sink)?;
        scalar::encode_optional::<Float, W>(6, self.injector_cc, sink)?;
        scalar::encode_optional::<Float, W>(7, self.max_duty_cycle, sink)?;
        message::encode_optional(16, self.crank_enrich.as_ref(), sink)?;
        message::encode_optional(17, self.pulse_width_compensation.as_ref(), sink)?;
        message::encode_optional(18, self.injector_dead_time.as_ref(), sink)?;
        message::encode_optional(19, self.engine_temp_enrichment.as_ref(), sink)?;
        message::encode_optional(20, self.commanded_lambda.as_ref(), sink)?;
        message::encode_optional(21, self.ve.as_ref(), sink)?;
        message::encode_optional(22, self.tipin_enrich_amount.as_ref(), sink)?;
        message::encode_optional(23, self.tipin_enrich_duration.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => {
                    self.fuel_pump_pin = Some(scalar::merge::<UInt32, R>(1, source)?);
                }
                (2, WireType::Fixed32) => {
                    self.cylinder_cc = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.fuel_density = Some(scalar::merge::<Float, R>(3, source)?);
                }
                (4, WireType::Fixed32) => {
                    self.fuel_stoich_ratio = Some(scalar::merge::<Float, R>(4, source)?);
                }
                (5, WireType::Varint) => {
                    self.injections_per_cycle = Some(scalar::merge::<UInt32, R>(5, source)?);
                }
                (6, WireType::Fixed32) => {
                    self.injector_cc = Some(scalar::merge::<Float, R>(6, source)?);
                }
                (7, WireType::Fixed32) => {
                    self.max_duty_cycle = Some(scalar::merge::<Float, R>(7, source)?);
                }
                (16, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.crank_enrich, source)?;
                }
                (17, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.pulse_width_compensation, source)?;
                }
                (18, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.injector_dead_time, source)?;
                }
                (19, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.engine_temp_enrichment, source)?;
                }
                (20, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.commanded_lambda, source)?;
                }
                (21, WireType::LengthDelimited) => message::merge_optional(&mut self.ve, source)?,
                (22, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.tipin_enrich_amount, source)?;
                }
                (23, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.tipin_enrich_duration, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Dwell strategy and timing tables.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ignition {
    pub dwell_type: Option<DwellType>,
    pub fixed_dwell: Option<f32>,
    pub fixed_duty: Option<f32>,
    pub dwell: Option<Table1d>,
    pub timing: Option<Table2d>,
}

impl Message for Ignition {
    const MAX_SIZE: usize = size::enumeration(1, DwellType::MAX_RAW)
        + size::fixed32(2)
        + size::fixed32(3)
        + size::message(4, Table1d::MAX_SIZE)
        + size::message(5, Table2d::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Enum<DwellType>>(1, self.dwell_type)
            + scalar::optional_len::<Float>(2, self.fixed_dwell)
            + scalar::optional_len::<Float>(3, self.fixed_duty)
            + message::optional_len(4, self.dwell.as_ref())
            + message::optional_len(5, self.timing.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Enum<DwellType>, W>(1, self.dwell_type, sink)?;
        scalar::encode_optional::<Float, W>(2, self.fixed_dwell, sink)?;
        scalar::encode_optional::<Float, W>(3, self.fixed_duty, sink)?;
        message::encode_optional(4, self.dwell.as_ref(), sink)?;
        message::encode_optional(5, self.timing.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => {
                    self.dwell_type = Some(scalar::merge::<Enum<DwellType>, R>(1, source)?);
                }
                (2, WireType::Fixed32) => {
                    self.fixed_dwell = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.fixed_duty = Some(scalar::merge::<Float, R>(3, source)?);
                }
                (4, WireType::LengthDelimited) => message::merge_optional(&mut self.dwell, source)?,
                (5, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.timing, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Boost solenoid control.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoostControl {
    pub pin: Option<u32>,
    pub control_threshold_map: Option<f32>,
    pub control_threshold_tps: Option<f32>,
    pub enable_threshold_map: Option<f32>,
    pub overboost_map: Option<f32>,
    pub pwm_vs_rpm: Option<Table1d>,
}

impl Message for BoostControl {
    const MAX_SIZE: usize = size::uint32(1)
        + size::fixed32(2)
        + size::fixed32(3)
        + size::fixed32(4)
        + size::fixed32(5)
        + size::message(6, Table1d::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<UInt32>(1, self.pin)
            + scalar::optional_len::<Float>(2, self.control_threshold_map)
            + scalar::optional_len::<Float>(3, self.control_threshold_tps)
            + scalar::optional_len::<Float>(4, self.enable_threshold_map)
            + scalar::optional_len::<Float>(5, self.overboost_map)
            + message::optional_len(6, self.pwm_vs_rpm.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<UInt32, W>(1, self.pin, sink)?;
        scalar::encode_optional::<Float, W>(2, self.control_threshold_map, sink)?;
        scalar::encode_optional::<Float, W>(3, self.control_threshold_tps, sink)?;
        scalar::encode_optional::<Float, W>(4, self.enable_threshold_map, sink)?;
        scalar::encode_optional::<Float, W>(5, self.overboost_map, sink)?;
        message::encode_optional(6, self.pwm_vs_rpm.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => self.pin = Some(scalar::merge::<UInt32, R>(1, source)?),
                (2, WireType::Fixed32) => {
                    self.control_threshold_map = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.control_threshold_tps = Some(scalar::merge::<Float, R>(3, source)?);
                }
                (4, WireType::Fixed32) => {
                    self.enable_threshold_map = Some(scalar::merge::<Float, R>(4, source)?);
                }
                (5, WireType::Fixed32) => {
                    self.overboost_map = Some(scalar::merge::<Float, R>(5, source)?);
                }
                (6, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.pwm_vs_rpm, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Check-engine light pin and lean-under-boost warning.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckEngineLight {
    pub pin: Option<u32>,
    pub lean_boost_ego: Option<f32>,
    pub lean_boost_map_enable: Option<f32>,
}

impl Message for CheckEngineLight {
    const MAX_SIZE: usize = size::uint32(1) + size::fixed32(2) + size::fixed32(3);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<UInt32>(1, self.pin)
            + scalar::optional_len::<Float>(2, self.lean_boost_ego)
            + scalar::optional_len::<Float>(3, self.lean_boost_map_enable)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<UInt32, W>(1, self.pin, sink)?;
        scalar::encode_optional::<Float, W>(2, self.lean_boost_ego, sink)?;
        scalar::encode_optional::<Float, W>(3, self.lean_boost_map_enable, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => self.pin = Some(scalar::merge::<UInt32, R>(1, source)?),
                (2, WireType::Fixed32) => {
                    self.lean_boost_ego = Some(scalar::merge::<Float, R>(2, source)?);
                }
                (3, WireType::Fixed32) => {
                    self.lean_boost_map_enable = Some(scalar::merge::<Float, R>(3, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Rev limiter hysteresis.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RpmCut {
    pub rpm_limit_start: Option<f32>,
    pub rpm_limit_stop: Option<f32>,
}

impl Message for RpmCut {
    const MAX_SIZE: usize = size::fixed32(1) + size::fixed32(2);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Float>(1, self.rpm_limit_start)
            + scalar::optional_len::<Float>(2, self.rpm_limit_stop)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Float, W>(1, self.rpm_limit_start, sink)?;
        scalar::encode_optional::<Float, W>(2, self.rpm_limit_stop, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => {
                    self.rpm_limit_start = Some(scalar::merge::<Float, R>(1, source)?);
                }
                (2, WireType::Fixed32) => {
                    self.rpm_limit_stop = Some(scalar::merge::<Float, R>(2, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Bench test options.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DebugOptions {
    pub test_trigger_enabled: Option<bool>,
    pub test_trigger_rpm: Option<f32>,
}

impl Message for DebugOptions {
    const MAX_SIZE: usize = size::boolean(1) + size::fixed32(2);

    fn encoded_len(&self) -> usize {
        scalar::optional_len::<Bool>(1, self.test_trigger_enabled)
            + scalar::optional_len::<Float>(2, self.test_trigger_rpm)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_optional::<Bool, W>(1, self.test_trigger_enabled, sink)?;
        scalar::encode_optional::<Float, W>(2, self.test_trigger_rpm, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Varint) => {
                    self.test_trigger_enabled = Some(scalar::merge::<Bool, R>(1, source)?);
                }
                (2, WireType::Fixed32) => {
                    self.test_trigger_rpm = Some(scalar::merge::<Float, R>(2, source)?);
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::table::{TableAxis, TableRow};
    use heapless::Vec;

    #[test]
    fn output_bytes() {
        let output = Output {
            pin: Some(3),
            output_type: Some(OutputType::Ignition),
            inverted: Some(false),
            angle: None,
        };
        assert_eq!(output.encode_to_vec(), vec![0x08, 0x03, 0x10, 0x02, 0x18, 0x00]);
    }

    #[test]
    fn fueling_two_byte_tags() {
        let fueling = Fueling {
            crank_enrich: Some(CrankEnrichment::default()),
            ..Fueling::default()
        };
        // field 16, length-delimited: tag varint 0x82 0x01.
        assert_eq!(fueling.encode_to_vec(), vec![0x82, 0x01, 0x00]);
        assert_eq!(Fueling::decode_from_slice(&[0x82, 0x01, 0x00]).unwrap(), fueling);
    }

    #[test]
    fn ignition_with_tables_roundtrip() {
        let mut timing = Table2d::default();
        timing
            .data
            .push(TableRow {
                values: Vec::from_slice(&[10.0, 12.5, 15.0]).unwrap(),
            })
            .unwrap();
        let ignition = Ignition {
            dwell_type: Some(DwellType::FixedTime),
            fixed_dwell: Some(3.0),
            dwell: Some(Table1d {
                cols: Some(TableAxis::default()),
                ..Table1d::default()
            }),
            timing: Some(timing),
            ..Ignition::default()
        };
        let bytes = ignition.encode_to_vec();
        assert_eq!(bytes.len(), ignition.encoded_len());
        assert_eq!(Ignition::decode_from_slice(&bytes).unwrap(), ignition);
    }

    #[test]
    fn trigger_input_rejects_unknown_edge() {
        assert!(TriggerInput::decode_from_slice(&[0x08, 0x07]).is_err());
    }

    #[test]
    fn max_sizes() {
        assert_eq!(Output::MAX_SIZE, 15);
        assert_eq!(Decoder::MAX_SIZE, 28);
        assert_eq!(TriggerInput::MAX_SIZE, 4);
        assert_eq!(CrankEnrichment::MAX_SIZE, 15);
        assert_eq!(Fueling::MAX_SIZE, 11551);
        assert_eq!(Ignition::MAX_SIZE, 2948);
        assert_eq!(BoostControl::MAX_SIZE, 281);
        assert_eq!(CheckEngineLight::MAX_SIZE, 16);
        assert_eq!(RpmCut::MAX_SIZE, 10);
        assert_eq!(DebugOptions::MAX_SIZE, 7);
    }
}
