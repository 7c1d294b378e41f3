//! Live engine telemetry: periodic updates and discrete events.
//!
//! Scalars here use implicit presence: a zero value is not sent and decodes
//! back to zero.

use stream::{Sink, Source};
use wire::field::scalar::{self, Bool, Enum, Fixed32, Float, UInt32};
use wire::field::{self, message};
use wire::{read_tag, size, DecodeResult, Message, WireType};

use crate::enums::{DecoderLossReason, SensorFault};

/// Sequence number and timestamp stamped on outgoing messages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub seq: u32,
    pub timestamp: u32,
}

impl Message for Header {
    const MAX_SIZE: usize = size::fixed32(1) + size::fixed32(2);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Fixed32>(1, self.seq)
            + scalar::implicit_len::<Fixed32>(2, self.timestamp)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Fixed32, W>(1, self.seq, sink)?;
        scalar::encode_implicit::<Fixed32, W>(2, self.timestamp, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => self.seq = scalar::merge::<Fixed32, R>(1, source)?,
                (2, WireType::Fixed32) => {
                    self.timestamp = scalar::merge::<Fixed32, R>(2, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Processed sensor readings with their fault state and rate of change.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sensors {
    pub map: f32,
    pub iat: f32,
    pub clt: f32,
    pub brv: f32,
    pub tps: f32,
    pub aap: f32,
    pub frt: f32,
    pub ego: f32,
    pub frp: f32,
    pub eth: f32,
    pub knock1: f32,
    pub knock2: f32,
    pub map_fault: SensorFault,
    pub iat_fault: SensorFault,
    pub clt_fault: SensorFault,
    pub brv_fault: SensorFault,
    pub tps_fault: SensorFault,
    pub aap_fault: SensorFault,
    pub frt_fault: SensorFault,
    pub ego_fault: SensorFault,
    pub frp_fault: SensorFault,
    pub eth_fault: SensorFault,
    pub map_rate: f32,
    pub iat_rate: f32,
    pub clt_rate: f32,
    pub brv_rate: f32,
    pub tps_rate: f32,
    pub aap_rate: f32,
    pub frt_rate: f32,
    pub ego_rate: f32,
    pub frp_rate: f32,
    pub eth_rate: f32,
}

impl Sensors {
    /// Readings in field order 1..=10, 14, 15.
    const fn values(&self) -> [(u32, f32); 12] {
        [
            (1, self.map),
            (2, self.iat),
            (3, self.clt),
            (4, self.brv),
            (5, self.tps),
            (6, self.aap),
            (7, self.frt),
            (8, self.ego),
            (9, self.frp),
            (10, self.eth),
            (14, self.knock1),
            (15, self.knock2),
        ]
    }

    /// Faults in field order 32..=41.
    const fn faults(&self) -> [(u32, SensorFault); 10] {
        [
            (32, self.map_fault),
            (33, self.iat_fault),
            (34, self.clt_fault),
            (35, self.brv_fault),
            (36, self.tps_fault),
            (37, self.aap_fault),
            (38, self.frt_fault),
            (39, self.ego_fault),
            (40, self.frp_fault),
            (41, self.eth_fault),
        ]
    }

    /// Rates in field order 64..=73.
    const fn rates(&self) -> [(u32, f32); 10] {
        [
            (64, self.map_rate),
            (65, self.iat_rate),
            (66, self.clt_rate),
            (67, self.brv_rate),
            (68, self.tps_rate),
            (69, self.aap_rate),
            (70, self.frt_rate),
            (71, self.ego_rate),
            (72, self.frp_rate),
            (73, self.eth_rate),
        ]
    }

    fn float_mut(&mut self, field: u32) -> Option<&mut f32> {
        Some(match field {
            1 => &mut self.map,
            2 => &mut self.iat,
            3 => &mut self.clt,
            4 => &mut self.brv,
            5 => &mut self.tps,
            6 => &mut self.aap,
            7 => &mut self.frt,
            8 => &mut self.ego,
            9 => &mut self.frp,
            10 => &mut self.eth,
            14 => &mut self.knock1,
            15 => &mut self.knock2,
            64 => &mut self.map_rate,
            65 => &mut self.iat_rate,
            66 => &mut self.clt_rate,
            67 => &mut self.brv_rate,
            68 => &mut self.tps_rate,
            69 => &mut self.aap_rate,
            70 => &mut self.frt_rate,
            71 => &mut self.ego_rate,
            72 => &mut self.frp_rate,
            73 => &mut self.eth_rate,
            _ => return None,
        })
    }

    fn fault_mut(&mut self, field: u32) -> Option<&mut SensorFault> {
        Some(match field {
            32 => &mut self.map_fault,
            33 => &mut self.iat_fault,
            34 => &mut self.clt_fault,
            35 => &mut self.brv_fault,
            36 => &mut self.tps_fault,
            37 => &mut self.aap_fault,
            38 => &mut self.frt_fault,
            39 => &mut self.ego_fault,
            40 => &mut self.frp_fault,
            41 => &mut self.eth_fault,
            _ => return None,
        })
    }
}

impl Message for Sensors {
    const MAX_SIZE: usize = {
        let mut total = 0;
        let mut field = 1;
        while field <= 10 {
            total += size::fixed32(field);
            field += 1;
        }
        total += size::fixed32(14) + size::fixed32(15);
        let mut field = 32;
        while field <= 41 {
            total += size::enumeration(field, SensorFault::MAX_RAW);
            field += 1;
        }
        let mut field = 64;
        while field <= 73 {
            total += size::fixed32(field);
            field += 1;
        }
        total
    };

    fn encoded_len(&self) -> usize {
        let values: usize = self
            .values()
            .into_iter()
            .chain(self.rates())
            .map(|(field, value)| scalar::implicit_len::<Float>(field, value))
            .sum();
        let faults: usize = self
            .faults()
            .into_iter()
            .map(|(field, value)| scalar::implicit_len::<Enum<SensorFault>>(field, value))
            .sum();
        values + faults
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        for (field, value) in self.values() {
            scalar::encode_implicit::<Float, W>(field, value, sink)?;
        }
        for (field, value) in self.faults() {
            scalar::encode_implicit::<Enum<SensorFault>, W>(field, value, sink)?;
        }
        for (field, value) in self.rates() {
            scalar::encode_implicit::<Float, W>(field, value, sink)?;
        }
        Ok(())
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            let number = tag.field();
            match tag.wire_type() {
                WireType::Fixed32 if self.float_mut(number).is_some() => {
                    let value = scalar::merge::<Float, R>(number, source)?;
                    if let Some(slot) = self.float_mut(number) {
                        *slot = value;
                    }
                }
                WireType::Varint if self.fault_mut(number).is_some() => {
                    let value = scalar::merge::<Enum<SensorFault>, R>(number, source)?;
                    if let Some(slot) = self.fault_mut(number) {
                        *slot = value;
                    }
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Crank decoder state.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub time: u32,
    pub valid_before_timestamp: u32,
    pub has_position: bool,
    pub synced: bool,
    pub loss_cause: DecoderLossReason,
    pub last_angle: f32,
    pub instantaneous_rpm: f32,
    pub average_rpm: f32,
}

impl Message for Position {
    const MAX_SIZE: usize = size::fixed32(1)
        + size::fixed32(2)
        + size::boolean(3)
        + size::boolean(4)
        + size::enumeration(5, DecoderLossReason::MAX_RAW)
        + size::fixed32(6)
        + size::fixed32(7)
        + size::fixed32(8);

    fn encoded_len(&self) -> usize {
        scalar::implicit_len::<Fixed32>(1, self.time)
            + scalar::implicit_len::<Fixed32>(2, self.valid_before_timestamp)
            + scalar::implicit_len::<Bool>(3, self.has_position)
            + scalar::implicit_len::<Bool>(4, self.synced)
            + scalar::implicit_len::<Enum<DecoderLossReason>>(5, self.loss_cause)
            + scalar::implicit_len::<Float>(6, self.last_angle)
            + scalar::implicit_len::<Float>(7, self.instantaneous_rpm)
            + scalar::implicit_len::<Float>(8, self.average_rpm)
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        scalar::encode_implicit::<Fixed32, W>(1, self.time, sink)?;
        scalar::encode_implicit::<Fixed32, W>(2, self.valid_before_timestamp, sink)?;
        scalar::encode_implicit::<Bool, W>(3, self.has_position, sink)?;
        scalar::encode_implicit::<Bool, W>(4, self.synced, sink)?;
        scalar::encode_implicit::<Enum<DecoderLossReason>, W>(5, self.loss_cause, sink)?;
        scalar::encode_implicit::<Float, W>(6, self.last_angle, sink)?;
        scalar::encode_implicit::<Float, W>(7, self.instantaneous_rpm, sink)?;
        scalar::encode_implicit::<Float, W>(8, self.average_rpm, sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::Fixed32) => self.time = scalar::merge::<Fixed32, R>(1, source)?,
                (2, WireType::Fixed32) => {
                    self.valid_before_timestamp = scalar::merge::<Fixed32, R>(2, source)?;
                }
                (3, WireType::Varint) => self.has_position = scalar::merge::<Bool, R>(3, source)?,
                (4, WireType::Varint) => self.synced = scalar::merge::<Bool, R>(4, source)?,
                (5, WireType::Varint) => {
                    self.loss_cause = scalar::merge::<Enum<DecoderLossReason>, R>(5, source)?;
                }
                (6, WireType::Fixed32) => self.last_angle = scalar::merge::<Float, R>(6, source)?,
                (7, WireType::Fixed32) => {
                    self.instantaneous_rpm = scalar::merge::<Float, R>(7, source)?;
                }
                (8, WireType::Fixed32) => self.average_rpm = scalar::merge::<Float, R>(8, source)?,
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Per-cycle fuel and spark calculations plus active cuts.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Calculations {
    pub advance: f32,
    pub dwell_us: f32,
    pub fuel_us: f32,
    pub airmass_per_cycle: f32,
    pub fuelvol_per_cycle: f32,
    pub tipin_percent: f32,
    pub injector_dead_time: f32,
    pub pulse_width_correction: f32,
    pub lambda: f32,
    pub ve: f32,
    pub engine_temp_enrichment: f32,
    pub rpm_limit_cut: bool,
    pub boost_cut: bool,
    pub fuel_overduty_cut: bool,
    pub dwell_overduty_cut: bool,
}

impl Calculations {
    const fn floats(&self) -> [(u32, f32); 11] {
        [
            (1, self.advance),
            (2, self.dwell_us),
            (3, self.fuel_us),
            (4, self.airmass_per_cycle),
            (5, self.fuelvol_per_cycle),
            (6, self.tipin_percent),
            (7, self.injector_dead_time),
            (8, self.pulse_width_correction),
            (9, self.lambda),
            (10, self.ve),
            (11, self.engine_temp_enrichment),
        ]
    }

    const fn cuts(&self) -> [(u32, bool); 4] {
        [
            (12, self.rpm_limit_cut),
            (13, self.boost_cut),
            (14, self.fuel_overduty_cut),
            (15, self.dwell_overduty_cut),
        ]
    }

    fn float_mut(&mut self, field: u32) -> Option<&mut f32> {
        Some(match field {
            1 => &mut self.advance,
            2 => &mut self.dwell_us,
            3 => &mut self.fuel_us,
            4 => &mut self.airmass_per_cycle,
            5 => &mut self.fuelvol_per_cycle,
            6 => &mut self.tipin_percent,
            7 => &mut self.injector_dead_time,
            8 => &mut self.pulse_width_correction,
            9 => &mut self.lambda,
            10 => &mut self.ve,
            11 => &mut self.engine_temp_enrichment,
            _ => return None,
        })
    }

    fn cut_mut(&mut self, field: u32) -> Option<&mut bool> {
        Some(match field {
            12 => &mut self.rpm_limit_cut,
            13 => &mut self.boost_cut,
            14 => &mut self.fuel_overduty_cut,
            15 => &mut self.dwell_overduty_cut,
            _ => return None,
        })
    }
}

impl Message for Calculations {
    const MAX_SIZE: usize = 11 * size::fixed32(1) + 4 * size::boolean(12);

    fn encoded_len(&self) -> usize {
        let floats: usize = self
            .floats()
            .into_iter()
            .map(|(field, value)| scalar::implicit_len::<Float>(field, value))
            .sum();
        let cuts: usize = self
            .cuts()
            .into_iter()
            .map(|(field, value)| scalar::implicit_len::<Bool>(field, value))
            .sum();
        floats + cuts
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        for (field, value) in self.floats() {
            scalar::encode_implicit::<Float, W>(field, value, sink)?;
        }
        for (field, value) in self.cuts() {
            scalar::encode_implicit::<Bool, W>(field, value, sink)?;
        }
        Ok(())
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            let number = tag.field();
            match tag.wire_type() {
                WireType::Fixed32 if self.float_mut(number).is_some() => {
                    let value = scalar::merge::<Float, R>(number, source)?;
                    if let Some(slot) = self.float_mut(number) {
                        *slot = value;
                    }
                }
                WireType::Varint if self.cut_mut(number).is_some() => {
                    let value = scalar::merge::<Bool, R>(number, source)?;
                    if let Some(slot) = self.cut_mut(number) {
                        *slot = value;
                    }
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// What an [`Event`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EventKind {
    /// Trigger input index that fired.
    Trigger(u32),
    /// New output pin bitmask.
    OutputPins(u32),
    /// New GPIO pin bitmask.
    GpioPins(u32),
}

/// A discrete engine event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Event {
    pub header: Option<Header>,
    pub kind: Option<EventKind>,
}

impl Message for Event {
    const MAX_SIZE: usize = size::message(1, Header::MAX_SIZE)
        + size::oneof(&[size::uint32(2), size::uint32(3), size::uint32(4)]);

    fn encoded_len(&self) -> usize {
        let kind = match self.kind {
            Some(EventKind::Trigger(value)) => scalar::encoded_len::<UInt32>(2, value),
            Some(EventKind::OutputPins(value)) => scalar::encoded_len::<UInt32>(3, value),
            Some(EventKind::GpioPins(value)) => scalar::encoded_len::<UInt32>(4, value),
            None => 0,
        };
        message::optional_len(1, self.header.as_ref()) + kind
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        message::encode_optional(1, self.header.as_ref(), sink)?;
        match self.kind {
            Some(EventKind::Trigger(value)) => scalar::encode::<UInt32, W>(2, value, sink),
            Some(EventKind::OutputPins(value)) => scalar::encode::<UInt32, W>(3, value, sink),
            Some(EventKind::GpioPins(value)) => scalar::encode::<UInt32, W>(4, value, sink),
            None => Ok(()),
        }
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => message::merge_optional(&mut self.header, source)?,
                (2, WireType::Varint) => {
                    self.kind = Some(EventKind::Trigger(scalar::merge::<UInt32, R>(2, source)?));
                }
                (3, WireType::Varint) => {
                    self.kind = Some(EventKind::OutputPins(scalar::merge::<UInt32, R>(3, source)?));
                }
                (4, WireType::Varint) => {
                    self.kind = Some(EventKind::GpioPins(scalar::merge::<UInt32, R>(4, source)?));
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}

/// Periodic snapshot of engine state.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineUpdate {
    pub header: Option<Header>,
    pub position: Option<Position>,
    pub sensors: Option<Sensors>,
    pub calculations: Option<Calculations>,
}

impl Message for EngineUpdate {
    const MAX_SIZE: usize = size::message(1, Header::MAX_SIZE)
        + size::message(2, Position::MAX_SIZE)
        + size::message(3, Sensors::MAX_SIZE)
        + size::message(4, Calculations::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        message::optional_len(1, self.header.as_ref())
            + message::optional_len(2, self.position.as_ref())
            + message::optional_len(3, self.sensors.as_ref())
            + message::optional_len(4, self.calculations.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        message::encode_optional(1, self.header.as_ref(), sink)?;
        message::encode_optional(2, self.position.as_ref(), sink)?;
        message::encode_optional(3, self.sensors.as_ref(), sink)?;
        message::encode_optional(4, self.calculations.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            match (tag.field(), tag.wire_type()) {
                (1, WireType::LengthDelimited) => message::merge_optional(&mut self.header, source)?,
                (2, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.position, source)?;
                }
                (3, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.sensors, source)?;
                }
                (4, WireType::LengthDelimited) => {
                    message::merge_optional(&mut self.calculations, source)?;
                }
                _ => field::unknown(tag),
            }
        }
        Ok(())
    }
}
