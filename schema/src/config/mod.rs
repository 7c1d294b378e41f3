//! The ECU configuration tree.
//!
//! Configuration messages use explicit presence throughout: every scalar is
//! an `Option` and is sent whenever it is `Some`, zero included. A host can
//! therefore send a partial configuration and have only the listed settings
//! applied.

mod engine;
mod sensor;
mod table;

pub use engine::{
    BoostControl, CheckEngineLight, CrankEnrichment, DebugOptions, Decoder, Fueling, Ignition,
    Output, RpmCut, TriggerInput,
};
pub use sensor::{
    ConstConfig, FaultConfig, KnockSensor, LinearConfig, Sensor, SensorInputs, ThermistorConfig,
    WindowConfig,
};
pub use table::{Table1d, Table2d, TableAxis, TableName, TableRow};

use heapless::Vec;
use stream::{Sink, Source};
use wire::field::{self, message, repeated};
use wire::{read_tag, size, DecodeResult, Message, WireType};

use crate::limits::{OUTPUTS, TRIGGERS};

/// Complete ECU configuration.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Configuration {
    pub outputs: Vec<Output, OUTPUTS>,
    pub triggers: Vec<TriggerInput, TRIGGERS>,
    pub sensors: Option<SensorInputs>,
    pub ignition: Option<Ignition>,
    pub fueling: Option<Fueling>,
    pub decoder: Option<Decoder>,
    pub rpm_cut: Option<RpmCut>,
    pub cel: Option<CheckEngineLight>,
    pub boost_control: Option<BoostControl>,
    pub debug: Option<DebugOptions>,
}

impl Message for Configuration {
    const MAX_SIZE: usize = size::repeated_message(1, OUTPUTS, Output::MAX_SIZE)
        + size::repeated_message(2, TRIGGERS, TriggerInput::MAX_SIZE)
        + size::message(3, SensorInputs::MAX_SIZE)
        + size::message(4, Ignition::MAX_SIZE)
        + size::message(5, Fueling::MAX_SIZE)
        + size::message(6, Decoder::MAX_SIZE)
        + size::message(7, RpmCut::MAX_SIZE)
        + size::message(8, CheckEngineLight::MAX_SIZE)
        + size::message(9, BoostControl::MAX_SIZE)
        + size::message(10, DebugOptions::MAX_SIZE);

    fn encoded_len(&self) -> usize {
        repeated::messages_len(1, &self.outputs)
            + repeated::messages_len(2, &self.triggers)
            + message::optional_len(3, self.sensors.as_ref())
            + message::optional_len(4, self.ignition.as_ref())
            + message::optional_len(5, self.fueling.as_ref())
            + message::optional_len(6, self.decoder.as_ref())
            + message::optional_len(7, self.rpm_cut.as_ref())
            + message::optional_len(8, self.cel.as_ref())
            + message::optional_len(9, self.boost_control.as_ref())
            + message::optional_len(10, self.debug.as_ref())
    }

    fn encode<W: Sink + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        repeated::encode_messages(1, &self.outputs, sink)?;
        repeated::encode_messages(2, &self.triggers, sink)?;
        message::encode_optional(3, self.sensors.as_ref(), sink)?;
        message::encode_optional(4, self.ignition.as_ref(), sink)?;
        message::encode_optional(5, self.fueling.as_ref(), sink)?;
        message::encode_optional(6, self.decoder.as_ref(), sink)?;
        message::encode_optional(7, self.rpm_cut.as_ref(), sink)?;
        message::encode_optional(8, self.cel.as_ref(), sink)?;
        message::encode_optional(9, self.boost_control.as_ref(), sink)?;
        message::encode_optional(10, self.debug.as_ref(), sink)
    }

    fn merge<R: Source + ?Sized>(&mut self, source: &mut R) -> DecodeResult<()> {
        while let Some(tag) = read_tag(source) {
            if tag.wire_type() != WireType::LengthDelimited {
                field::unknown(tag);
                continue;
            }
            match tag.field() {
                1 => repeated::merge_message(&mut self.outputs, 1, source)?,
                2 => repeated::merge_message(&mut self.triggers, 2, source)?,
                3 => message::merge_optional(&mut self.sensors, source)?,
                4 => message::merge_optional(&mut self.ignition, source)?,
                5 => message::merge_optional(&mut self.fueling, source)?,
                6 => message::merge_optional(&mut self.decoder, source)?,
                7 => message::merge_optional(&mut self.rpm_cut, source)?,
                8 => message::merge_optional(&mut self.cel, source)?,
                9 => message::merge_optional(&mut self.boost_control, source)?,
                10 => message::merge_optional(&mut self.debug, source)?,
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

    fn output(pin: u32) -> Output {
        Output {
            pin: Some(pin),
            ..Output::default()
        }
    }

    #[test]
    fn outputs_fill_to_capacity() {
        let mut config = Configuration::default();
        for pin in 0..OUTPUTS as u32 {
            config.outputs.push(output(pin)).unwrap();
        }
        let bytes = config.encode_to_vec();
        assert_eq!(Configuration::decode_from_slice(&bytes).unwrap(), config);
    }

    #[test]
    fn trigger_overflow_rejected() {
        let mut bytes = Vec::<u8, 32>::new();
        for _ in 0..=TRIGGERS {
            bytes.extend_from_slice(&[0x12, 0x02, 0x08, 0x01]).unwrap();
        }
        let mut config = Configuration::default();
        let err = config
            .merge(&mut stream::SliceReader::new(&bytes))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::CapacityExceeded {
                field: 2,
                capacity: TRIGGERS
            }
        );
        assert_eq!(config.triggers.len(), TRIGGERS);
    }

    #[test]
    fn present_empty_sections() {
        let config = Configuration {
            rpm_cut: Some(RpmCut::default()),
            debug: Some(DebugOptions::default()),
            ..Configuration::default()
        };
        assert_eq!(config.encode_to_vec(), vec![0x3A, 0x00, 0x52, 0x00]);
        assert_eq!(
            Configuration::decode_from_slice(&[0x3A, 0x00, 0x52, 0x00]).unwrap(),
            config
        );
    }

    #[test]
    fn max_size() {
        assert_eq!(Configuration::MAX_SIZE, 16205);
    }
}
