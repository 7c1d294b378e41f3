//! Enums carried in varint fields.
//!
//! Every schema enum maps wire numbers through [`wire::Enumeration`]; numbers
//! the schema does not define are rejected on decode.

use wire::Enumeration;

macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(#[$first_meta:meta])* $first:ident = $first_value:literal,
            $($(#[$variant_meta:meta])* $variant:ident = $value:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[repr(u32)]
        pub enum $name {
            $(#[$first_meta])* $first = $first_value,
            $($(#[$variant_meta])* $variant = $value,)*
        }

        impl $name {
            /// Largest wire number.
            pub const MAX_RAW: u32 = {
                let values = [$first_value $(, $value)*];
                let mut max = 0;
                let mut i = 0;
                while i < values.len() {
                    if values[i] > max {
                        max = values[i];
                    }
                    i += 1;
                }
                max
            };
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl Enumeration for $name {
            fn from_raw(value: u32) -> Option<Self> {
                match value {
                    $first_value => Some(Self::$first),
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn raw(self) -> u32 {
                self as u32
            }
        }
    };
}

enumeration! {
    /// Health of a sensor reading.
    SensorFault {
        NoFault = 0,
        RangeFault = 1,
        ConnectionFault = 2,
    }
}

enumeration! {
    /// Why the crank decoder lost sync.
    DecoderLossReason {
        NoLoss = 0,
        TriggerToothVariation = 1,
        TriggerCountHigh = 2,
        TriggerCountLow = 3,
        Expired = 4,
        Overflowed = 5,
    }
}

enumeration! {
    /// Hardware a sensor is read from.
    SensorSource {
        None = 0,
        Adc = 1,
        Freq = 2,
        PulseWidth = 3,
        Const = 4,
    }
}

enumeration! {
    /// Conversion from raw input to a physical value.
    SensorMethod {
        Linear = 0,
        LinearWindowed = 1,
        Thermistor = 2,
    }
}

enumeration! {
    /// Crank/cam trigger wheel layout.
    TriggerType {
        Disabled = 0,
        EvenTeeth = 1,
        EvenTeethPlusCamsync = 2,
        MissingTooth = 3,
        MissingToothPlusCamsync = 4,
    }
}

enumeration! {
    /// Edge a trigger input captures on.
    InputEdge {
        Rising = 0,
        Falling = 1,
        Both = 2,
    }
}

enumeration! {
    /// Role of a trigger input.
    InputType {
        Disabled = 0,
        Trigger = 1,
        Sync = 2,
        Freq = 3,
    }
}

enumeration! {
    /// Role of an output channel.
    OutputType {
        Disabled = 0,
        Fuel = 1,
        Ignition = 2,
    }
}

enumeration! {
    /// How coil dwell is computed.
    DwellType {
        FixedDuty = 0,
        FixedTime = 1,
        Brv = 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        for raw in 0..=DecoderLossReason::MAX_RAW {
            let value = DecoderLossReason::from_raw(raw).unwrap();
            assert_eq!(value.raw(), raw);
        }
    }

    #[test]
    fn unknown_numbers_rejected() {
        assert_eq!(SensorFault::from_raw(3), None);
        assert_eq!(TriggerType::from_raw(5), None);
        assert_eq!(DwellType::from_raw(u32::MAX), None);
    }

    #[test]
    fn defaults_are_zero() {
        assert_eq!(SensorSource::default(), SensorSource::None);
        assert_eq!(InputEdge::default().raw(), 0);
        assert_eq!(OutputType::default(), OutputType::Disabled);
    }

    #[test]
    fn max_raw_fits_one_varint_byte() {
        for max in [
            SensorFault::MAX_RAW,
            DecoderLossReason::MAX_RAW,
            SensorSource::MAX_RAW,
            SensorMethod::MAX_RAW,
            TriggerType::MAX_RAW,
            InputEdge::MAX_RAW,
            InputType::MAX_RAW,
            OutputType::MAX_RAW,
            DwellType::MAX_RAW,
        ] {
            assert!(max < 0x80);
        }
        assert_eq!(DecoderLossReason::MAX_RAW, 5);
        assert_eq!(InputType::MAX_RAW, 3);
    }
}
