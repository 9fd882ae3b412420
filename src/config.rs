//! Named values for the configuration fields

macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, u8> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }
    };
}

field_enum! {
    /// Power mode (PM) with its polling interval
    PowerMode {
        /// Always on
        Nom = 0,
        /// 5 ms polling
        Lpm1 = 1,
        /// 20 ms polling
        Lpm2 = 2,
        /// 100 ms polling
        Lpm3 = 3,
    }
}

field_enum! {
    /// Output hysteresis (HYST) in LSBs
    Hysteresis {
        Off = 0,
        Lsb1 = 1,
        Lsb2 = 2,
        Lsb3 = 3,
    }
}

field_enum! {
    /// Output stage (OUTS)
    OutputStage {
        /// Analog, full range from 0% to 100% between GND and VDD
        AnalogFull = 0,
        /// Analog, reduced range from 10% to 90% between GND and VDD
        AnalogReduced = 1,
        /// Digital PWM
        DigitalPwm = 2,
    }
}

field_enum! {
    /// PWM frequency (PWMF)
    PwmFrequency {
        Hz115 = 0,
        Hz230 = 1,
        Hz460 = 2,
        Hz920 = 3,
    }
}

field_enum! {
    /// Slow filter (SF) step response
    SlowFilter {
        X16 = 0,
        X8 = 1,
        X4 = 2,
        X2 = 3,
    }
}

field_enum! {
    /// Fast filter threshold (FTH)
    FastFilterThreshold {
        /// Slow filter only
        SlowOnly = 0,
        Lsb6 = 1,
        Lsb7 = 2,
        Lsb9 = 3,
        Lsb18 = 4,
        Lsb21 = 5,
        Lsb24 = 6,
        Lsb10 = 7,
    }
}
