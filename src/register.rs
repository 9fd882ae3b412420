//! Register addresses for AS5600 sensor.

/// Register addresses for AS5600
///
/// 16-bit registers are named by their high byte; the low byte lives at the
/// next address and is transferred second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
#[repr(u8)]
pub enum Register {
    /// Number of times ZPOS and MPOS have been burned (2 bits used)
    Zmco = 0x00,
    /// Zero position (12-bit)
    ZPos = 0x01,
    /// Maximum position (12-bit)
    MPos = 0x03,
    /// Maximum angle (12-bit)
    MAng = 0x05,
    /// Configuration, high byte: watchdog, fast filter threshold, slow filter
    ConfHigh = 0x07,
    /// Configuration, low byte: PWM frequency, output stage, hysteresis, power mode
    ConfLow = 0x08,

    /// Magnet status
    Status = 0x0B,
    /// Unscaled and unmodified angle (12-bit)
    RawAngle = 0x0C,
    /// Scaled output angle (12-bit)
    Angle = 0x0E,
    /// Automatic gain control
    Agc = 0x1A,
    /// CORDIC magnitude (12-bit)
    Magnitude = 0x1B,

    /// Burn command, write only
    Burn = 0xFF,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// Commands accepted by the [`Register::Burn`] register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BurnCommand {
    /// Commit ZPOS and MPOS to non-volatile memory
    Angle = 0x80,
    /// Commit MANG and CONF to non-volatile memory
    Settings = 0x40,
}

impl From<BurnCommand> for u8 {
    fn from(cmd: BurnCommand) -> u8 {
        cmd as u8
    }
}

bitfield::bitfield! {
    /// CONF
    ///
    /// Both configuration bytes read as one big-endian word. Bits 15:14 are
    /// reserved and read back as zero.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ConfigurationRegister(u16);
    impl Debug;
    u8;
    /// Watchdog
    ///
    /// - `0` = off
    /// - `1` = on, enters LPM3 after one minute of less than 4 LSB movement
    pub watchdog, _: 13;
    /// Fast filter threshold (see [`FastFilterThreshold`](crate::FastFilterThreshold))
    pub fast_filter_threshold, _: 12, 10;
    /// Slow filter step response (see [`SlowFilter`](crate::SlowFilter))
    pub slow_filter, _: 9, 8;
    /// PWM frequency (see [`PwmFrequency`](crate::PwmFrequency))
    pub pwm_frequency, _: 7, 6;
    /// Output stage (see [`OutputStage`](crate::OutputStage))
    pub output_stage, _: 5, 4;
    /// Hysteresis (see [`Hysteresis`](crate::Hysteresis))
    pub hysteresis, _: 3, 2;
    /// Power mode (see [`PowerMode`](crate::PowerMode))
    pub power_mode, _: 1, 0;
}

impl ConfigurationRegister {
    /// Raw register value
    #[must_use]
    pub const fn raw(&self) -> u16 {
        self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigurationRegister {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ConfigurationRegister(0x{:04X})", self.0);
    }
}
