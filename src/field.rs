//! Bit-field descriptors for the packed configuration registers

use crate::register::Register;

/// A sub-byte field inside one 8-bit register
///
/// Fields that share a register never overlap, so a read-modify-write of one
/// field leaves every sibling untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Register holding the field
    pub register: Register,
    /// Right-aligned width mask, e.g. `0b11` for a 2-bit field
    pub width_mask: u8,
    /// Position of the field's least significant bit
    pub offset: u8,
    /// Largest value the field accepts
    pub max: u8,
    /// Human readable name used in range errors
    pub name: &'static str,
}

impl Field {
    const fn new(
        register: Register,
        width_mask: u8,
        offset: u8,
        max: u8,
        name: &'static str,
    ) -> Self {
        Self {
            register,
            width_mask,
            offset,
            max,
            name,
        }
    }

    /// Field mask in register position
    #[must_use]
    pub const fn mask(&self) -> u8 {
        self.width_mask << self.offset
    }

    /// Extract the field from a whole register value
    #[must_use]
    pub const fn extract(&self, raw: u8) -> u8 {
        (raw & self.mask()) >> self.offset
    }

    /// Replace the field inside `raw` with `value`, keeping all other bits
    #[must_use]
    pub const fn insert(&self, raw: u8, value: u8) -> u8 {
        (raw & !self.mask()) | ((value << self.offset) & self.mask())
    }
}

/// PM: power mode, CONF low bits 1:0
pub const POWER_MODE: Field = Field::new(Register::ConfLow, 0b11, 0, 3, "power mode");
/// HYST: hysteresis, CONF low bits 3:2
pub const HYSTERESIS: Field = Field::new(Register::ConfLow, 0b11, 2, 3, "hysteresis");
/// OUTS: output stage, CONF low bits 5:4 (value 3 is reserved)
pub const OUTPUT_STAGE: Field = Field::new(Register::ConfLow, 0b11, 4, 2, "output stage");
/// PWMF: PWM frequency, CONF low bits 7:6
pub const PWM_FREQUENCY: Field = Field::new(Register::ConfLow, 0b11, 6, 3, "PWM frequency");
/// SF: slow filter, CONF high bits 1:0
pub const SLOW_FILTER: Field = Field::new(Register::ConfHigh, 0b11, 0, 3, "slow filter");
/// FTH: fast filter threshold, CONF high bits 4:2
pub const FAST_FILTER_THRESHOLD: Field =
    Field::new(Register::ConfHigh, 0b111, 2, 7, "fast filter threshold");
/// WD: watchdog, CONF high bit 5
pub const WATCHDOG: Field = Field::new(Register::ConfHigh, 0b1, 5, 1, "watchdog");

/// Every configuration field, grouped by register
pub const ALL: [Field; 7] = [
    POWER_MODE,
    HYSTERESIS,
    OUTPUT_STAGE,
    PWM_FREQUENCY,
    SLOW_FILTER,
    FAST_FILTER_THRESHOLD,
    WATCHDOG,
];
