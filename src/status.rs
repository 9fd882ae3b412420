//! Magnet status for AS5600

const MAGNET_TOO_STRONG: u8 = 0b0000_1000;
const MAGNET_TOO_WEAK: u8 = 0b0001_0000;
const MAGNET_DETECTED: u8 = 0b0010_0000;

/// Bits of the `STATUS` register (0x0B) carrying information
pub const STATUS_MASK: u8 = MAGNET_TOO_STRONG | MAGNET_TOO_WEAK | MAGNET_DETECTED;

/// Magnet status flags from the `STATUS` register (0x0B)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    raw: u8,
}

impl Status {
    /// Create a status snapshot from the raw register value
    ///
    /// Only bits 5:3 are kept.
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self {
            raw: raw & STATUS_MASK,
        }
    }

    /// Get the masked register value
    #[must_use]
    pub const fn raw(&self) -> u8 {
        self.raw
    }

    /// MH: AGC minimum gain overflow, magnet too strong
    #[must_use]
    pub const fn magnet_too_strong(&self) -> bool {
        self.raw & MAGNET_TOO_STRONG != 0
    }

    /// ML: AGC maximum gain overflow, magnet too weak
    #[must_use]
    pub const fn magnet_too_weak(&self) -> bool {
        self.raw & MAGNET_TOO_WEAK != 0
    }

    /// MD: magnet was detected
    #[must_use]
    pub const fn magnet_detected(&self) -> bool {
        self.raw & MAGNET_DETECTED != 0
    }

    /// Check if a magnet is present and its field is within the AGC range
    #[must_use]
    pub const fn magnetic_field_ok(&self) -> bool {
        self.magnet_detected() && !self.magnet_too_strong() && !self.magnet_too_weak()
    }
}

impl From<u8> for Status {
    fn from(raw: u8) -> Self {
        Self::new(raw)
    }
}
