use core::fmt;

/// Error type for AS5600 operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the sensor
    Communication(E),
    /// A setter was given a value outside its accepted range; nothing was sent
    OutOfRange {
        /// Name of the rejected quantity
        quantity: &'static str,
        /// Rejected value
        value: u16,
        /// Smallest accepted value
        min: u16,
        /// Largest accepted value
        max: u16,
    },
}

impl<E> Error<E> {
    /// Check `value` against `0..=max` before anything touches the bus
    pub(crate) fn check_range(quantity: &'static str, value: u16, max: u16) -> Result<(), Self> {
        if value > max {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejected {} = {}, accepted 0..={}", quantity, value, max);
            return Err(Error::OutOfRange {
                quantity,
                value,
                min: 0,
                max,
            });
        }
        Ok(())
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Communication(e) => write!(f, "I2C communication error: {e:?}"),
            Error::OutOfRange {
                quantity,
                value,
                min,
                max,
            } => write!(f, "{quantity} must be between {min} and {max}, got {value}"),
        }
    }
}
