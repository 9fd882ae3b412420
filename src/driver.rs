//! Blocking driver for AS5600 magnetic position sensor

use embedded_hal::i2c::I2c;

use crate::{
    error::Error,
    field::{self, Field},
    register::{BurnCommand, ConfigurationRegister, Register},
    status::Status,
};

/// Default 7-bit I2C address of the AS5600
pub const DEFAULT_ADDRESS: u8 = 0x36;

/// Number of angle steps per revolution (12-bit: 0-4095, representing 0-360°)
pub const ANGLE_MAX: u16 = 0x0FFF + 1;

/// Largest value of the 12-bit position and angle registers
pub const POSITION_MAX: u16 = 0x0FFF;

/// AS5600 driver instance (blocking)
///
/// The handle only binds a bus to an address. Every getter issues a fresh
/// bus transaction; nothing read from the sensor is cached.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct As5600<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> As5600<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new AS5600 driver instance at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a new AS5600 driver instance at a custom 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit address this driver talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the I2C bus, consuming the driver
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read an 8-bit register
    ///
    /// Writes the register address, then reads one byte back in the same
    /// bus transaction.
    fn read_register8(&mut self, register: Register) -> Result<u8, Error<E>> {
        let address = u8::from(register);
        let mut rx = [0u8; 1];
        self.i2c
            .write_read(self.address, &[address], &mut rx)
            .map_err(Error::Communication)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:02X}", address, rx[0]);

        Ok(rx[0])
    }

    /// Write an 8-bit register and return the value read back afterwards
    fn write_register8(&mut self, register: Register, value: u8) -> Result<u8, Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to register 0x{:02X}", value, address);

        self.i2c
            .write(self.address, &[address, value])
            .map_err(Error::Communication)?;

        self.read_register8(register)
    }

    /// Read a 16-bit big-endian register pair starting at the high byte
    fn read_register16(&mut self, register: Register) -> Result<u16, Error<E>> {
        let address = u8::from(register);
        let mut rx = [0u8; 2];
        self.i2c
            .write_read(self.address, &[address], &mut rx)
            .map_err(Error::Communication)?;

        let value = u16::from_be_bytes(rx);

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:04X}", address, value);

        Ok(value)
    }

    /// Write a 16-bit big-endian register pair and return the value read back
    fn write_register16(&mut self, register: Register, value: u16) -> Result<u16, Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:04X} to register 0x{:02X}", value, address);

        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[address, hi, lo])
            .map_err(Error::Communication)?;

        self.read_register16(register)
    }

    fn read_field(&mut self, field: Field) -> Result<u8, Error<E>> {
        let raw = self.read_register8(field.register)?;
        Ok(field.extract(raw))
    }

    /// Read-modify-write of one field, returning the field as read back
    fn write_field(&mut self, field: Field, value: u8) -> Result<u8, Error<E>> {
        Error::<E>::check_range(field.name, value.into(), field.max.into())?;

        let current = self.read_register8(field.register)?;
        let written = self.write_register8(field.register, field.insert(current, value))?;

        Ok(field.extract(written))
    }

    fn write_position(
        &mut self,
        register: Register,
        quantity: &'static str,
        value: u16,
    ) -> Result<u16, Error<E>> {
        Error::<E>::check_range(quantity, value, POSITION_MAX)?;
        self.write_register16(register, value)
    }

    /// Get the 12-bit scaled output angle
    ///
    /// Value ranges from 0 to 4095 and honours ZPOS, MPOS and MANG.
    /// Use [`ANGLE_MAX`] for conversion calculations
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn angle(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::Angle)
    }

    /// Get the angular position in degrees (0-359)
    ///
    /// Integer conversion of [`Self::angle`], rounded down
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn angle_degrees(&mut self) -> Result<u16, Error<E>> {
        let angle = self.angle()?;
        let degrees = (u32::from(angle).saturating_mul(360)) / u32::from(ANGLE_MAX);
        #[allow(clippy::cast_possible_truncation)]
        Ok(degrees as u16)
    }

    /// Get the unscaled and unmodified 12-bit angle
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn raw_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::RawAngle)
    }

    /// Get the magnet status flags
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn status(&mut self) -> Result<Status, Error<E>> {
        self.read_register8(Register::Status).map(Status::new)
    }

    /// Check the MH flag: magnet too strong
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn is_magnet_too_strong(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status()?.magnet_too_strong())
    }

    /// Check the ML flag: magnet too weak
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn is_magnet_too_weak(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status()?.magnet_too_weak())
    }

    /// Check the MD flag: magnet detected
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn is_magnet_detected(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status()?.magnet_detected())
    }

    /// Get the Automatic Gain Control (AGC) value
    ///
    /// In 5V mode the range is 0-255, in 3.3V mode 0-128. Low values mean a
    /// strong magnetic field
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn gain(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Agc)
    }

    /// Get the 12-bit CORDIC magnitude
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn magnitude(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::Magnitude)
    }

    /// Get the number of times ZPOS and MPOS have been burned
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn zmco(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Zmco)
    }

    /// Get the 12-bit zero position
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn zero_position(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::ZPos)
    }

    /// Set the 12-bit zero position (start position), returning the value read back
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 4095, or an error if
    /// I2C communication fails
    pub fn set_zero_position(&mut self, value: u16) -> Result<u16, Error<E>> {
        self.write_position(Register::ZPos, "zero position", value)
    }

    /// Get the 12-bit maximum position
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn max_position(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::MPos)
    }

    /// Set the 12-bit maximum position (stop position), returning the value read back
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 4095, or an error if
    /// I2C communication fails
    pub fn set_max_position(&mut self, value: u16) -> Result<u16, Error<E>> {
        self.write_position(Register::MPos, "max position", value)
    }

    /// Get the 12-bit maximum angle
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn max_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::MAng)
    }

    /// Set the 12-bit maximum angle, returning the value read back
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 4095, or an error if
    /// I2C communication fails
    pub fn set_max_angle(&mut self, value: u16) -> Result<u16, Error<E>> {
        self.write_position(Register::MAng, "max angle", value)
    }

    /// Read both configuration bytes at once
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn configuration(&mut self) -> Result<ConfigurationRegister, Error<E>> {
        self.read_register16(Register::ConfHigh)
            .map(ConfigurationRegister)
    }

    /// Get the power mode
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn power_mode(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::POWER_MODE)
    }

    /// Set the power mode (0-3, see [`PowerMode`](crate::PowerMode))
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub fn set_power_mode(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::POWER_MODE, value)
    }

    /// Get the hysteresis
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn hysteresis(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::HYSTERESIS)
    }

    /// Set the hysteresis (0-3, see [`Hysteresis`](crate::Hysteresis))
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub fn set_hysteresis(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::HYSTERESIS, value)
    }

    /// Get the output stage
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn output_stage(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::OUTPUT_STAGE)
    }

    /// Set the output stage (0-2, see [`OutputStage`](crate::OutputStage))
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 2, or an error if I2C
    /// communication fails
    pub fn set_output_stage(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::OUTPUT_STAGE, value)
    }

    /// Get the PWM frequency
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn pwm_frequency(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::PWM_FREQUENCY)
    }

    /// Set the PWM frequency (0-3, see [`PwmFrequency`](crate::PwmFrequency))
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub fn set_pwm_frequency(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::PWM_FREQUENCY, value)
    }

    /// Get the slow filter setting
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn slow_filter(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::SLOW_FILTER)
    }

    /// Set the slow filter (0-3, see [`SlowFilter`](crate::SlowFilter))
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub fn set_slow_filter(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::SLOW_FILTER, value)
    }

    /// Get the fast filter threshold
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn fast_filter_threshold(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::FAST_FILTER_THRESHOLD)
    }

    /// Set the fast filter threshold (0-7, see
    /// [`FastFilterThreshold`](crate::FastFilterThreshold))
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 7, or an error if I2C
    /// communication fails
    pub fn set_fast_filter_threshold(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::FAST_FILTER_THRESHOLD, value)
    }

    /// Get the watchdog setting
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn watchdog(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::WATCHDOG)
    }

    /// Turn the watchdog off (0) or on (1)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 1, or an error if I2C
    /// communication fails
    pub fn set_watchdog(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::WATCHDOG, value)
    }

    /// Permanently write ZPOS and MPOS to non-volatile memory
    ///
    /// The sensor accepts this command at most three times. Check
    /// [`Self::zmco`] before burning; this driver does not track it
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn burn_angle(&mut self) -> Result<(), Error<E>> {
        self.burn(BurnCommand::Angle)
    }

    /// Permanently write MANG and CONF to non-volatile memory
    ///
    /// The sensor accepts this command only once, and only while ZMCO is 0
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn burn_settings(&mut self) -> Result<(), Error<E>> {
        self.burn(BurnCommand::Settings)
    }

    fn burn(&mut self, command: BurnCommand) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::info!("Issuing burn command {}", command);

        self.i2c
            .write(self.address, &[u8::from(Register::Burn), u8::from(command)])
            .map_err(Error::Communication)
    }
}
