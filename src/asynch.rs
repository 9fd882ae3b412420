//! Asynchronous driver for AS5600 magnetic position sensor
//!
//! Same wire protocol, validation and error semantics as the blocking
//! [`As5600`](crate::As5600).

use embedded_hal_async::i2c::I2c;

use crate::{
    driver::{ANGLE_MAX, DEFAULT_ADDRESS, POSITION_MAX},
    error::Error,
    field::{self, Field},
    register::{BurnCommand, ConfigurationRegister, Register},
    status::Status,
};

/// AS5600 driver instance (asynchronous)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct As5600Async<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> As5600Async<I2C>
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

    async fn read_register8(&mut self, register: Register) -> Result<u8, Error<E>> {
        let address = u8::from(register);
        let mut rx = [0u8; 1];
        self.i2c
            .write_read(self.address, &[address], &mut rx)
            .await
            .map_err(Error::Communication)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:02X}", address, rx[0]);

        Ok(rx[0])
    }

    async fn write_register8(&mut self, register: Register, value: u8) -> Result<u8, Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to register 0x{:02X}", value, address);

        self.i2c
            .write(self.address, &[address, value])
            .await
            .map_err(Error::Communication)?;

        self.read_register8(register).await
    }

    async fn read_register16(&mut self, register: Register) -> Result<u16, Error<E>> {
        let address = u8::from(register);
        let mut rx = [0u8; 2];
        self.i2c
            .write_read(self.address, &[address], &mut rx)
            .await
            .map_err(Error::Communication)?;

        let value = u16::from_be_bytes(rx);

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:04X}", address, value);

        Ok(value)
    }

    async fn write_register16(&mut self, register: Register, value: u16) -> Result<u16, Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:04X} to register 0x{:02X}", value, address);

        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[address, hi, lo])
            .await
            .map_err(Error::Communication)?;

        self.read_register16(register).await
    }

    async fn read_field(&mut self, field: Field) -> Result<u8, Error<E>> {
        let raw = self.read_register8(field.register).await?;
        Ok(field.extract(raw))
    }

    async fn write_field(&mut self, field: Field, value: u8) -> Result<u8, Error<E>> {
        Error::<E>::check_range(field.name, value.into(), field.max.into())?;

        let current = self.read_register8(field.register).await?;
        let written = self
            .write_register8(field.register, field.insert(current, value))
            .await?;

        Ok(field.extract(written))
    }

    async fn write_position(
        &mut self,
        register: Register,
        quantity: &'static str,
        value: u16,
    ) -> Result<u16, Error<E>> {
        Error::<E>::check_range(quantity, value, POSITION_MAX)?;
        self.write_register16(register, value).await
    }

    /// Get the 12-bit scaled output angle (0-4095)
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn angle(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::Angle).await
    }

    /// Get the angular position in degrees (0-359), rounded down
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn angle_degrees(&mut self) -> Result<u16, Error<E>> {
        let angle = self.angle().await?;
        let degrees = (u32::from(angle).saturating_mul(360)) / u32::from(ANGLE_MAX);
        #[allow(clippy::cast_possible_truncation)]
        Ok(degrees as u16)
    }

    /// Get the unscaled and unmodified 12-bit angle
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn raw_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::RawAngle).await
    }

    /// Get the magnet status flags
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn status(&mut self) -> Result<Status, Error<E>> {
        self.read_register8(Register::Status).await.map(Status::new)
    }

    /// Check the MH flag: magnet too strong
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn is_magnet_too_strong(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status().await?.magnet_too_strong())
    }

    /// Check the ML flag: magnet too weak
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn is_magnet_too_weak(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status().await?.magnet_too_weak())
    }

    /// Check the MD flag: magnet detected
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn is_magnet_detected(&mut self) -> Result<bool, Error<E>> {
        Ok(self.status().await?.magnet_detected())
    }

    /// Get the Automatic Gain Control (AGC) value
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn gain(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Agc).await
    }

    /// Get the 12-bit CORDIC magnitude
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn magnitude(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::Magnitude).await
    }

    /// Get the number of times ZPOS and MPOS have been burned
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn zmco(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Zmco).await
    }

    /// Get the 12-bit zero position
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn zero_position(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::ZPos).await
    }

    /// Set the 12-bit zero position, returning the value read back
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 4095, or an error if
    /// I2C communication fails
    pub async fn set_zero_position(&mut self, value: u16) -> Result<u16, Error<E>> {
        self.write_position(Register::ZPos, "zero position", value)
            .await
    }

    /// Get the 12-bit maximum position
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn max_position(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::MPos).await
    }

    /// Set the 12-bit maximum position, returning the value read back
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 4095, or an error if
    /// I2C communication fails
    pub async fn set_max_position(&mut self, value: u16) -> Result<u16, Error<E>> {
        self.write_position(Register::MPos, "max position", value)
            .await
    }

    /// Get the 12-bit maximum angle
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn max_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::MAng).await
    }

    /// Set the 12-bit maximum angle, returning the value read back
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 4095, or an error if
    /// I2C communication fails
    pub async fn set_max_angle(&mut self, value: u16) -> Result<u16, Error<E>> {
        self.write_position(Register::MAng, "max angle", value)
            .await
    }

    /// Read both configuration bytes at once
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn configuration(&mut self) -> Result<ConfigurationRegister, Error<E>> {
        self.read_register16(Register::ConfHigh)
            .await
            .map(ConfigurationRegister)
    }

    /// Get the power mode
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn power_mode(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::POWER_MODE).await
    }

    /// Set the power mode (0-3)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub async fn set_power_mode(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::POWER_MODE, value).await
    }

    /// Get the hysteresis
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn hysteresis(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::HYSTERESIS).await
    }

    /// Set the hysteresis (0-3)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub async fn set_hysteresis(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::HYSTERESIS, value).await
    }

    /// Get the output stage
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn output_stage(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::OUTPUT_STAGE).await
    }

    /// Set the output stage (0-2)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 2, or an error if I2C
    /// communication fails
    pub async fn set_output_stage(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::OUTPUT_STAGE, value).await
    }

    /// Get the PWM frequency
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn pwm_frequency(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::PWM_FREQUENCY).await
    }

    /// Set the PWM frequency (0-3)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub async fn set_pwm_frequency(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::PWM_FREQUENCY, value).await
    }

    /// Get the slow filter setting
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn slow_filter(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::SLOW_FILTER).await
    }

    /// Set the slow filter (0-3)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 3, or an error if I2C
    /// communication fails
    pub async fn set_slow_filter(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::SLOW_FILTER, value).await
    }

    /// Get the fast filter threshold
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn fast_filter_threshold(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::FAST_FILTER_THRESHOLD).await
    }

    /// Set the fast filter threshold (0-7)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 7, or an error if I2C
    /// communication fails
    pub async fn set_fast_filter_threshold(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::FAST_FILTER_THRESHOLD, value).await
    }

    /// Get the watchdog setting
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn watchdog(&mut self) -> Result<u8, Error<E>> {
        self.read_field(field::WATCHDOG).await
    }

    /// Turn the watchdog off (0) or on (1)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values above 1, or an error if I2C
    /// communication fails
    pub async fn set_watchdog(&mut self, value: u8) -> Result<u8, Error<E>> {
        self.write_field(field::WATCHDOG, value).await
    }

    /// Permanently write ZPOS and MPOS to non-volatile memory
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn burn_angle(&mut self) -> Result<(), Error<E>> {
        self.burn(BurnCommand::Angle).await
    }

    /// Permanently write MANG and CONF to non-volatile memory
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn burn_settings(&mut self) -> Result<(), Error<E>> {
        self.burn(BurnCommand::Settings).await
    }

    async fn burn(&mut self, command: BurnCommand) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::info!("Issuing burn command {}", command);

        self.i2c
            .write(self.address, &[u8::from(Register::Burn), u8::from(command)])
            .await
            .map_err(Error::Communication)
    }
}
