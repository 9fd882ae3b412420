//! Integration tests for AS5600 driver using mocked I2C.

use as5600::{As5600, Error, Hysteresis, PowerMode};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x36;

/// Helper for the register-pointer write followed by a read.
fn read(register: u8, response: &[u8]) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![register], response.to_vec())
}

fn write(bytes: &[u8]) -> I2cTransaction {
    I2cTransaction::write(ADDR, bytes.to_vec())
}

#[test]
fn reads_angle_register() {
    let expectations = [read(0x0E, &[0x0A, 0xBC])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    let angle = sensor.angle().unwrap();
    assert_eq!(angle, 0x0ABC);

    sensor.release().done();
}

#[test]
fn reads_raw_angle_and_magnitude() {
    let expectations = [read(0x0C, &[0x0F, 0xFF]), read(0x1B, &[0x02, 0x10])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.raw_angle().unwrap(), 4095);
    assert_eq!(sensor.magnitude().unwrap(), 0x0210);

    sensor.release().done();
}

#[test]
fn converts_angle_to_degrees() {
    let expectations = [
        read(0x0E, &[0x00, 0x00]),
        read(0x0E, &[0x04, 0x00]),
        read(0x0E, &[0x0F, 0xFF]),
    ];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.angle_degrees().unwrap(), 0);
    assert_eq!(sensor.angle_degrees().unwrap(), 90);
    assert_eq!(sensor.angle_degrees().unwrap(), 359);

    sensor.release().done();
}

#[test]
fn reads_eight_bit_registers() {
    let expectations = [read(0x1A, &[0x80]), read(0x00, &[0x02])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.gain().unwrap(), 128);
    assert_eq!(sensor.zmco().unwrap(), 2);

    sensor.release().done();
}

#[test]
fn reads_status_register() {
    // Reserved bits set alongside MD and ML
    let expectations = [read(0x0B, &[0b1111_0001])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    let status = sensor.status().unwrap();
    assert_eq!(status.raw(), 0b0011_0000);
    assert!(status.magnet_detected());
    assert!(status.magnet_too_weak());
    assert!(!status.magnet_too_strong());
    assert!(!status.magnetic_field_ok());

    sensor.release().done();
}

#[test]
fn magnet_flags_each_read_status() {
    let expectations = [
        read(0x0B, &[0b0000_1000]),
        read(0x0B, &[0b0001_0000]),
        read(0x0B, &[0b0010_0000]),
    ];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert!(sensor.is_magnet_too_strong().unwrap());
    assert!(sensor.is_magnet_too_weak().unwrap());
    assert!(sensor.is_magnet_detected().unwrap());

    sensor.release().done();
}

#[test]
fn writes_zero_position() {
    let expectations = [write(&[0x01, 0x03, 0xE8]), read(0x01, &[0x03, 0xE8])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.set_zero_position(1000).unwrap(), 1000);

    sensor.release().done();
}

#[test]
fn writes_max_position_and_angle() {
    let expectations = [
        write(&[0x03, 0x0F, 0xFF]),
        read(0x03, &[0x0F, 0xFF]),
        write(&[0x05, 0x00, 0x00]),
        read(0x05, &[0x00, 0x00]),
        read(0x05, &[0x00, 0x00]),
    ];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.set_max_position(4095).unwrap(), 4095);
    assert_eq!(sensor.set_max_angle(0).unwrap(), 0);
    assert_eq!(sensor.max_angle().unwrap(), 0);

    sensor.release().done();
}

#[test]
fn setter_returns_value_read_back() {
    // The sensor does not take the write; readback shows the old value
    let expectations = [write(&[0x01, 0x00, 0x10]), read(0x01, &[0x00, 0x20])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.set_zero_position(0x10).unwrap(), 0x20);

    sensor.release().done();
}

#[test]
fn power_mode_write_keeps_hysteresis() {
    let expectations = [
        // CONF_L holds HYST=3, PM=0
        read(0x08, &[0b0000_1100]),
        write(&[0x08, 0b0000_1110]),
        read(0x08, &[0b0000_1110]),
        // Read both fields back
        read(0x08, &[0b0000_1110]),
        read(0x08, &[0b0000_1110]),
    ];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.set_power_mode(PowerMode::Lpm2.into()).unwrap(), 2);
    assert_eq!(sensor.hysteresis().unwrap(), u8::from(Hysteresis::Lsb3));
    assert_eq!(sensor.power_mode().unwrap(), 2);

    sensor.release().done();
}

#[test]
fn fast_filter_write_keeps_slow_filter_and_watchdog() {
    let expectations = [
        // CONF_H holds WD=1, FTH=0, SF=2
        read(0x07, &[0b0010_0010]),
        write(&[0x07, 0b0011_0110]),
        read(0x07, &[0b0011_0110]),
    ];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.set_fast_filter_threshold(5).unwrap(), 5);

    sensor.release().done();
}

#[test]
fn reads_configuration_word() {
    let expectations = [read(0x07, &[0b0010_0111, 0b1110_0001])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    let conf = sensor.configuration().unwrap();
    assert_eq!(conf.raw(), 0x27E1);
    assert!(conf.watchdog());
    assert_eq!(conf.fast_filter_threshold(), 1);
    assert_eq!(conf.slow_filter(), 3);
    assert_eq!(conf.pwm_frequency(), 3);
    assert_eq!(conf.output_stage(), 2);
    assert_eq!(conf.hysteresis(), 0);
    assert_eq!(conf.power_mode(), 1);

    sensor.release().done();
}

#[test]
fn burn_angle_is_single_write() {
    let expectations = [write(&[0xFF, 0x80])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    sensor.burn_angle().unwrap();

    sensor.release().done();
}

#[test]
fn burn_settings_is_single_write() {
    let expectations = [write(&[0xFF, 0x40])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    sensor.burn_settings().unwrap();

    sensor.release().done();
}

#[test]
fn rejects_out_of_range_without_bus_traffic() {
    let i2c = I2cMock::new(&[]);
    let mut sensor = As5600::new(i2c);

    assert!(matches!(
        sensor.set_zero_position(4096),
        Err(Error::OutOfRange { quantity: "zero position", value: 4096, min: 0, max: 4095 })
    ));
    assert!(matches!(
        sensor.set_max_position(4096),
        Err(Error::OutOfRange { max: 4095, .. })
    ));
    assert!(matches!(
        sensor.set_max_angle(u16::MAX),
        Err(Error::OutOfRange { max: 4095, .. })
    ));
    assert!(matches!(
        sensor.set_power_mode(4),
        Err(Error::OutOfRange { quantity: "power mode", max: 3, .. })
    ));
    assert!(matches!(
        sensor.set_hysteresis(4),
        Err(Error::OutOfRange { quantity: "hysteresis", max: 3, .. })
    ));
    assert!(matches!(
        sensor.set_output_stage(3),
        Err(Error::OutOfRange { quantity: "output stage", max: 2, .. })
    ));
    assert!(matches!(
        sensor.set_pwm_frequency(4),
        Err(Error::OutOfRange { quantity: "PWM frequency", max: 3, .. })
    ));
    assert!(matches!(
        sensor.set_slow_filter(4),
        Err(Error::OutOfRange { quantity: "slow filter", max: 3, .. })
    ));
    assert!(matches!(
        sensor.set_fast_filter_threshold(8),
        Err(Error::OutOfRange { quantity: "fast filter threshold", max: 7, .. })
    ));
    assert!(matches!(
        sensor.set_watchdog(2),
        Err(Error::OutOfRange { quantity: "watchdog", max: 1, .. })
    ));

    sensor.release().done();
}

#[test]
fn out_of_range_error_names_bounds() {
    let err: Error<ErrorKind> = Error::OutOfRange {
        quantity: "output stage",
        value: 3,
        min: 0,
        max: 2,
    };
    assert_eq!(err.to_string(), "output stage must be between 0 and 2, got 3");
}

#[test]
fn propagates_bus_error_on_read() {
    let expectations = [read(0x0E, &[0x00, 0x00]).with_error(ErrorKind::Other)];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(sensor.angle(), Err(Error::Communication(ErrorKind::Other)));

    sensor.release().done();
}

#[test]
fn failed_field_write_skips_readback() {
    let expectations = [
        read(0x08, &[0b0000_1100]),
        write(&[0x08, 0b0000_1101]).with_error(ErrorKind::ArbitrationLoss),
    ];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(
        sensor.set_power_mode(1),
        Err(Error::Communication(ErrorKind::ArbitrationLoss))
    );

    sensor.release().done();
}

#[test]
fn burn_propagates_bus_error() {
    let expectations = [write(&[0xFF, 0x40]).with_error(ErrorKind::Other)];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    assert_eq!(
        sensor.burn_settings(),
        Err(Error::Communication(ErrorKind::Other))
    );

    sensor.release().done();
}

#[test]
fn uses_custom_address() {
    let expectations = [I2cTransaction::write_read(0x40, vec![0x0E], vec![0x01, 0x00])];

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::with_address(i2c, 0x40);

    assert_eq!(sensor.address(), 0x40);
    assert_eq!(sensor.angle().unwrap(), 0x0100);

    sensor.release().done();
}

#[test]
fn reads_multiple_angles_sequentially() {
    let angles: [u16; 4] = [0x0000, 0x0400, 0x0800, 0x0FFF];
    let expectations: Vec<_> = angles
        .iter()
        .map(|angle| read(0x0E, &angle.to_be_bytes()))
        .collect();

    let i2c = I2cMock::new(&expectations);
    let mut sensor = As5600::new(i2c);

    for &expected_angle in &angles {
        assert_eq!(sensor.angle().unwrap(), expected_angle);
    }

    sensor.release().done();
}
