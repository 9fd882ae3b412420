//! Angle-to-joystick example for STM32 with Embassy
//!
//! Reads the AS5600 every 100 ms and forwards the angle as the X axis of a
//! USB HID joystick. Reports are only queued when they change; a separate
//! task drains the queue into the HID IN endpoint.
//!
//! Hardware setup:
//! - AS5600 connected via I2C1 (SCL=PB6, SDA=PB7), default address 0x36
//! - USB OTG FS on PA11 (D-) / PA12 (D+)

#![no_std]
#![no_main]

use as5600::{
    As5600Async, Hysteresis,
    hid::{
        JOYSTICK_REPORT_DESCRIPTOR, Joystick, JoystickReport, REPORT_ID, REPORT_SIZE, ReportSink,
    },
};
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{bind_interrupts, i2c, peripherals, time::Hertz, usb};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::Timer;
use embassy_usb::{
    Builder, UsbDevice,
    class::hid::{self, HidWriter},
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
    OTG_FS => usb::InterruptHandler<peripherals::USB_OTG_FS>;
});

type UsbDriver = usb::Driver<'static, peripherals::USB_OTG_FS>;

// Encoded reports waiting for the HID writer task
static REPORTS: Channel<ThreadModeRawMutex, [u8; REPORT_SIZE], 4> = Channel::new();

struct ChannelSink;

impl ReportSink for ChannelSink {
    type Error = ();

    fn send_report(&mut self, report: &[u8; REPORT_SIZE]) -> Result<(), ()> {
        REPORTS.try_send(*report).map_err(|_| ())
    }
}

#[embassy_executor::task]
async fn usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

#[embassy_executor::task]
async fn hid_writer(mut writer: HidWriter<'static, UsbDriver, 8>) {
    loop {
        let report = REPORTS.receive().await;

        let mut packet = [0u8; REPORT_SIZE + 1];
        packet[0] = REPORT_ID;
        packet[1..].copy_from_slice(&report);

        if let Err(e) = writer.write(&packet).await {
            warn!("Failed to send report: {:?}", e);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    static EP_OUT_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();
    let mut usb_config = usb::Config::default();
    usb_config.vbus_detection = false;
    let driver = usb::Driver::new_fs(
        p.USB_OTG_FS,
        Irqs,
        p.PA12,
        p.PA11,
        EP_OUT_BUFFER.init([0; 256]),
        usb_config,
    );

    let mut config = embassy_usb::Config::new(0x1209, 0x0001);
    config.manufacturer = Some("Embassy");
    config.product = Some("AS5600 joystick");

    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESCRIPTOR: StaticCell<[u8; 128]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static HID_STATE: StaticCell<hid::State> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 128]),
        CONTROL_BUF.init([0; 64]),
    );

    let hid_config = hid::Config {
        report_descriptor: &JOYSTICK_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 10,
        max_packet_size: 8,
    };
    let hid_state = HID_STATE.init(hid::State::new());
    let writer = HidWriter::<_, 8>::new(&mut builder, hid_state, hid_config);

    unwrap!(spawner.spawn(usb_device(builder.build())));
    unwrap!(spawner.spawn(hid_writer(writer)));

    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH0,
        Hertz(400_000),
        Default::default(),
    );

    let mut sensor = As5600Async::new(i2c);
    let mut joystick = Joystick::new(ChannelSink);

    if let Ok(status) = sensor.status().await {
        info!(
            "Magnet detected: {}, too strong: {}, too weak: {}",
            status.magnet_detected(),
            status.magnet_too_strong(),
            status.magnet_too_weak()
        );
    }

    match sensor.set_hysteresis(Hysteresis::Lsb3.into()).await {
        Ok(hyst) => info!("Hysteresis: {}", hyst),
        Err(e) => error!("Failed to set hysteresis: {:?}", e),
    }

    loop {
        match sensor.angle().await {
            Ok(angle) => {
                // A full queue means the host is not polling; the report is
                // retried on the next sample
                if joystick.update(JoystickReport::new(angle, 0, 0)).is_err() {
                    warn!("Report queue full");
                }
            }
            Err(e) => error!("Sensor error: {:?}", e),
        }

        Timer::after_millis(100).await;
    }
}
