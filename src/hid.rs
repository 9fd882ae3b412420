//! USB HID joystick report for forwarding angle readings

/// Report ID declared in [`JOYSTICK_REPORT_DESCRIPTOR`]
pub const REPORT_ID: u8 = 0x05;

/// Length of an encoded [`JoystickReport`]
pub const REPORT_SIZE: usize = 5;

/// HID report descriptor: generic desktop joystick with two 16-bit axes
/// (0-4095) and four buttons, padded to a whole byte
pub const JOYSTICK_REPORT_DESCRIPTOR: [u8; 54] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0x85, REPORT_ID, //   Report ID
    0xA1, 0x02, //   Collection (Logical)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x46, 0xFF, 0x0F, //     Physical Maximum (4095)
    0x15, 0x00, //     Logical Minimum (0)
    0x26, 0xFF, 0x0F, //     Logical Maximum (4095)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x10, //     Report Size (16)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (1)
    0x29, 0x04, //     Usage Maximum (4)
    0x45, 0x00, //     Physical Maximum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x04, //     Report Count (4)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0xC0, //   End Collection
    0x95, 0x01, //   Report Count (1)
    0x75, 0x04, //   Report Size (4)
    0x81, 0x03, //   Input (Constant, Variable, Absolute)
    0xC0, // End Collection
];

/// One joystick input report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    /// X axis, 0-4095
    pub x: u16,
    /// Y axis, 0-4095
    pub y: u16,
    /// Button bits, only the low four are declared
    pub buttons: u8,
}

impl JoystickReport {
    /// Build a report from both axes and the button bits
    #[must_use]
    pub const fn new(x: u16, y: u16, buttons: u8) -> Self {
        Self { x, y, buttons }
    }

    /// Encode as `x` (LE), `y` (LE), `buttons`
    #[must_use]
    pub fn to_bytes(&self) -> [u8; REPORT_SIZE] {
        let [x0, x1] = self.x.to_le_bytes();
        let [y0, y1] = self.y.to_le_bytes();
        [x0, x1, y0, y1, self.buttons]
    }
}

/// Transport that delivers encoded input reports to the USB host
pub trait ReportSink {
    /// Transport error
    type Error;

    /// Send one encoded report
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the report could not be queued
    fn send_report(&mut self, report: &[u8; REPORT_SIZE]) -> Result<(), Self::Error>;
}

/// Joystick that only transmits reports which differ from the last one sent
#[derive(Debug)]
pub struct Joystick<S> {
    sink: S,
    previous: [u8; REPORT_SIZE],
}

impl<S: ReportSink> Joystick<S> {
    /// Create a joystick whose last-sent report is all zeros
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            previous: [0; REPORT_SIZE],
        }
    }

    /// Release the report sink, consuming the joystick
    pub fn release(self) -> S {
        self.sink
    }

    /// Send `report` unless it equals the last report sent
    ///
    /// Returns `true` if a report went out. The last-sent report only
    /// changes on success, so a failed report is retried on the next call.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if sending fails
    pub fn update(&mut self, report: JoystickReport) -> Result<bool, S::Error> {
        let bytes = report.to_bytes();
        if bytes == self.previous {
            return Ok(false);
        }

        self.sink.send_report(&bytes)?;
        self.previous = bytes;

        #[cfg(feature = "defmt")]
        defmt::trace!("Sent joystick report {}", report);

        Ok(true)
    }
}
