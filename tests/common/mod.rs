//! Register-file model of the AS5600 used as a fake I2C bus

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// Simulated sensor: a 256-byte register file behind an auto-incrementing
/// address pointer
#[derive(Debug, Clone)]
pub struct FakeAs5600 {
    pub address: u8,
    pub registers: [u8; 256],
    /// Number of bus transactions seen, including rejected ones
    pub transactions: usize,
    /// Ignore all register writes, like a sensor that refuses configuration
    pub frozen: bool,
    pointer: u8,
}

impl FakeAs5600 {
    pub fn new() -> Self {
        Self {
            address: as5600::DEFAULT_ADDRESS,
            registers: [0; 256],
            transactions: 0,
            frozen: false,
            pointer: 0,
        }
    }

    pub fn with_register(mut self, register: u8, value: u8) -> Self {
        self.registers[usize::from(register)] = value;
        self
    }

    pub fn set_register16(&mut self, register: u8, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.registers[usize::from(register)] = hi;
        self.registers[usize::from(register) + 1] = lo;
    }

    fn writable(register: u8) -> bool {
        matches!(register, 0x01..=0x08 | 0xFF)
    }
}

impl ErrorType for FakeAs5600 {
    type Error = ErrorKind;
}

impl I2c for FakeAs5600 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions += 1;
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&pointer, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = pointer;
                    for (register, &byte) in (pointer..=u8::MAX).zip(data) {
                        if !self.frozen && Self::writable(register) {
                            self.registers[usize::from(register)] = byte;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for (register, byte) in (self.pointer..=u8::MAX).zip(buffer.iter_mut()) {
                        *byte = self.registers[usize::from(register)];
                    }
                }
            }
        }

        Ok(())
    }
}
