#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod asynch;
mod config;
mod driver;
mod error;
pub mod field;
pub mod hid;
mod register;
mod status;

pub use asynch::As5600Async;
pub use config::{
    FastFilterThreshold, Hysteresis, OutputStage, PowerMode, PwmFrequency, SlowFilter,
};
pub use driver::{ANGLE_MAX, As5600, DEFAULT_ADDRESS, POSITION_MAX};
pub use error::Error;
pub use register::{BurnCommand, ConfigurationRegister, Register};
pub use status::{STATUS_MASK, Status};
