//! Async `no_std` driver and altitude acquisition for the Bosch BMP388/BMP390 barometric
//! pressure sensors.
//!
//! The crate is layered leaves first:
//!
//! - [`bus`]: the transport adapter ([`Interface`](bus::Interface)) between the driver and an
//!   I2C peripheral.
//! - [`register`]: typed register markers.
//! - [`bmp3`]: register-level sensor operations (identification, reset, settings commit,
//!   power modes, status and data).
//! - [`session`]: [`DeviceSession`], the `Unbound -> Bound -> Configured -> Active` lifecycle.
//! - [`acquisition`]: data-ready gated sampling and barometric altitude.
#![cfg_attr(not(test), no_std)]

pub mod acquisition;
pub mod bmp3;
pub mod bus;
pub mod calibration;
pub mod config;
pub mod error;
pub mod register;
pub mod session;

#[cfg(test)]
mod testing;

pub use acquisition::{Acquisition, Reading};
pub use error::Error;
pub use session::{DeviceSession, SessionState};
