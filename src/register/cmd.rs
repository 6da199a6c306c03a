//! ### CMD - Command register (`0x7E`, 1 byte, Write-only)
//!
//! ### Default values
//! N/A. This register is write-only.
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::cmd::{Cmd, CmdData};
//!
//! // Drop whatever the FIFO holds
//! session.write::<Cmd>(&CmdData::FifoFlush).await?;
//! # Ok(()) }
//! ```
//!
//! A soft reset through this register bypasses the session, which then still believes the
//! device is configured. Prefer [`Bmp3::soft_reset`](crate::bmp3::Bmp3::soft_reset), run by
//! every configure.
#![doc(alias = "CMD")]
use crate::register::{Reg, Writable};

/// Marker type for CMD (0x7E) register
pub struct Cmd;
impl Reg for Cmd { const ADDR: u8 = 0x7E; }

/// The payload for the CMD (0x7E) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmdData {
    /// Flushes the FIFO buffer without touching its configuration.
    FifoFlush,

    /// Overwrites all user settings with their default state and flushes the FIFO.
    SoftReset
}

impl From<CmdData> for u8 {
    fn from(cmd: CmdData) -> u8 {
        match cmd {
            CmdData::FifoFlush => 0xB0,
            CmdData::SoftReset => 0xB6,
        }
    }
}

impl Writable for Cmd {
    type In = CmdData;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}
