//! ### ERR_REG - Sensor error conditions (`0x02`, 1 byte, Read-only)
//!
//! **Note:** `cmd_err` and `conf_err` are cleared on read.
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::err_reg::ErrReg;
//!
//! let flags = session.read::<ErrReg>().await?;
//! if flags.fatal_error() {
//!     println!("sensor reports a fatal error");
//! }
//! # Ok(()) }
//! ```

use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the ERR_REG (0x02) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct ErrReg;
impl Reg for ErrReg { const ADDR: u8 = 0x02; }

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorFlags {
    fatal_err: bool,
    cmd_err: bool,
    conf_err: bool,
}

impl ErrorFlags {
    pub fn new(fatal_err: bool, cmd_err: bool, conf_err: bool) -> Self {
        Self { fatal_err, cmd_err, conf_err }
    }

    /// A fatal error occurred.
    pub fn fatal_error(&self) -> bool { self.fatal_err }

    /// Command execution failed.
    ///
    /// This value is cleared on **register** read.
    pub fn command_error(&self) -> bool { self.cmd_err }

    /// Sensor configuration error detected.
    ///
    /// This can only happen in normal power mode.
    /// This value is cleared on **register** read.
    pub fn configuration_error(&self) -> bool { self.conf_err }
}

impl Readable for ErrReg {
    type Out = ErrorFlags;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(ErrorFlags {
            fatal_err: (b[0] & 0b001) != 0,
            cmd_err: (b[0] & 0b010) != 0,
            conf_err: (b[0] & 0b100) != 0,
        })
    }
}
