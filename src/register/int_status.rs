//! ### INT_STATUS - Interrupt status (`0x11`, 1 byte, Read-only)
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::int_status::IntStatus;
//!
//! // Reading acknowledges the interrupt, a later acquire will see no new data.
//! let status = session.read::<IntStatus>().await?;
//! println!("data ready: {}", status.drdy);
//! # Ok(()) }
//! ```

use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for the INT_STATUS (0x11) register.
///
/// The whole register is cleared when it is read, which is what acknowledges a pending
/// data-ready interrupt.
pub struct IntStatus;
impl Reg for IntStatus { const ADDR: u8 = 0x11; }

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntStatusFlags {
    /// Has a FIFO watermark interrupt been asserted?
    pub fwm_int: bool,

    /// Has a FIFO full interrupt been asserted?
    pub ffull_int: bool,

    /// Has a data ready interrupt been asserted?
    pub drdy: bool,
}

impl Readable for IntStatus {
    type Out = IntStatusFlags;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntStatusFlags {
            fwm_int:    (b[0] & 0b0001) != 0,
            ffull_int:  (b[0] & 0b0010) != 0,
            drdy:       (b[0] & 0b1000) != 0,
        })
    }
}
