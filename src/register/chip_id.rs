//! ### CHIP_ID - Chip identification number (`0x00`, 1 byte, R)
//!
//! Contains the chip identification code: `0x50` for the BMP388 and `0x60` for the BMP390.
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::chip_id::ChipId;
//!
//! let id = session.read::<ChipId>().await?;
//! println!("chip id {:#04x}", id);
//! # Ok(()) }
//! ```
#![doc(alias = "CHIP_ID")]
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the CHIP_ID (0x00) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct ChipId;
impl Reg for ChipId { const ADDR: u8 = 0x00; }

impl Readable for ChipId {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}
