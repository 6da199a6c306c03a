//! ### EVENT - Sensor events (`0x10`, 1 byte, Read-only)
//!
//! **Note:** The EVENT register has clear-on-read semantics.
//!
//! ### Default values
//! `por_detected = true`
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::event::Event;
//!
//! // Detect an unexpected power cycle or soft reset
//! if session.read::<Event>().await?.por_detected {
//!     println!("sensor settings were reset");
//! }
//! # Ok(()) }
//! ```

use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for the EVENT (0x10) register
pub struct Event;
impl Reg for Event { const ADDR: u8 = 0x10; }

/// The payload for the EVENT (0x10) register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFlags {
    /// Set to [`true`] after device power-up or after a soft-reset.
    ///
    /// This value is cleared on **register** read.
    pub por_detected: bool,

    /// Set to [`true`] if a serial interface transaction has occurred
    /// during a pressure or temperature conversion.
    ///
    /// This value is cleared on **register** read.
    pub itf_act_pt: bool,
}

impl Readable for Event {
    type Out = EventFlags;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(EventFlags {
            por_detected:   (b[0] & 0b01) != 0,
            itf_act_pt:     (b[0] & 0b10) != 0,
        })
    }
}
