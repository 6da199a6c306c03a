//! ### INT_CTRL - Interrupt control (`0x19`, 1 byte, R/W)
//!
//! Configures the INT pin and which conditions raise it.
//!
//! ### Default values
//! 0x02 (INT pin push-pull, active high, not latched, all interrupts disabled)
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::int_ctrl::IntCtrl;
//!
//! // Latch the data ready interrupt until INT_STATUS is read.
//! let mut cfg = session.read::<IntCtrl>().await?;
//! cfg.int_latch = true;
//! session.write::<IntCtrl>(&cfg).await?;
//! # Ok(()) }
//! ```
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for INT_CTRL (0x19) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct IntCtrl;
impl Reg for IntCtrl { const ADDR: u8 = 0x19; }

/// The payload for the INT_CTRL (0x19) register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntCtrlCfg {
    /// True if INT pin is open-drain, false for push-pull.
    pub int_od: bool,
    /// True if INT pin is active high, false for active low.
    pub int_level: bool,
    /// True if interrupts for INT pin and INT_STATUS register should be latched.
    pub int_latch: bool,
    /// Enable/disable FIFO watermark interrupt.
    pub fwtm_en: bool,
    /// Enable/disable FIFO full interrupt.
    pub ffull_en: bool,
    /// Drive strength of the INT pin. false is *low*, true is *high*.
    pub int_ds: bool,
    /// Enable/disable data ready interrupt.
    ///
    /// This interrupt is asserted when a new measurement has been stored in the data registers.
    pub drdy_en: bool,
}

impl Readable for IntCtrl {
    type Out = IntCtrlCfg;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IntCtrlCfg {
            int_od:     (b[0] & 0b0000_0001) != 0,
            int_level:  (b[0] & 0b0000_0010) != 0,
            int_latch:  (b[0] & 0b0000_0100) != 0,
            fwtm_en:    (b[0] & 0b0000_1000) != 0,
            ffull_en:   (b[0] & 0b0001_0000) != 0,
            int_ds:     (b[0] & 0b0010_0000) != 0,
            drdy_en:    (b[0] & 0b0100_0000) != 0,
        })
    }
}

impl Writable for IntCtrl {
    type In = IntCtrlCfg;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let mut value = 0u8;
        if v.int_od { value |= 0b0000_0001; }
        if v.int_level { value |= 0b0000_0010; }
        if v.int_latch { value |= 0b0000_0100; }
        if v.fwtm_en { value |= 0b0000_1000; }
        if v.ffull_en { value |= 0b0001_0000; }
        if v.int_ds { value |= 0b0010_0000; }
        if v.drdy_en { value |= 0b0100_0000; }

        out[0] = value;
    }
}
