//! Typed register map of the BMP388/BMP390.
//!
//! Every register (or fixed-size register block) is represented by a marker type implementing
//! [`Reg`], and [`Readable`] and/or [`Writable`] depending on its access mode. The marker carries
//! the register address and length, and knows how to decode/encode its payload.

pub mod calibration;
pub mod chip_id;
pub mod cmd;
pub mod config;
pub mod data;
pub mod err_reg;
pub mod event;
pub mod if_conf;
pub mod int_ctrl;
pub mod int_status;
pub mod odr;
pub mod osr;
pub mod pwr_ctrl;
pub mod status;

/// Largest register block transferred in one transaction (the calibration NVM block).
pub const MAX_REG_BYTES: usize = 21;

/// A register held a bit pattern that does not map to any known field value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

pub struct UnexpectedValue(pub u8);

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
