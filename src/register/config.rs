//! ### CONFIG - IIR filter configuration (`0x1F`, 1 byte, R/W)
//!
//! Controls the IIR filter coefficient.
//!
//! ### Default values
//! 0x00 (Bypass mode / No filter)
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp388_altimeter::{DeviceSession, Error};
//! # use bmp388_altimeter::bus::Interface;
//! # async fn demo<T: Interface>(session: &mut DeviceSession<T>) -> Result<(), Error> {
//! use bmp388_altimeter::register::config::{Config, ConfigFields, IIRFilterCoefficient};
//!
//! let data = session.read::<Config>().await?;
//! println!("{:?}", data.iir_filter);
//!
//! session.write::<Config>(&ConfigFields { iir_filter: IIRFilterCoefficient::Coef3 }).await?;
//! # Ok(()) }
//! ```

use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for CONFIG (0x1F) register
pub struct Config;
impl Reg for Config { const ADDR: u8 = 0x1F; }

/// The payload for the CONFIG (0x1F) register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConfigFields {
    /// The IIR filter coefficient, datasheet section 3.4.3
    pub iir_filter: IIRFilterCoefficient
}

impl Readable for Config {
    type Out = ConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(ConfigFields {
            iir_filter: IIRFilterCoefficient::from((b[0] >> 1) & 0b111)
        })
    }
}

impl Writable for Config {
    type In = ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let iir_filter: u8 = v.iir_filter.into();
        out[0] = (iir_filter & 0b111) << 1;
    }
}

/// All configurable IIR filter coefficients.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IIRFilterCoefficient {
    /// Filter coefficient is 0 => bypass-mode
    Coef0   = 0b000,
    Coef1   = 0b001,
    Coef3   = 0b010,
    Coef7   = 0b011,
    Coef15  = 0b100,
    Coef31  = 0b101,
    Coef63  = 0b110,
    Coef127 = 0b111,
}

impl From<IIRFilterCoefficient> for u8 {
    fn from(coefficient: IIRFilterCoefficient) -> u8 {
        coefficient as u8
    }
}

impl From<u8> for IIRFilterCoefficient {
    fn from(field: u8) -> Self {
        match field {
            0b000 => IIRFilterCoefficient::Coef0,
            0b001 => IIRFilterCoefficient::Coef1,
            0b010 => IIRFilterCoefficient::Coef3,
            0b011 => IIRFilterCoefficient::Coef7,
            0b100 => IIRFilterCoefficient::Coef15,
            0b101 => IIRFilterCoefficient::Coef31,
            0b110 => IIRFilterCoefficient::Coef63,
            _ => IIRFilterCoefficient::Coef127,
        }
    }
}
