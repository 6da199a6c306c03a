//! ### NVM_PAR_T1 .. NVM_PAR_P11 - Trimming coefficients (`0x31`, 21 bytes, Read-only)
//!
//! Factory calibration stored in non-volatile memory. The values are fixed per device and are
//! read once during initialisation; see [`crate::calibration::CalibrationData`] for the scaled form.

use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for the calibration block (0x31 - 0x45)
pub struct Calibration;
impl Reg for Calibration { const ADDR:u8 = 0x31; }

#[derive(Copy, Clone, Debug)]
pub struct CalibrationNvm {
    pub(crate) nvm_par_t1: u16,
    pub(crate) nvm_par_t2: u16,
    pub(crate) nvm_par_t3: i8,
    pub(crate) nvm_par_p1: i16,
    pub(crate) nvm_par_p2: i16,
    pub(crate) nvm_par_p3: i8,
    pub(crate) nvm_par_p4: i8,
    pub(crate) nvm_par_p5: u16,
    pub(crate) nvm_par_p6: u16,
    pub(crate) nvm_par_p7: i8,
    pub(crate) nvm_par_p8: i8,
    pub(crate) nvm_par_p9: i16,
    pub(crate) nvm_par_p10: i8,
    pub(crate) nvm_par_p11: i8,
}

impl Readable for Calibration {
    type Out = CalibrationNvm;

    const N: usize = 21;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(CalibrationNvm {
            nvm_par_t1: u16::from_le_bytes([b[0], b[1]]),
            nvm_par_t2: u16::from_le_bytes([b[2], b[3]]),
            nvm_par_t3: i8::from_le_bytes([b[4]]),
            nvm_par_p1: i16::from_le_bytes([b[5], b[6]]),
            nvm_par_p2: i16::from_le_bytes([b[7], b[8]]),
            nvm_par_p3: i8::from_le_bytes([b[9]]),
            nvm_par_p4: i8::from_le_bytes([b[10]]),
            nvm_par_p5: u16::from_le_bytes([b[11], b[12]]),
            nvm_par_p6: u16::from_le_bytes([b[13], b[14]]),
            nvm_par_p7: i8::from_le_bytes([b[15]]),
            nvm_par_p8: i8::from_le_bytes([b[16]]),
            nvm_par_p9: i16::from_le_bytes([b[17], b[18]]),
            nvm_par_p10: i8::from_le_bytes([b[19]]),
            nvm_par_p11: i8::from_le_bytes([b[20]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_decode() {
        let nvm = Calibration::decode(&[
            0x98, 0x6E, 0x13, 0x4D, 0xF9, 0xB0, 0x1B, 0xC0, 0x15, 0x06, 0x01,
            0x92, 0x4A, 0xAE, 0x5D, 0x03, 0xFA, 0x08, 0x0F, 0x06, 0xF5,
        ]).unwrap();

        assert_eq!(0x6E98, nvm.nvm_par_t1);
        assert_eq!(0x4D13, nvm.nvm_par_t2);
        assert_eq!(-7, nvm.nvm_par_t3);
        assert_eq!(0x1BB0, nvm.nvm_par_p1);
        assert_eq!(0x15C0, nvm.nvm_par_p2);
        assert_eq!(6, nvm.nvm_par_p3);
        assert_eq!(1, nvm.nvm_par_p4);
        assert_eq!(0x4A92, nvm.nvm_par_p5);
        assert_eq!(0x5DAE, nvm.nvm_par_p6);
        assert_eq!(3, nvm.nvm_par_p7);
        assert_eq!(-6, nvm.nvm_par_p8);
        assert_eq!(0x0F08, nvm.nvm_par_p9);
        assert_eq!(6, nvm.nvm_par_p10);
        assert_eq!(-11, nvm.nvm_par_p11);
    }
}
