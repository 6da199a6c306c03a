//! Errors that can occur when driving the BMP388/BMP390.
//!
//! Every failure is reported through [`Error`]. The variants that mirror the sensor vendor's
//! status codes expose that code through [`Error::code`], so callers that log or forward the
//! numeric form see the same values a C integration would.

use thiserror::Error;

use crate::bus::{CommFail, InterfaceKind};
use crate::register::InvalidRegisterField;
use crate::session::SessionState;

/// This represents all possible errors that can occur when using the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The session has no transport to talk through.
    #[error("no transport bound to the session")]
    NullReference,

    /// A bus transaction failed.
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    #[error("bus communication failed")]
    CommFail,

    /// The transport does not implement the requested interface kind.
    #[error("interface {0:?} is not supported by this transport")]
    UnsupportedInterface(InterfaceKind),

    /// CHIP_ID did not hold the id of a BMP388 or BMP390.
    #[error("no BMP388/BMP390 found, chip id {0:#04x}")]
    DeviceNotFound(u8),

    /// The command decoder was busy or flagged `cmd_err`.
    #[error("command execution failed")]
    CommandFailed,

    /// The sensor flagged `conf_err` after entering normal mode.
    #[error("sensor rejected the configuration")]
    ConfigurationError,

    /// The measurement time for the selected oversampling does not fit in the ODR period.
    #[error("oversampling does not fit the output data rate")]
    InvalidOdrOsr,

    /// A settings commit did not select every required field. Holds the missing bits.
    #[error("settings selection is missing required fields {0:#06x}")]
    PartialSettings(u16),

    /// The operation is not allowed in the current session state.
    #[error("operation requires state {expected:?} but session is {actual:?}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },

    /// Reading from a register returned unexpected data. This should not happen in normal circumstances.
    ///
    /// Could possibly indicate a bug in the driver, or less likely, a faulty chip or interference.
    #[error("unexpected register data {0:?}")]
    UnexpectedRegisterData(InvalidRegisterField),

    /// The sea level reference pressure must be finite and above zero.
    #[error("sea level pressure must be a positive, finite number of hPa")]
    InvalidSeaLevelPressure,
}

impl Error {
    /// Numeric status code. `-1..=-7` follow the vendor driver, the rest are specific to this crate.
    pub fn code(&self) -> i8 {
        match self {
            Error::NullReference => -1,
            Error::CommFail => CommFail::CODE,
            Error::InvalidOdrOsr => -3,
            Error::CommandFailed => -4,
            Error::ConfigurationError => -5,
            Error::DeviceNotFound(_) => -7,
            Error::UnsupportedInterface(_) => -9,
            Error::PartialSettings(_) => -10,
            Error::InvalidState { .. } => -11,
            Error::UnexpectedRegisterData(_) => -12,
            Error::InvalidSeaLevelPressure => -13,
        }
    }
}

impl From<CommFail> for Error {
    fn from(_: CommFail) -> Self {
        Error::CommFail
    }
}

impl From<InvalidRegisterField> for Error {
    fn from(e: InvalidRegisterField) -> Self {
        Error::UnexpectedRegisterData(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_codes() {
        assert_eq!(-1, Error::NullReference.code());
        assert_eq!(-2, Error::from(CommFail).code());
        assert_eq!(-3, Error::InvalidOdrOsr.code());
        assert_eq!(-4, Error::CommandFailed.code());
        assert_eq!(-5, Error::ConfigurationError.code());
        assert_eq!(-7, Error::DeviceNotFound(0x58).code());
    }

    #[test]
    fn crate_codes_do_not_collide_with_vendor_codes() {
        let errors = [
            Error::UnsupportedInterface(InterfaceKind::Spi),
            Error::PartialSettings(0x02),
            Error::InvalidState { expected: SessionState::Bound, actual: SessionState::Unbound },
            Error::UnexpectedRegisterData(InvalidRegisterField::new(0x1C, 0b110, 0)),
            Error::InvalidSeaLevelPressure,
        ];
        for e in errors {
            assert!(e.code() <= -9);
        }
    }
}
