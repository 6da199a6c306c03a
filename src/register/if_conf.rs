use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for the IF_CONF (0x1A) register: serial interface settings.
pub struct IfConf;
impl Reg for IfConf { const ADDR: u8 = 0x1A; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IfConfFields {
    pub spi3: bool,
    pub i2c_wdt_en: bool,
    pub i2c_wdt_sel: I2cWatchdogTimer,
}

/// Timeout of the I2C watchdog, which releases a bus stuck in the middle of a transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum I2cWatchdogTimer {
    /// 1.25 ms
    WdtShort = 0,
    /// 40 ms
    WdtLong = 1,
}

impl From<u8> for I2cWatchdogTimer {
    fn from(field: u8) -> Self {
        match field {
            0 => I2cWatchdogTimer::WdtShort,
            _ => I2cWatchdogTimer::WdtLong,
        }
    }
}

impl Readable for IfConf {
    type Out = IfConfFields;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(IfConfFields {
            spi3:       (b[0] & 0b001) != 0,
            i2c_wdt_en: (b[0] & 0b010) != 0,
            i2c_wdt_sel: I2cWatchdogTimer::from((b[0] >> 2) & 0b001)
        })
    }
}

impl Writable for IfConf {
    type In = IfConfFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let mut value = 0u8;
        if v.spi3 { value |= 0b001; }
        if v.i2c_wdt_en { value |= 0b010; }
        value |= (v.i2c_wdt_sel as u8) << 2;

        out[0] = value;
    }
}
