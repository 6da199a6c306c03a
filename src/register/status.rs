use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the STATUS (0x03) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct Status;
impl Reg for Status { const ADDR: u8 = 0x03; }

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SensorStatus {
    cmd_rdy: bool,
    drdy_press: bool,
    drdy_temp: bool,
}

impl SensorStatus {
    pub fn new(cmd_rdy: bool, drdy_press: bool, drdy_temp: bool) -> Self {
        Self { cmd_rdy, drdy_press, drdy_temp }
    }

    /// Is the command decoder ready to accept a new command?
    ///
    /// [`false`] means that a command is already in progress.
    pub fn command_decoder_ready(&self) -> bool { self.cmd_rdy }

    /// Is there new pressure data to be read?
    ///
    /// This value is cleared when any of the pressure DATA registers are read.
    pub fn pressure_data_ready(&self) -> bool { self.drdy_press }

    /// Is there new temperature data to be read?
    ///
    /// This value is cleared when any of the temperature DATA registers are read.
    pub fn temperature_data_ready(&self) -> bool { self.drdy_temp }
}

impl Readable for Status {
    type Out = SensorStatus;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(SensorStatus {
            cmd_rdy:    (b[0] & 0b0001_0000) != 0,
            drdy_press: (b[0] & 0b0010_0000) != 0,
            drdy_temp:  (b[0] & 0b0100_0000) != 0,
        })
    }
}
