use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use heapless::Vec;

use crate::bus::{CommFail, DeviceAddress, Interface, InterfaceKind, MemoryBus, TransportResult};

const CHIP_ID: usize = 0x00;
const ERR_REG: usize = 0x02;
const STATUS: usize = 0x03;
const DATA: usize = 0x04;
const EVENT: usize = 0x10;
const INT_STATUS: usize = 0x11;
const INT_CTRL: usize = 0x19;
const IF_CONF: usize = 0x1A;
const PWR_CTRL: usize = 0x1B;
const OSR: usize = 0x1C;
const ODR: usize = 0x1D;
const CONFIG: usize = 0x1F;
const CALIBRATION: usize = 0x31;
const CMD: u8 = 0x7E;

/// Calibration block read from a real BMP390.
pub const CALIBRATION_FIXTURE: [u8; 21] = [
    0x98, 0x6E, 0x13, 0x4D, 0xF9, 0xB0, 0x1B, 0xC0, 0x15, 0x06, 0x01, 0x92, 0x4A, 0xAE,
    0x5D, 0x03, 0xFA, 0x08, 0x0F, 0x06, 0xF5,
];

/// Raw DATA_0..DATA_5 of the same device at room conditions.
pub const DATA_FIXTURE: [u8; 6] = [0x92, 0x51, 0x65, 0x79, 0xCE, 0x83];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    Read { reg: u8, len: usize },
    Write { reg: u8, value: u8 },
}

/// Register file of a BMP390 behind an [`Interface`].
///
/// Clear-on-read registers clear, soft reset restores the configuration registers and
/// [`trigger_conversion`](Self::trigger_conversion) plays the part of the measurement engine.
pub struct FakeDevice {
    pub regs: [u8; 256],
    pub address: DeviceAddress,
    pub log: Vec<Transaction, 128>,
    pub delays: Vec<u32, 16>,
    /// Flag `cmd_err` on every command.
    pub reject_commands: bool,
    /// Flag `conf_err` whenever normal mode is entered.
    pub reject_normal_mode: bool,
    /// Fail every read from this register.
    pub fail_register: Option<u8>,
    /// Fail the n-th read (0-based) since creation, counting every register.
    pub fail_nth_read: Option<usize>,
    reads: usize,
}

impl FakeDevice {
    pub fn new() -> Self {
        let mut device = FakeDevice {
            regs: [0u8; 256],
            address: DeviceAddress::PRIMARY,
            log: Vec::new(),
            delays: Vec::new(),
            reject_commands: false,
            reject_normal_mode: false,
            fail_register: None,
            fail_nth_read: None,
            reads: 0,
        };
        device.regs[CHIP_ID] = 0x60;
        device.regs[STATUS] = 0b0001_0000;
        device.regs[EVENT] = 0b01;
        device.regs[CALIBRATION..CALIBRATION + 21].copy_from_slice(&CALIBRATION_FIXTURE);
        device.reset_configuration();

        device
    }

    /// Stores a new sample and raises the data ready flags.
    pub fn trigger_conversion(&mut self, data: &[u8; 6]) {
        self.regs[DATA..DATA + 6].copy_from_slice(data);
        self.regs[STATUS] |= 0b0110_0000;
        self.regs[INT_STATUS] |= 0b1000;
    }

    /// Number of reads issued since creation.
    pub fn reads_so_far(&self) -> usize {
        self.reads
    }

    /// Number of reads of `reg` seen so far.
    pub fn reads_of(&self, reg: u8) -> usize {
        self.log.iter().filter(|t| matches!(t, Transaction::Read { reg: r, .. } if *r == reg)).count()
    }

    fn reset_configuration(&mut self) {
        self.regs[INT_CTRL] = 0x02;
        self.regs[IF_CONF] = 0x00;
        self.regs[PWR_CTRL] = 0x00;
        self.regs[OSR] = 0x02;
        self.regs[ODR] = 0x00;
        self.regs[CONFIG] = 0x00;
    }

    fn read_fails(&mut self, reg: u8) -> bool {
        let index = self.reads;
        self.reads += 1;

        self.fail_register == Some(reg) || self.fail_nth_read == Some(index)
    }
}

impl Interface for FakeDevice {
    const KIND: InterfaceKind = InterfaceKind::I2c;

    async fn read(&mut self, reg: u8, buf: &mut [u8], selector: &DeviceAddress) -> TransportResult {
        let _ = self.log.push(Transaction::Read { reg, len: buf.len() });
        if *selector != self.address || self.read_fails(reg) {
            return Err(CommFail);
        }

        let start = reg as usize;
        buf.copy_from_slice(&self.regs[start..start + buf.len()]);

        match start {
            ERR_REG | EVENT | INT_STATUS => self.regs[start] = 0,
            DATA => self.regs[STATUS] &= !0b0110_0000,
            _ => {}
        }

        Ok(())
    }

    async fn write(&mut self, reg: u8, data: &[u8], selector: &DeviceAddress) -> TransportResult {
        let _ = self.log.push(Transaction::Write { reg, value: data[0] });
        if *selector != self.address {
            return Err(CommFail);
        }

        if reg == CMD {
            if self.reject_commands {
                self.regs[ERR_REG] |= 0b010;
            } else if data[0] == 0xB6 {
                self.reset_configuration();
                self.regs[EVENT] |= 0b01;
            }
            return Ok(());
        }

        let start = reg as usize;
        self.regs[start..start + data.len()].copy_from_slice(data);

        if start == PWR_CTRL && (data[0] >> 4) & 0b11 == 0b11 && self.reject_normal_mode {
            self.regs[ERR_REG] |= 0b100;
        }

        Ok(())
    }

    async fn delay_us(&mut self, period: u32) {
        let _ = self.delays.push(period);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryAccess {
    Read { address: u16, reg: u8, len: usize, timeout_ms: u32 },
    Write { address: u16, reg: u8, value: u8, timeout_ms: u32 },
}

/// Records every access and answers reads with a fixed response.
pub struct FakeMemoryBus {
    pub accesses: Vec<MemoryAccess, 16>,
    pub fail: bool,
    response: Vec<u8, 32>,
}

impl FakeMemoryBus {
    pub fn new() -> Self {
        Self { accesses: Vec::new(), fail: false, response: Vec::new() }
    }

    pub fn respond_with(&mut self, data: &[u8]) {
        self.response.clear();
        let _ = self.response.extend_from_slice(data);
    }
}

impl MemoryBus for FakeMemoryBus {
    type Error = ErrorKind;

    async fn mem_read(&mut self, address: u16, reg: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), Self::Error> {
        let _ = self.accesses.push(MemoryAccess::Read { address, reg, len: buf.len(), timeout_ms });
        if self.fail {
            return Err(ErrorKind::Other);
        }
        buf.copy_from_slice(&self.response[..buf.len()]);

        Ok(())
    }

    async fn mem_write(&mut self, address: u16, reg: u8, data: &[u8], timeout_ms: u32) -> Result<(), Self::Error> {
        let _ = self.accesses.push(MemoryAccess::Write { address, reg, value: data[0], timeout_ms });
        if self.fail {
            return Err(ErrorKind::Other);
        }

        Ok(())
    }
}

/// `embedded-hal-async` I2C bus that records addresses and written bytes.
pub struct FakeI2c {
    pub addresses: Vec<SevenBitAddress, 16>,
    pub written: Vec<u8, 64>,
    response: Vec<u8, 32>,
}

impl FakeI2c {
    pub fn new() -> Self {
        Self { addresses: Vec::new(), written: Vec::new(), response: Vec::new() }
    }

    pub fn respond_with(&mut self, data: &[u8]) {
        self.response.clear();
        let _ = self.response.extend_from_slice(data);
    }
}

impl ErrorType for FakeI2c {
    type Error = ErrorKind;
}

impl I2c for FakeI2c {
    async fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        let _ = self.addresses.push(address);
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let _ = self.written.extend_from_slice(bytes);
                }
                Operation::Read(buf) => {
                    let len = buf.len();
                    buf.copy_from_slice(&self.response[..len]);
                }
            }
        }

        Ok(())
    }
}

/// Records requested millisecond delays without waiting.
pub struct FakeDelay {
    pub ms: Vec<u32, 16>,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self { ms: Vec::new() }
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, _: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        let _ = self.ms.push(ms);
    }
}
