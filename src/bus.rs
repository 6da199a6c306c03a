//! Transport adapter between the driver and the bus peripheral.
//!
//! The driver talks to the sensor through the [`Interface`] capability: register-addressed reads
//! and writes plus a microsecond delay. [`I2cTransport`] implements it on top of any
//! register-addressed [`MemoryBus`], and [`HalI2c`] turns an `embedded-hal-async` I2C bus into one.
//!
//! Every peripheral outcome collapses into a [`TransportResult`]: success or [`CommFail`].
//! Nothing here retries.

use core::fmt::Debug;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, Operation, SevenBitAddress};
use log::warn;

/// Timeout handed to the peripheral for every transaction, in milliseconds.
pub const BUS_TIMEOUT_MS: u32 = 1000;

/// The single failure a transport reports: the transaction did not complete.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommFail;

impl CommFail {
    /// Vendor status code for a failed bus transaction.
    pub const CODE: i8 = -2;
}

/// Outcome of a transport transaction.
pub type TransportResult = Result<(), CommFail>;

/// Maps a [`TransportResult`] to the two-valued status code: `0` or `-2`.
pub fn transport_code(result: &TransportResult) -> i8 {
    match result {
        Ok(()) => 0,
        Err(_) => CommFail::CODE,
    }
}

/// Serial interfaces the sensor can be wired to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    I2c,
    Spi,
}

/// This enum should reflect the physical state of the SDO pin. This is used to determine the I2C address
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SdoPinState {
    /// SDO is pulled high by connection to VDDIO
    High,
    /// SDO is pulled low by connection to GND
    Low,
}

/// 7-bit bus address of the sensor, resolved from the SDO strap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// SDO tied low.
    pub const PRIMARY: DeviceAddress = DeviceAddress(0x76);
    /// SDO tied high.
    pub const SECONDARY: DeviceAddress = DeviceAddress(0x77);

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The address as placed on the wire, shifted left to leave room for the R/W bit.
    pub fn bus_address(&self) -> u16 {
        (self.0 as u16) << 1
    }
}

impl From<SdoPinState> for DeviceAddress {
    fn from(sdo: SdoPinState) -> Self {
        match sdo {
            SdoPinState::High => DeviceAddress::SECONDARY,
            SdoPinState::Low => DeviceAddress::PRIMARY,
        }
    }
}

/// The capability set the driver needs from its environment.
///
/// `selector` identifies the device on the bus and is lent for the duration of each call.
pub trait Interface {
    /// The interface kind this transport drives.
    const KIND: InterfaceKind;

    /// Reads `buf.len()` bytes starting at register `reg`.
    fn read(&mut self, reg: u8, buf: &mut [u8], selector: &DeviceAddress) -> impl Future<Output = TransportResult>;

    /// Writes `data` starting at register `reg`.
    fn write(&mut self, reg: u8, data: &[u8], selector: &DeviceAddress) -> impl Future<Output = TransportResult>;

    /// Waits for at least `period` microseconds, subject to the transport's delay resolution.
    fn delay_us(&mut self, period: u32) -> impl Future<Output = ()>;
}

/// A register-addressed ("memory") bus peripheral.
///
/// `address` is the 8-bit wire address (7-bit address shifted left by one).
pub trait MemoryBus {
    type Error: Debug;

    fn mem_read(&mut self, address: u16, reg: u8, buf: &mut [u8], timeout_ms: u32) -> impl Future<Output = Result<(), Self::Error>>;

    fn mem_write(&mut self, address: u16, reg: u8, data: &[u8], timeout_ms: u32) -> impl Future<Output = Result<(), Self::Error>>;
}

/// [`MemoryBus`] over an `embedded-hal-async` I2C bus.
///
/// The HAL traits carry no per-transaction timeout, so `timeout_ms` is left to the HAL
/// implementation's own configuration.
pub struct HalI2c<I> {
    i2c: I,
}

impl<I: I2c> HalI2c<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> MemoryBus for HalI2c<I> {
    type Error = I::Error;

    async fn mem_read(&mut self, address: u16, reg: u8, buf: &mut [u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.i2c.write_read((address >> 1) as SevenBitAddress, &[reg], buf).await
    }

    async fn mem_write(&mut self, address: u16, reg: u8, data: &[u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.i2c.transaction(
            (address >> 1) as SevenBitAddress,
            &mut [Operation::Write(&[reg]), Operation::Write(data)],
        ).await
    }
}

/// I2C implementation of [`Interface`].
pub struct I2cTransport<P, D> {
    bus: P,
    delay: D,
}

impl<P: MemoryBus, D: DelayNs> I2cTransport<P, D> {
    pub fn new(bus: P, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Gives back the peripheral and the delay provider.
    pub fn release(self) -> (P, D) {
        (self.bus, self.delay)
    }
}

impl<I: I2c, D: DelayNs> I2cTransport<HalI2c<I>, D> {
    /// Shorthand for wrapping an `embedded-hal-async` I2C bus.
    pub fn from_hal(i2c: I, delay: D) -> Self {
        Self::new(HalI2c::new(i2c), delay)
    }
}

impl<P: MemoryBus, D: DelayNs> Interface for I2cTransport<P, D> {
    const KIND: InterfaceKind = InterfaceKind::I2c;

    async fn read(&mut self, reg: u8, buf: &mut [u8], selector: &DeviceAddress) -> TransportResult {
        self.bus.mem_read(selector.bus_address(), reg, buf, BUS_TIMEOUT_MS).await.map_err(|e| {
            warn!("i2c read of {} bytes from register {:#04x} failed: {:?}", buf.len(), reg, e);
            CommFail
        })
    }

    async fn write(&mut self, reg: u8, data: &[u8], selector: &DeviceAddress) -> TransportResult {
        self.bus.mem_write(selector.bus_address(), reg, data, BUS_TIMEOUT_MS).await.map_err(|e| {
            warn!("i2c write to register {:#04x} failed: {:?}", reg, e);
            CommFail
        })
    }

    /// Millisecond resolution: `period / 1000` ms, sub-millisecond remainders are dropped.
    async fn delay_us(&mut self, period: u32) {
        self.delay.delay_ms(period / 1000).await
    }
}
