//! Register-level driver for the BMP3 family.
//!
//! [`Bmp3`] borrows a transport and the resolved device address for the length of one
//! operation sequence. It implements the generic sensor contract the session and the
//! acquisition engine are built on: chip identification, soft reset, settings commit, power
//! mode changes, status and compensated data fetch.

use log::{debug, info, warn};

use crate::acquisition::RawSample;
use crate::bus::{DeviceAddress, Interface};
use crate::calibration::CalibrationData;
use crate::config::{Configuration, SettingsSelect};
use crate::error::Error;
use crate::register::calibration::Calibration;
use crate::register::chip_id::ChipId;
use crate::register::cmd::{Cmd, CmdData};
use crate::register::config::{Config, ConfigFields};
use crate::register::data::Data;
use crate::register::err_reg::{ErrReg, ErrorFlags};
use crate::register::event::Event;
use crate::register::if_conf::IfConf;
use crate::register::int_ctrl::IntCtrl;
use crate::register::int_status::{IntStatus, IntStatusFlags};
use crate::register::odr::{Odr, OdrCfg, OutputDataRate};
use crate::register::osr::{Osr, Oversampling};
use crate::register::pwr_ctrl::{PowerMode, PwrCtrl};
use crate::register::status::{SensorStatus, Status};
use crate::register::{Readable, Writable, MAX_REG_BYTES};

pub const BMP388_CHIP_ID: u8 = 0x50;
pub const BMP390_CHIP_ID: u8 = 0x60;

/// Time the sensor needs to come back from a soft reset, in microseconds.
const SOFT_RESET_DELAY_US: u32 = 2_000;
/// Time the sensor needs to settle in sleep mode before a new mode is entered, in microseconds.
const SLEEP_SETTLE_DELAY_US: u32 = 5_000;

/// What [`Bmp3::init`] learns about the device.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeviceInfo {
    pub chip_id: u8,
    pub calibration: CalibrationData,
}

/// Point in time snapshot of every status source on the device.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// INT_STATUS. Reading it acknowledges the interrupt.
    pub intr: IntStatusFlags,
    /// STATUS
    pub sensor: SensorStatus,
    /// ERR_REG
    pub err: ErrorFlags,
    /// EVENT.por_detected
    pub power_on_reset: bool,
}

pub struct Bmp3<'a, T> {
    transport: &'a mut T,
    address: DeviceAddress,
}

impl<'a, T: Interface> Bmp3<'a, T> {
    pub fn new(transport: &'a mut T, address: DeviceAddress) -> Self {
        Self { transport, address }
    }

    /// Reads a register (or fixed-size register block) using a typed marker from [`crate::register`].
    pub async fn read<R: Readable>(&mut self) -> Result<R::Out, Error> {
        let mut buffer = [0u8; MAX_REG_BYTES];
        let data = &mut buffer[..R::N];
        self.transport.read(R::ADDR, data, &self.address).await?;

        Ok(R::decode(data)?)
    }

    /// Writes a register using a typed marker from [`crate::register`].
    pub async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Error> {
        let mut buffer = [0u8; MAX_REG_BYTES];
        let data = &mut buffer[..W::N];
        W::encode(v, data);

        Ok(self.transport.write(W::ADDR, data, &self.address).await?)
    }

    /// Identifies the chip, soft resets it and loads the calibration coefficients.
    pub async fn init(&mut self) -> Result<DeviceInfo, Error> {
        let chip_id = self.read::<ChipId>().await?;
        if chip_id != BMP388_CHIP_ID && chip_id != BMP390_CHIP_ID {
            warn!("unexpected chip id {:#04x} at address {:#04x}", chip_id, self.address.value());
            return Err(Error::DeviceNotFound(chip_id));
        }

        self.soft_reset().await?;

        let nvm = self.read::<Calibration>().await?;
        debug!("loaded calibration of chip {:#04x}", chip_id);

        Ok(DeviceInfo {
            chip_id,
            calibration: CalibrationData::from_nvm(&nvm),
        })
    }

    /// Triggers a soft reset
    ///
    /// All user settings are reset to their default state. Fails with [`Error::CommandFailed`]
    /// if the command decoder is busy or flags the command as failed.
    pub async fn soft_reset(&mut self) -> Result<(), Error> {
        let status = self.read::<Status>().await?;
        if !status.command_decoder_ready() {
            return Err(Error::CommandFailed);
        }

        self.write::<Cmd>(&CmdData::SoftReset).await?;
        self.transport.delay_us(SOFT_RESET_DELAY_US).await;

        if self.read::<ErrReg>().await?.command_error() {
            return Err(Error::CommandFailed);
        }

        Ok(())
    }

    /// Writes the fields named by `select` from `config` to the device.
    ///
    /// Oversampling and ODR are validated against each other before anything is written when
    /// the configuration targets normal mode. Registers are updated read-modify-write so that
    /// unselected fields keep their current value. The power mode is left untouched, use
    /// [`set_op_mode`](Self::set_op_mode) for that.
    pub async fn set_sensor_settings(&mut self, select: SettingsSelect, config: &Configuration) -> Result<(), Error> {
        let timing = SettingsSelect::PRESS_EN | SettingsSelect::TEMP_EN
            | SettingsSelect::PRESS_OS | SettingsSelect::TEMP_OS | SettingsSelect::ODR;
        if config.mode == PowerMode::Normal && select.intersects(timing) {
            validate_odr_osr(
                config.enable_pressure,
                config.enable_temperature,
                config.pressure_oversampling,
                config.temperature_oversampling,
                config.output_data_rate,
            )?;
        }

        if select.intersects(SettingsSelect::PRESS_EN | SettingsSelect::TEMP_EN) {
            let mut pwr_ctrl = self.read::<PwrCtrl>().await?;
            if select.contains(SettingsSelect::PRESS_EN) {
                pwr_ctrl.press_en = config.enable_pressure;
            }
            if select.contains(SettingsSelect::TEMP_EN) {
                pwr_ctrl.temp_en = config.enable_temperature;
            }
            self.write::<PwrCtrl>(&pwr_ctrl).await?;
        }

        if select.intersects(SettingsSelect::PRESS_OS | SettingsSelect::TEMP_OS) {
            let mut osr = self.read::<Osr>().await?;
            if select.contains(SettingsSelect::PRESS_OS) {
                osr.osr_p = config.pressure_oversampling;
            }
            if select.contains(SettingsSelect::TEMP_OS) {
                osr.osr_t = config.temperature_oversampling;
            }
            self.write::<Osr>(&osr).await?;
        }

        if select.contains(SettingsSelect::ODR) {
            self.write::<Odr>(&OdrCfg { odr_sel: config.output_data_rate }).await?;
        }

        if select.contains(SettingsSelect::IIR_FILTER) {
            self.write::<Config>(&ConfigFields { iir_filter: config.iir_filter_coefficient }).await?;
        }

        let int_fields = SettingsSelect::DRDY_EN | SettingsSelect::OUTPUT_MODE
            | SettingsSelect::LEVEL | SettingsSelect::LATCH;
        if select.intersects(int_fields) {
            let mut int_ctrl = self.read::<IntCtrl>().await?;
            if select.contains(SettingsSelect::DRDY_EN) {
                int_ctrl.drdy_en = config.data_ready_interrupt;
            }
            if select.contains(SettingsSelect::OUTPUT_MODE) {
                int_ctrl.int_od = config.int_open_drain;
            }
            if select.contains(SettingsSelect::LEVEL) {
                int_ctrl.int_level = config.int_active_high;
            }
            if select.contains(SettingsSelect::LATCH) {
                int_ctrl.int_latch = config.int_latch;
            }
            self.write::<IntCtrl>(&int_ctrl).await?;
        }

        if select.intersects(SettingsSelect::I2C_WDT_EN | SettingsSelect::I2C_WDT) {
            let mut if_conf = self.read::<IfConf>().await?;
            if select.contains(SettingsSelect::I2C_WDT_EN) {
                if_conf.i2c_wdt_en = config.i2c_watchdog.is_some();
            }
            if select.contains(SettingsSelect::I2C_WDT) {
                if let Some(timer) = config.i2c_watchdog {
                    if_conf.i2c_wdt_sel = timer;
                }
            }
            self.write::<IfConf>(&if_conf).await?;
        }

        debug!("committed settings {:#06x}", select.bits());
        Ok(())
    }

    /// Sets the power mode of the device.
    ///
    /// The device only accepts Sleep => Normal and Sleep => Forced, so a device that is not
    /// asleep is put to sleep first. Before entering normal mode, the oversampling and ODR
    /// currently held by the device are checked against each other, and ERR_REG is checked
    /// afterwards for a configuration error.
    pub async fn set_op_mode(&mut self, mode: PowerMode) -> Result<(), Error> {
        let mut pwr_ctrl = self.read::<PwrCtrl>().await?;
        if pwr_ctrl.mode != PowerMode::Sleep {
            pwr_ctrl.mode = PowerMode::Sleep;
            self.write::<PwrCtrl>(&pwr_ctrl).await?;
            self.transport.delay_us(SLEEP_SETTLE_DELAY_US).await;
        }

        match mode {
            PowerMode::Sleep => {}
            PowerMode::Forced => {
                pwr_ctrl.mode = PowerMode::Forced;
                self.write::<PwrCtrl>(&pwr_ctrl).await?;
            }
            PowerMode::Normal => {
                let osr = self.read::<Osr>().await?;
                let odr = self.read::<Odr>().await?;
                let mut pwr_ctrl = self.read::<PwrCtrl>().await?;
                validate_odr_osr(pwr_ctrl.press_en, pwr_ctrl.temp_en, osr.osr_p, osr.osr_t, odr.odr_sel)?;

                pwr_ctrl.mode = PowerMode::Normal;
                self.write::<PwrCtrl>(&pwr_ctrl).await?;

                if self.read::<ErrReg>().await?.configuration_error() {
                    return Err(Error::ConfigurationError);
                }
            }
        }

        info!("sensor entered {:?} mode", mode);
        Ok(())
    }

    /// Reads the current power mode from the PWR_CTRL (0x1B) register
    pub async fn op_mode(&mut self) -> Result<PowerMode, Error> {
        Ok(self.read::<PwrCtrl>().await?.mode)
    }

    /// Reads STATUS, EVENT, INT_STATUS and ERR_REG.
    ///
    /// **Note:** INT_STATUS, EVENT and the error flags are cleared by this read.
    pub async fn status(&mut self) -> Result<StatusFlags, Error> {
        let sensor = self.read::<Status>().await?;
        let event = self.read::<Event>().await?;
        let intr = self.read::<IntStatus>().await?;
        let err = self.read::<ErrReg>().await?;

        Ok(StatusFlags {
            intr,
            sensor,
            err,
            power_on_reset: event.por_detected,
        })
    }

    /// Reads pressure and temperature in one burst and compensates them.
    pub async fn sensor_data(&mut self, calibration: &CalibrationData) -> Result<RawSample, Error> {
        let sample = self.read::<Data>().await?;

        Ok(calibration.compensate(&sample))
    }
}

/// Typical measurement time in microseconds, datasheet section 3.9.2.
pub fn measurement_time_us(
    pressure_enabled: bool,
    temperature_enabled: bool,
    pressure_oversampling: Oversampling,
    temperature_oversampling: Oversampling,
) -> u32 {
    234u32
        + pressure_enabled as u32 * (392 + (1u32 << pressure_oversampling.exponent()) * 2020)
        + temperature_enabled as u32 * (163 + (1u32 << temperature_oversampling.exponent()) * 2020)
}

/// A conversion has to finish within one ODR period.
fn validate_odr_osr(
    pressure_enabled: bool,
    temperature_enabled: bool,
    pressure_oversampling: Oversampling,
    temperature_oversampling: Oversampling,
    odr: OutputDataRate,
) -> Result<(), Error> {
    let time = measurement_time_us(pressure_enabled, temperature_enabled, pressure_oversampling, temperature_oversampling);
    if time < odr.period_us() {
        Ok(())
    } else {
        warn!("measurement time {} us does not fit the {:?} period of {} us", time, odr, odr.period_us());
        Err(Error::InvalidOdrOsr)
    }
}
