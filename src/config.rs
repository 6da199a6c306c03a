use core::ops::BitOr;

use crate::register::config::IIRFilterCoefficient;
use crate::register::if_conf::I2cWatchdogTimer;
use crate::register::odr::OutputDataRate;
use crate::register::osr::Oversampling;
use crate::register::pwr_ctrl::PowerMode;

/// Operating point of the sensor, committed in one go by the device session.
///
/// [`Default`] is the altimeter reference setup: normal mode, both channels on, pressure 8x /
/// temperature 1x oversampling, IIR coefficient 3, 50 Hz and the data ready interrupt enabled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) enable_pressure: bool,
    pub(crate) enable_temperature: bool,
    pub(crate) mode: PowerMode,
    pub(crate) output_data_rate: OutputDataRate,
    pub(crate) pressure_oversampling: Oversampling,
    pub(crate) temperature_oversampling: Oversampling,
    pub(crate) iir_filter_coefficient: IIRFilterCoefficient,
    pub(crate) data_ready_interrupt: bool,
    pub(crate) int_open_drain: bool,
    pub(crate) int_active_high: bool,
    pub(crate) int_latch: bool,
    pub(crate) i2c_watchdog: Option<I2cWatchdogTimer>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enable_pressure: true,
            enable_temperature: true,
            mode: PowerMode::Normal,
            output_data_rate: OutputDataRate::R50Hz,
            iir_filter_coefficient: IIRFilterCoefficient::Coef3,
            pressure_oversampling: Oversampling::X8,
            temperature_oversampling: Oversampling::X1,
            data_ready_interrupt: true,
            int_open_drain: false,
            int_active_high: true,
            int_latch: false,
            i2c_watchdog: None,
        }
    }
}

impl Configuration {
    pub fn enable_pressure_measurement(mut self, enable: bool) -> Self {
        self.enable_pressure = enable;

        self
    }

    /// Enables or disables temperature measurements.
    /// Pressure compensation needs the temperature of the same conversion, so disabling it
    /// leaves pressure readings compensated against a stale temperature value.
    pub fn enable_temperature_measurement(mut self, enable: bool) -> Self {
        self.enable_temperature = enable;

        self
    }

    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.mode = power_mode;

        self
    }

    pub fn output_data_rate(mut self, output_data_rate: OutputDataRate) -> Self {
        self.output_data_rate = output_data_rate;

        self
    }

    pub fn iir_filter_coefficient(mut self, filter_coefficient: IIRFilterCoefficient) -> Self {
        self.iir_filter_coefficient = filter_coefficient;

        self
    }

    pub fn pressure_oversampling(mut self, pressure_oversampling: Oversampling) -> Self {
        self.pressure_oversampling = pressure_oversampling;

        self
    }

    pub fn temperature_oversampling(mut self, temperature_oversampling: Oversampling) -> Self {
        self.temperature_oversampling = temperature_oversampling;

        self
    }

    /// Routes "new data stored" to the INT pin and INT_STATUS.
    pub fn data_ready_interrupt(mut self, enable: bool) -> Self {
        self.data_ready_interrupt = enable;

        self
    }

    /// Electrical configuration of the INT pin.
    pub fn interrupt_pin(mut self, open_drain: bool, active_high: bool, latch: bool) -> Self {
        self.int_open_drain = open_drain;
        self.int_active_high = active_high;
        self.int_latch = latch;

        self
    }

    /// Enables the I2C watchdog with the given timeout, or disables it with [`None`].
    pub fn i2c_watchdog(mut self, timer: Option<I2cWatchdogTimer>) -> Self {
        self.i2c_watchdog = timer;

        self
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    /// Is the INT pin asserted high?
    pub fn interrupt_active_high(&self) -> bool {
        self.int_active_high
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::HandheldLowPower => Configuration::default()
                .output_data_rate(OutputDataRate::R12p5Hz),
            Preset::HandheldDynamic => Configuration::default()
                .pressure_oversampling(Oversampling::X4)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef15),
            Preset::WeatherMonitoring => Configuration::default()
                .power_mode(PowerMode::Forced)
                .pressure_oversampling(Oversampling::X1)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef0)
                .output_data_rate(OutputDataRate::R0p01Hz),
            Preset::DropDetection => Configuration::default()
                .pressure_oversampling(Oversampling::X2)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef0)
                .output_data_rate(OutputDataRate::R100Hz),
            Preset::IndoorNavigation => Configuration::default()
                .pressure_oversampling(Oversampling::X16)
                .temperature_oversampling(Oversampling::X2)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef15)
                .output_data_rate(OutputDataRate::R25Hz),
            Preset::Drone => Configuration::default(),
            Preset::IndoorLocalization => Configuration::default()
                .pressure_oversampling(Oversampling::X1)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef15)
                .output_data_rate(OutputDataRate::R0p78Hz),
        }
    }
}

/// Recommended operating points, datasheet section 3.5.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    HandheldLowPower,
    HandheldDynamic,
    WeatherMonitoring,
    DropDetection,
    IndoorNavigation,
    Drone,
    IndoorLocalization,
}

/// Selects which [`Configuration`] fields a settings commit writes to the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SettingsSelect(u16);

impl SettingsSelect {
    pub const PRESS_EN: SettingsSelect = SettingsSelect(1 << 1);
    pub const TEMP_EN: SettingsSelect = SettingsSelect(1 << 2);
    pub const DRDY_EN: SettingsSelect = SettingsSelect(1 << 3);
    pub const PRESS_OS: SettingsSelect = SettingsSelect(1 << 4);
    pub const TEMP_OS: SettingsSelect = SettingsSelect(1 << 5);
    pub const IIR_FILTER: SettingsSelect = SettingsSelect(1 << 6);
    pub const ODR: SettingsSelect = SettingsSelect(1 << 7);
    pub const OUTPUT_MODE: SettingsSelect = SettingsSelect(1 << 8);
    pub const LEVEL: SettingsSelect = SettingsSelect(1 << 9);
    pub const LATCH: SettingsSelect = SettingsSelect(1 << 10);
    pub const I2C_WDT_EN: SettingsSelect = SettingsSelect(1 << 11);
    pub const I2C_WDT: SettingsSelect = SettingsSelect(1 << 12);

    /// The fields every commit must carry.
    pub const REQUIRED: SettingsSelect = SettingsSelect(
        Self::PRESS_EN.0 | Self::TEMP_EN.0 | Self::DRDY_EN.0 | Self::PRESS_OS.0 | Self::TEMP_OS.0 | Self::ODR.0
    );

    /// Every field of [`Configuration`].
    pub const ALL: SettingsSelect = SettingsSelect(
        Self::REQUIRED.0 | Self::IIR_FILTER.0 | Self::OUTPUT_MODE.0 | Self::LEVEL.0 | Self::LATCH.0
            | Self::I2C_WDT_EN.0 | Self::I2C_WDT.0
    );

    pub const fn empty() -> Self {
        SettingsSelect(0)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Are all bits of `other` selected?
    pub const fn contains(&self, other: SettingsSelect) -> bool {
        self.0 & other.0 == other.0
    }

    /// Is any bit of `other` selected?
    pub const fn intersects(&self, other: SettingsSelect) -> bool {
        self.0 & other.0 != 0
    }

    /// Required bits not present in this selection.
    pub const fn missing_required(&self) -> u16 {
        Self::REQUIRED.0 & !self.0
    }
}

impl BitOr for SettingsSelect {
    type Output = SettingsSelect;

    fn bitor(self, rhs: Self) -> Self::Output {
        SettingsSelect(self.0 | rhs.0)
    }
}
