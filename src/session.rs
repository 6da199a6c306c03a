//! The device session: one bound sensor and everything learned about it.
//!
//! A session walks `Unbound -> Bound -> Configured -> Active`:
//!
//! - [`bind`](DeviceSession::bind) resolves the bus address from the SDO strap and checks that the
//!   transport serves the requested interface.
//! - [`configure`](DeviceSession::configure) identifies the chip, soft resets it, loads its
//!   calibration and commits the [`Configuration`].
//! - [`activate`](DeviceSession::activate) switches the sensor into the configured power mode.
//!
//! Any failure while binding, configuring or activating leaves the session `Faulted`. A faulted
//! session refuses further work until its transport is taken back with
//! [`release`](DeviceSession::release).
//!
//! # Examples
//!
//! ```rust,no_run
//! # use embedded_hal_async::delay::DelayNs;
//! # use embedded_hal_async::i2c::I2c;
//! use bmp388_altimeter::{DeviceSession, Error, Reading};
//! use bmp388_altimeter::acquisition::{acquire, Acquisition};
//! use bmp388_altimeter::bus::{I2cTransport, InterfaceKind, SdoPinState};
//! use bmp388_altimeter::config::Configuration;
//! # async fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Result<(), Error> {
//!
//! let mut session = DeviceSession::new(I2cTransport::from_hal(i2c, delay));
//! session.init(InterfaceKind::I2c, SdoPinState::Low, Configuration::default()).await?;
//!
//! let mut reading = Reading::default();
//! if acquire(&mut session, &mut reading).await == Acquisition::Updated {
//!     println!("{} m", reading.altitude);
//! }
//! # Ok(()) }
//! ```

use log::{debug, error, info};

use crate::bmp3::{Bmp3, DeviceInfo};
use crate::bus::{DeviceAddress, Interface, InterfaceKind, SdoPinState};
use crate::calibration::CalibrationData;
use crate::config::{Configuration, SettingsSelect};
use crate::error::Error;
use crate::register::{Readable, Writable};

/// Standard atmosphere at sea level, in hPa.
pub const STANDARD_SEA_LEVEL_HPA: f32 = 1013.25;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No address resolved yet.
    Unbound,
    /// Address resolved, device not yet initialised.
    Bound,
    /// Device identified, calibrated and configured, still asleep.
    Configured,
    /// Device running in its configured power mode.
    Active,
    /// A bind, configure or activate step failed.
    Faulted,
}

pub struct DeviceSession<T> {
    transport: Option<T>,
    address: Option<DeviceAddress>,
    state: SessionState,
    device: Option<DeviceInfo>,
    config: Configuration,
    committed: SettingsSelect,
    sea_level_hpa: f32,
}

impl<T: Interface> DeviceSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Some(transport),
            address: None,
            state: SessionState::Unbound,
            device: None,
            config: Configuration::default(),
            committed: SettingsSelect::empty(),
            sea_level_hpa: STANDARD_SEA_LEVEL_HPA,
        }
    }

    /// Resolves the device address from the SDO strap and attaches the transport.
    ///
    /// Rebinding forgets the chip identity and calibration, so the session has to be
    /// configured again.
    pub fn bind(&mut self, kind: InterfaceKind, sdo: SdoPinState) -> Result<DeviceAddress, Error> {
        if self.state == SessionState::Faulted {
            return Err(Error::InvalidState { expected: SessionState::Unbound, actual: self.state });
        }
        if self.transport.is_none() {
            return self.fault(Error::NullReference);
        }
        if kind != T::KIND {
            return self.fault(Error::UnsupportedInterface(kind));
        }

        let address = DeviceAddress::from(sdo);
        self.address = Some(address);
        self.device = None;
        self.committed = SettingsSelect::empty();
        self.state = SessionState::Bound;
        debug!("bound {:?} device at {:#04x}", kind, address.value());

        Ok(address)
    }

    /// Initialises the device and commits the required fields of `config`.
    ///
    /// Only [`SettingsSelect::REQUIRED`] is written: channel enables, oversampling, ODR and the
    /// data ready interrupt. The IIR filter, INT pin electrics and I2C watchdog keep their reset
    /// values; use [`configure_selected`](Self::configure_selected) with
    /// [`SettingsSelect::ALL`] to apply them too.
    pub async fn configure(&mut self, config: Configuration) -> Result<(), Error> {
        self.configure_selected(config, SettingsSelect::REQUIRED).await
    }

    /// Initialises the device and commits the fields of `config` named by `select`.
    ///
    /// `select` has to contain [`SettingsSelect::REQUIRED`]; a partial selection is rejected with
    /// [`Error::PartialSettings`] before the bus is touched.
    pub async fn configure_selected(&mut self, config: Configuration, select: SettingsSelect) -> Result<(), Error> {
        self.expect_state(SessionState::Bound)?;
        if !select.contains(SettingsSelect::REQUIRED) {
            return Err(Error::PartialSettings(select.missing_required()));
        }

        let result = self.initialise(&config, select).await;
        match result {
            Ok(info) => {
                self.device = Some(info);
                self.config = config;
                self.committed = select;
                self.state = SessionState::Configured;
                info!("configured chip {:#04x}", info.chip_id);
                Ok(())
            }
            Err(e) => self.fault(e),
        }
    }

    /// Switches the device into the configured power mode.
    pub async fn activate(&mut self) -> Result<(), Error> {
        self.expect_state(SessionState::Configured)?;

        let mode = self.config.mode;
        let result = match self.bmp3() {
            Ok(mut device) => device.set_op_mode(mode).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.state = SessionState::Active;
                Ok(())
            }
            Err(e) => self.fault(e),
        }
    }

    /// Bind, configure and activate in one go.
    pub async fn init(&mut self, kind: InterfaceKind, sdo: SdoPinState, config: Configuration) -> Result<(), Error> {
        self.bind(kind, sdo)?;
        self.configure(config).await?;
        self.activate().await
    }

    /// Takes the transport back and returns the session to `Unbound`.
    pub fn release(&mut self) -> Option<T> {
        self.address = None;
        self.device = None;
        self.state = SessionState::Unbound;

        self.transport.take()
    }

    /// Reads a register using a typed marker from [`crate::register`].
    ///
    /// Available once the session is bound. Some registers have **clear-on-read** semantics
    /// (e.g. `INT_STATUS`), reading them here hides events from the acquisition engine.
    pub async fn read<R: Readable>(&mut self) -> Result<R::Out, Error> {
        self.bmp3()?.read::<R>().await
    }

    /// Writes a register using a typed marker from [`crate::register`].
    ///
    /// This bypasses the session's configuration bookkeeping.
    pub async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Error> {
        self.bmp3()?.write::<W>(v).await
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn address(&self) -> Option<DeviceAddress> {
        self.address
    }

    /// Chip id read during configuration.
    pub fn chip_id(&self) -> Option<u8> {
        self.device.map(|d| d.chip_id)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Reference pressure at sea level (QNH) in hPa, used for altitude.
    pub fn sea_level_pressure(&self) -> f32 {
        self.sea_level_hpa
    }

    /// Sets the sea level reference pressure in hPa.
    ///
    /// Rejects values that are not finite or not above zero, the previous reference is kept.
    pub fn set_sea_level_pressure(&mut self, hpa: f32) -> Result<(), Error> {
        if !hpa.is_finite() || hpa <= 0.0 {
            return Err(Error::InvalidSeaLevelPressure);
        }
        self.sea_level_hpa = hpa;

        Ok(())
    }

    /// Fields of the configuration that the last successful configure wrote to the device.
    pub fn committed_settings(&self) -> SettingsSelect {
        self.committed
    }

    /// Whether the INT pin is active high on the device.
    ///
    /// Follows the configuration when its level was committed, otherwise the reset value
    /// (active high).
    pub fn interrupt_active_high(&self) -> bool {
        !self.committed.contains(SettingsSelect::LEVEL) || self.config.interrupt_active_high()
    }

    /// The driver and calibration of an active session.
    pub(crate) fn active_device(&mut self) -> Option<(Bmp3<'_, T>, &CalibrationData)> {
        if self.state != SessionState::Active {
            return None;
        }
        let address = self.address?;
        let info = self.device.as_ref()?;
        let transport = self.transport.as_mut()?;

        Some((Bmp3::new(transport, address), &info.calibration))
    }

    #[cfg(test)]
    pub(crate) fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    async fn initialise(&mut self, config: &Configuration, select: SettingsSelect) -> Result<DeviceInfo, Error> {
        let mut device = self.bmp3()?;
        let info = device.init().await?;
        device.set_sensor_settings(select, config).await?;

        Ok(info)
    }

    fn bmp3(&mut self) -> Result<Bmp3<'_, T>, Error> {
        let Some(address) = self.address else {
            return Err(Error::InvalidState { expected: SessionState::Bound, actual: self.state });
        };
        let transport = self.transport.as_mut().ok_or(Error::NullReference)?;

        Ok(Bmp3::new(transport, address))
    }

    fn expect_state(&self, expected: SessionState) -> Result<(), Error> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState { expected, actual: self.state })
        }
    }

    fn fault<R>(&mut self, e: Error) -> Result<R, Error> {
        error!("device session faulted in state {:?}: {} (code {})", self.state, e, e.code());
        self.state = SessionState::Faulted;

        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::chip_id::ChipId;
    use crate::register::odr::OutputDataRate;
    use crate::register::osr::Oversampling;
    use crate::register::pwr_ctrl::PowerMode;
    use crate::testing::{FakeDevice, Transaction};

    #[test]
    fn bind_resolves_strap_address() {
        let mut session = DeviceSession::new(FakeDevice::new());
        assert_eq!(Ok(DeviceAddress::PRIMARY), session.bind(InterfaceKind::I2c, SdoPinState::Low));
        assert_eq!(SessionState::Bound, session.state());

        assert_eq!(Ok(DeviceAddress::SECONDARY), session.bind(InterfaceKind::I2c, SdoPinState::High));
        assert_eq!(Some(0x77), session.address().map(|a| a.value()));
    }

    #[test]
    fn bind_rejects_unsupported_interface() {
        let mut session = DeviceSession::new(FakeDevice::new());
        assert_eq!(
            Err(Error::UnsupportedInterface(InterfaceKind::Spi)),
            session.bind(InterfaceKind::Spi, SdoPinState::Low)
        );
        assert_eq!(SessionState::Faulted, session.state());

        assert_eq!(
            Err(Error::InvalidState { expected: SessionState::Unbound, actual: SessionState::Faulted }),
            session.bind(InterfaceKind::I2c, SdoPinState::Low)
        );
    }

    #[test]
    fn bind_without_transport() {
        let mut session = DeviceSession::new(FakeDevice::new());
        assert!(session.release().is_some());

        assert_eq!(Err(Error::NullReference), session.bind(InterfaceKind::I2c, SdoPinState::Low));
        assert_eq!(SessionState::Faulted, session.state());
    }

    #[tokio::test]
    async fn configure_before_bind_is_rejected() {
        let mut session = DeviceSession::new(FakeDevice::new());
        let result = session.configure(Configuration::default()).await;

        assert_eq!(
            Err(Error::InvalidState { expected: SessionState::Bound, actual: SessionState::Unbound }),
            result
        );
        assert_eq!(SessionState::Unbound, session.state());
        let fake = session.release().unwrap();
        assert!(fake.log.is_empty());
    }

    #[tokio::test]
    async fn partial_selection_is_rejected_before_bus_traffic() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();

        let select = SettingsSelect::PRESS_EN | SettingsSelect::TEMP_EN | SettingsSelect::ODR;
        let result = session.configure_selected(Configuration::default(), select).await;

        assert_eq!(Err(Error::PartialSettings(select.missing_required())), result);
        assert_eq!(SessionState::Bound, session.state());
        let fake = session.release().unwrap();
        assert!(fake.log.is_empty());
    }

    #[tokio::test]
    async fn reference_setup_reaches_active() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.init(InterfaceKind::I2c, SdoPinState::Low, Configuration::default()).await.unwrap();

        assert_eq!(SessionState::Active, session.state());
        assert_eq!(Some(0x60), session.chip_id());
        assert_eq!(STANDARD_SEA_LEVEL_HPA, session.sea_level_pressure());

        let fake = session.release().unwrap();
        assert_eq!(0b0011_0011, fake.regs[0x1B]);
        assert_eq!(0b0000_0011, fake.regs[0x1C]);
        assert_eq!(0x02, fake.regs[0x1D]);
        assert_eq!(0b0100_0010, fake.regs[0x19]);
        // IIR filter and interface settings are not part of the default commit
        assert_eq!(0, fake.regs[0x1F]);
        assert!(!fake.log.contains(&Transaction::Write { reg: 0x1F, value: 0b0000_0100 }));
        assert!(!fake.log.iter().any(|t| matches!(t, Transaction::Write { reg: 0x1A, .. })));
    }

    #[tokio::test]
    async fn full_selection_applies_iir_and_pin_settings() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();
        let config = Configuration::default().interrupt_pin(true, false, true);
        session.configure_selected(config, SettingsSelect::ALL).await.unwrap();

        assert_eq!(SettingsSelect::ALL, session.committed_settings());
        assert!(!session.interrupt_active_high());
        let fake = session.release().unwrap();
        assert_eq!(0b0000_0100, fake.regs[0x1F]);
        assert_eq!(0b0100_0101, fake.regs[0x19]);
    }

    #[tokio::test]
    async fn pin_polarity_stays_at_reset_value_unless_committed() {
        let mut session = DeviceSession::new(FakeDevice::new());
        let config = Configuration::default().interrupt_pin(false, false, false);
        session.init(InterfaceKind::I2c, SdoPinState::Low, config).await.unwrap();

        assert_eq!(SettingsSelect::REQUIRED, session.committed_settings());
        assert!(session.interrupt_active_high());
    }

    #[test]
    fn sea_level_pressure_rejects_unusable_values() {
        let mut session = DeviceSession::new(FakeDevice::new());
        for hpa in [0.0, -1013.25, f32::NAN, f32::INFINITY] {
            assert_eq!(Err(Error::InvalidSeaLevelPressure), session.set_sea_level_pressure(hpa));
        }
        assert_eq!(STANDARD_SEA_LEVEL_HPA, session.sea_level_pressure());

        assert_eq!(Ok(()), session.set_sea_level_pressure(1020.0));
        assert_eq!(1020.0, session.sea_level_pressure());
    }

    #[tokio::test]
    async fn configure_succeeds_after_selection_is_completed() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();
        session.configure_selected(Configuration::default(), SettingsSelect::REQUIRED).await.unwrap();
        assert_eq!(SessionState::Configured, session.state());

        let fake = session.release().unwrap();
        // IIR filter not selected, left at its reset value
        assert_eq!(0, fake.regs[0x1F]);
    }

    #[tokio::test]
    async fn wrong_strap_faults_the_session() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.bind(InterfaceKind::I2c, SdoPinState::High).unwrap();

        assert_eq!(Err(Error::CommFail), session.configure(Configuration::default()).await);
        assert_eq!(SessionState::Faulted, session.state());
        assert_eq!(None, session.chip_id());
    }

    #[tokio::test]
    async fn invalid_oversampling_faults_the_session() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();

        let config = Configuration::default()
            .pressure_oversampling(Oversampling::X32)
            .output_data_rate(OutputDataRate::R200Hz);
        assert_eq!(Err(Error::InvalidOdrOsr), session.configure(config).await);
        assert_eq!(SessionState::Faulted, session.state());
    }

    #[tokio::test]
    async fn activate_requires_configuration() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();

        assert_eq!(
            Err(Error::InvalidState { expected: SessionState::Configured, actual: SessionState::Bound }),
            session.activate().await
        );
        assert_eq!(SessionState::Bound, session.state());
    }

    #[tokio::test]
    async fn activation_failure_faults_the_session() {
        let mut fake = FakeDevice::new();
        fake.reject_normal_mode = true;
        let mut session = DeviceSession::new(fake);

        let result = session.init(InterfaceKind::I2c, SdoPinState::Low, Configuration::default()).await;
        assert_eq!(Err(Error::ConfigurationError), result);
        assert_eq!(SessionState::Faulted, session.state());
    }

    #[tokio::test]
    async fn forced_mode_activation() {
        let mut session = DeviceSession::new(FakeDevice::new());
        let config = Configuration::default().power_mode(PowerMode::Forced);
        session.init(InterfaceKind::I2c, SdoPinState::Low, config).await.unwrap();

        let fake = session.release().unwrap();
        assert_eq!(0b0001_0011, fake.regs[0x1B]);
    }

    #[tokio::test]
    async fn rebinding_requires_reconfiguration() {
        let mut session = DeviceSession::new(FakeDevice::new());
        session.init(InterfaceKind::I2c, SdoPinState::Low, Configuration::default()).await.unwrap();

        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();
        assert_eq!(SessionState::Bound, session.state());
        assert_eq!(None, session.chip_id());
        assert!(session.active_device().is_none());
    }

    #[tokio::test]
    async fn raw_register_access_once_bound() {
        let mut session = DeviceSession::new(FakeDevice::new());
        assert!(matches!(session.read::<ChipId>().await, Err(Error::InvalidState { .. })));

        session.bind(InterfaceKind::I2c, SdoPinState::Low).unwrap();
        assert_eq!(Ok(0x60), session.read::<ChipId>().await);

        let fake = session.release().unwrap();
        assert_eq!(&[Transaction::Read { reg: 0x00, len: 1 }], fake.log.as_slice());
    }
}
