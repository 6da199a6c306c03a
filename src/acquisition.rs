//! Data-ready gated acquisition and altitude derivation.
//!
//! [`acquire`] polls the device once: it reads the status, and only when a new conversion is
//! flagged it fetches the sample, acknowledges the interrupt and publishes a [`Reading`].
//! Nothing is retried, and failures never reach the caller as errors: the outcome is reported
//! as an [`Acquisition`] and the previous reading stays in place.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal_async::digital::Wait;
use log::{debug, warn};

use crate::bus::Interface;
use crate::session::DeviceSession;

/// Compensated output of one conversion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawSample {
    /// Pa
    pub pressure: f32,
    /// °C
    pub temperature: f32,
}

/// The latest published measurement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Reading {
    /// Pa
    pub pressure: f32,
    /// °C
    pub temperature: f32,
    /// Metres above the sea level reference pressure.
    pub altitude: f32,
}

impl Reading {
    pub const ZERO: Reading = Reading { pressure: 0.0, temperature: 0.0, altitude: 0.0 };
}

#[cfg(feature = "uom")]
impl Reading {
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::pascal>(self.pressure)
    }

    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::f32::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(self.temperature)
    }

    pub fn altitude_uom(&self) -> uom::si::f32::Length {
        uom::si::f32::Length::new::<uom::si::length::meter>(self.altitude)
    }
}

/// Outcome of one acquisition attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acquisition {
    /// A new sample was published.
    Updated,
    /// The device had no new conversion. The reading is unchanged.
    NotReady,
    /// The status or data fetch failed. The reading is unchanged.
    TransportError,
    /// The session is not active. Nothing was read.
    Inactive,
}

/// Barometric altitude in metres: `44330 * (1 - (P / P0)^0.1903)`.
///
/// `pressure_pa` is converted to hPa and divided by `sea_level_hpa` in single precision, the
/// power is taken in double precision.
pub fn altitude(pressure_pa: f32, sea_level_hpa: f32) -> f32 {
    let ratio = (pressure_pa / 100.0) / sea_level_hpa;

    (44330.0 * (1.0 - libm::pow(ratio as f64, 0.1903))) as f32
}

/// Polls the device once and publishes a new sample into `reading` when one is ready.
pub async fn acquire<T: Interface>(session: &mut DeviceSession<T>, reading: &mut Reading) -> Acquisition {
    let sea_level_hpa = session.sea_level_pressure();
    let Some((mut device, calibration)) = session.active_device() else {
        return Acquisition::Inactive;
    };

    let status = match device.status().await {
        Ok(status) => status,
        Err(e) => {
            warn!("status fetch failed: {}", e);
            return Acquisition::TransportError;
        }
    };
    if !status.intr.drdy {
        return Acquisition::NotReady;
    }

    let sample = match device.sensor_data(calibration).await {
        Ok(sample) => sample,
        Err(e) => {
            warn!("sample fetch failed: {}", e);
            return Acquisition::TransportError;
        }
    };

    // Acknowledge the data ready interrupt. The sample is already complete at this point.
    if let Err(e) = device.status().await {
        warn!("interrupt acknowledge failed: {}", e);
    }

    *reading = Reading {
        pressure: sample.pressure,
        temperature: sample.temperature,
        altitude: altitude(sample.pressure, sea_level_hpa),
    };
    debug!("acquired {:?}", reading);

    Acquisition::Updated
}

/// Waits for the INT pin to assert, then acquires.
///
/// The pin level to wait for follows the INT polarity committed to the device. Errors from the pin are
/// returned; everything else is reported through the [`Acquisition`].
pub async fn acquire_on_interrupt<T: Interface, P: Wait>(
    session: &mut DeviceSession<T>,
    pin: &mut P,
    reading: &mut Reading,
) -> Result<Acquisition, P::Error> {
    if session.interrupt_active_high() {
        pin.wait_for_high().await?;
    } else {
        pin.wait_for_low().await?;
    }

    Ok(acquire(session, reading).await)
}

/// A [`Reading`] that can be shared with interrupt handlers and other tasks.
///
/// ```rust,no_run
/// # use bmp388_altimeter::bus::Interface;
/// # use bmp388_altimeter::DeviceSession;
/// use bmp388_altimeter::acquisition::SharedReading;
///
/// static LATEST: SharedReading = SharedReading::new();
///
/// # async fn demo<T: Interface>(session: &mut DeviceSession<T>) {
/// LATEST.acquire(session).await;
/// let altitude = LATEST.latest().altitude;
/// # }
/// ```
pub struct SharedReading {
    inner: Mutex<CriticalSectionRawMutex, Cell<Reading>>,
}

impl SharedReading {
    pub const fn new() -> Self {
        Self { inner: Mutex::new(Cell::new(Reading::ZERO)) }
    }

    pub fn latest(&self) -> Reading {
        self.inner.lock(|cell| cell.get())
    }

    pub fn publish(&self, reading: Reading) {
        self.inner.lock(|cell| cell.set(reading))
    }

    /// Runs [`acquire`] and publishes the result when a new sample arrived.
    pub async fn acquire<T: Interface>(&self, session: &mut DeviceSession<T>) -> Acquisition {
        let mut reading = self.latest();
        let outcome = acquire(session, &mut reading).await;
        if outcome == Acquisition::Updated {
            self.publish(reading);
        }

        outcome
    }
}

impl Default for SharedReading {
    fn default() -> Self {
        Self::new()
    }
}
