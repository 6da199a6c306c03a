use log::warn;

use crate::acquisition::RawSample;
use crate::register::calibration::CalibrationNvm;
use crate::register::data::DataSample;

const MIN_TEMPERATURE: f32 = -40.0;
const MAX_TEMPERATURE: f32 = 85.0;
const MIN_PRESSURE: f32 = 30_000.0;
const MAX_PRESSURE: f32 = 125_000.0;

/// Trimming coefficients scaled to floating point, datasheet section 8.4.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalibrationData {
    par_t1: f32,
    par_t2: f32,
    par_t3: f32,
    par_p1: f32,
    par_p2: f32,
    par_p3: f32,
    par_p4: f32,
    par_p5: f32,
    par_p6: f32,
    par_p7: f32,
    par_p8: f32,
    par_p9: f32,
    par_p10: f32,
    par_p11: f32,
}

impl CalibrationData {
    pub(crate) fn from_nvm(calib_coeffs: &CalibrationNvm) -> Self {
        Self {
            par_t1: (calib_coeffs.nvm_par_t1 as f32) / 0.00390625,
            par_t2: (calib_coeffs.nvm_par_t2 as f32) / 1073741824.0,
            par_t3: (calib_coeffs.nvm_par_t3 as f32) / 281474976710656.0,
            par_p1: (calib_coeffs.nvm_par_p1 as f32 - 16384.0) / 1048576.0,
            par_p2: (calib_coeffs.nvm_par_p2 as f32 - 16384.0) / 536870912.0,
            par_p3: (calib_coeffs.nvm_par_p3 as f32) / 4294967296.0,
            par_p4: (calib_coeffs.nvm_par_p4 as f32) / 137438953472.0,
            par_p5: (calib_coeffs.nvm_par_p5 as f32) / 0.125,
            par_p6: (calib_coeffs.nvm_par_p6 as f32) / 64.0,
            par_p7: (calib_coeffs.nvm_par_p7 as f32) / 256.0,
            par_p8: (calib_coeffs.nvm_par_p8 as f32) / 32768.0,
            par_p9: (calib_coeffs.nvm_par_p9 as f32) / 281474976710656.0,
            par_p10: (calib_coeffs.nvm_par_p10 as f32) / 281474976710656.0,
            par_p11: (calib_coeffs.nvm_par_p11 as f32) / 36893488147419103232.0,
        }
    }

    /// Compensates one raw sample. Both channels come from the same burst, so the linearised
    /// temperature feeding the pressure polynomial always belongs to this sample.
    pub fn compensate(&self, sample: &DataSample) -> RawSample {
        let t_lin = self.linear_temperature(sample.temperature());
        let pressure = self.compensate_pressure(sample.pressure(), t_lin);

        RawSample {
            pressure: clamp_logged(pressure, MIN_PRESSURE, MAX_PRESSURE, "pressure"),
            temperature: clamp_logged(t_lin, MIN_TEMPERATURE, MAX_TEMPERATURE, "temperature"),
        }
    }

    fn linear_temperature(&self, temp: u32) -> f32 {
        let partial_data1 = temp as f32 - self.par_t1;
        let partial_data2 = partial_data1 * self.par_t2;

        partial_data2 + (partial_data1 * partial_data1) * self.par_t3
    }

    fn compensate_pressure(&self, pressure: u32, t_lin: f32) -> f32 {
        let pressure = pressure as f32;
        let partial_data1 = self.par_p6 * t_lin;
        let partial_data2 = self.par_p7 * (t_lin * t_lin);
        let partial_data3 = self.par_p8 * (t_lin * t_lin * t_lin);
        let partial_out1 = self.par_p5 + partial_data1 + partial_data2 + partial_data3;

        let partial_data1 = self.par_p2 * t_lin;
        let partial_data2 = self.par_p3 * (t_lin * t_lin);
        let partial_data3 = self.par_p4 * (t_lin * t_lin * t_lin);
        let partial_out2 = pressure * (self.par_p1 + partial_data1 + partial_data2 + partial_data3);

        let partial_data1 = pressure * pressure;
        let partial_data2 = self.par_p9 + self.par_p10 * t_lin;
        let partial_data3 = partial_data1 * partial_data2;
        let partial_data4 = partial_data3 + (pressure * pressure * pressure) * self.par_p11;
        partial_out1 + partial_out2 + partial_data4
    }
}

fn clamp_logged(value: f32, min: f32, max: f32, what: &str) -> f32 {
    if value < min {
        warn!("compensated {} {} below sensor range, clamped to {}", what, value, min);
        min
    } else if value > max {
        warn!("compensated {} {} above sensor range, clamped to {}", what, value, max);
        max
    } else {
        value
    }
}
