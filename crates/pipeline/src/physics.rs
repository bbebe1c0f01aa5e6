//! Psychrometric helpers. Pure functions of `(temperature °C, relative humidity %)`.

use dewmon_core::DerivedPoint;

/// Magnus coefficients for dew point.
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point in °C (Magnus approximation).
///
/// `rh <= 0` has no logarithm; the result is then non-finite and is passed
/// through unchanged rather than treated as an error.
pub fn dew_point(temp: f64, rh: f64) -> f64 {
    let alpha = (MAGNUS_A * temp) / (MAGNUS_B + temp) + (rh / 100.0).ln();
    (MAGNUS_B * alpha) / (MAGNUS_A - alpha)
}

/// Absolute humidity in g/m³.
pub fn absolute_humidity(temp: f64, rh: f64) -> f64 {
    (6.112 * ((17.67 * temp) / (temp + 243.5)).exp() * rh * 2.1674) / (273.15 + temp)
}

/// Bundle both quantities with an already-computed moving average.
pub fn derive(temp: f64, rh: f64, moving_avg_temperature: f64) -> DerivedPoint {
    DerivedPoint {
        dew_point: dew_point(temp, rh),
        absolute_humidity: absolute_humidity(temp, rh),
        moving_avg_temperature,
    }
}
