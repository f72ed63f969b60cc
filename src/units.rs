//! Unit conversions and derived weather metrics.
//!
//! Everything here is a plain function over `f64`. NaN and infinities pass
//! through untouched, so callers that need stricter behavior validate sensor
//! data before it gets here.

/// Altitude at which the barometric formula used by [`sea_level_pressure`]
/// stops being defined.
pub const BAROMETRIC_LIMIT_METERS: f64 = 44330.0;

const BAROMETRIC_EXPONENT: f64 = 5.255;
const INHG_PER_PASCAL: f64 = 0.0002953;

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

pub fn to_millibar(pascals: f64) -> f64 {
    pascals / 100.0
}

pub fn to_inches_hg(pascals: f64) -> f64 {
    pascals * INHG_PER_PASCAL
}

/// Adjusts a station-level pressure reading to mean sea level pressure.
///
/// Yields a non-finite value for `altitude_meters >= BAROMETRIC_LIMIT_METERS`;
/// configuration rejects such elevations before sampling starts.
pub fn sea_level_pressure(raw_pa: f64, altitude_meters: f64) -> f64 {
    raw_pa / (1.0 - altitude_meters / BAROMETRIC_LIMIT_METERS).powf(BAROMETRIC_EXPONENT)
}

/// Linear dew point approximation in °F.
///
/// Good to a degree or two at moderate temperature and humidity. This is not
/// the Magnus formula.
pub fn dew_point_approx(temp_f: f64, humidity_pct: f64) -> f64 {
    temp_f - ((100.0 - humidity_pct) * (9.0 / 25.0))
}

/// Recommended ceiling for indoor relative humidity given the outdoor
/// temperature in °F. Lower bounds of each band are inclusive.
pub fn recommended_max_indoor_humidity(outdoor_temp_f: f64) -> u8 {
    const BANDS: [(f64, u8); 7] = [
        (50.0, 50),
        (40.0, 45),
        (30.0, 40),
        (20.0, 35),
        (10.0, 30),
        (0.0, 25),
        (-10.0, 20),
    ];

    BANDS
        .iter()
        .find(|(floor, _)| outdoor_temp_f >= *floor)
        .map(|(_, pct)| *pct)
        .unwrap_or(15)
}
