//! Sun position after the low precision approximation published by the Astronomical
//! Applications Department of the U.S. Naval Observatory. It is accurate to within
//! arcminutes for two centuries around the year 2000.
//!
//! All angles going in and out are in degrees.

use rayon::prelude::*;
use crate::ephemeris::TimeSeries;
use crate::errors::SolarError;
use crate::models::{validate_coordinates, Location, SolarPosition, SolarPositionSample};

const SUN_MEAN_LONGITUDE_AT_EPOCH: f64 = 280.459;
const SUN_MEAN_LONGITUDE_RATE: f64 = 0.98564736;
const SUN_MEAN_ANOMALY_AT_EPOCH: f64 = 357.5291;
const SUN_MEAN_ANOMALY_RATE: f64 = 0.98560028;
const EARTH_MEAN_OBLIQUITY: f64 = 23.429;
const EARTH_OBLIQUITY_RATE: f64 = 0.00000036;
const GMST_AT_EPOCH: f64 = 18.697374558;
const GMST_RATE: f64 = 24.06570982441908;
const DAYS_PER_CENTURY: f64 = 36525.0;

/// Returns the sun's mean longitude, corrected for aberration, normalized to [0, 360)
///
/// # Arguments
///
/// * 'd' - days since J2000.0
pub fn sun_mean_longitude(d: f64) -> f64 {
    (SUN_MEAN_LONGITUDE_AT_EPOCH + SUN_MEAN_LONGITUDE_RATE * d).rem_euclid(360.0)
}

/// Returns the sun's mean anomaly normalized to [0, 360)
///
/// # Arguments
///
/// * 'd' - days since J2000.0
pub fn sun_mean_anomaly(d: f64) -> f64 {
    (SUN_MEAN_ANOMALY_AT_EPOCH + SUN_MEAN_ANOMALY_RATE * d).rem_euclid(360.0)
}

/// Returns the geocentric apparent ecliptic longitude of the sun
///
/// The result is not range reduced, it may exceed 360.
///
/// # Arguments
///
/// * 'mean_longitude' - sun mean longitude
/// * 'mean_anomaly' - sun mean anomaly
pub fn sun_ecliptic_longitude(mean_longitude: f64, mean_anomaly: f64) -> f64 {
    let g = mean_anomaly.to_radians();

    mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()
}

/// Returns the obliquity of the ecliptic (earth axial tilt)
///
/// # Arguments
///
/// * 'd' - days since J2000.0
pub fn earth_axial_tilt(d: f64) -> f64 {
    EARTH_MEAN_OBLIQUITY - EARTH_OBLIQUITY_RATE * d
}

/// Returns Greenwich Mean Sidereal Time in hours, normalized to [0, 24)
///
/// # Arguments
///
/// * 'd' - days since J2000.0
pub fn greenwich_mean_sidereal_time(d: f64) -> f64 {
    let t = d / DAYS_PER_CENTURY;

    (GMST_AT_EPOCH + GMST_RATE * d + 0.000026 * t.powi(2)).rem_euclid(24.0)
}

/// Returns Local Mean Sidereal Time in degrees
///
/// The result is not range reduced, it lies within [-180, 540).
///
/// # Arguments
///
/// * 'd' - days since J2000.0
/// * 'long' - observer longitude
pub fn local_mean_sidereal_time(d: f64, long: f64) -> f64 {
    greenwich_mean_sidereal_time(d) * 15.0 + long
}

/// Returns the solar altitude above the horizon
///
/// # Arguments
///
/// * 'lat' - observer latitude
/// * 'lmst' - local mean sidereal time
/// * 'ecliptic_longitude' - sun ecliptic longitude
/// * 'axial_tilt' - obliquity of the ecliptic
pub fn sun_altitude(lat: f64, lmst: f64, ecliptic_longitude: f64, axial_tilt: f64) -> f64 {
    let phi = lat.to_radians();
    let theta = lmst.to_radians();
    let lambda = ecliptic_longitude.to_radians();
    let epsilon = axial_tilt.to_radians();

    let zeta = phi.cos() * theta.cos() * lambda.cos()
        + (phi.cos() * theta.sin() * epsilon.cos() + phi.sin() * epsilon.sin()) * lambda.sin();

    zeta.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Returns the solar azimuth in degrees east of north, within [0, 360)
///
/// The quadrant is resolved from the signs of the two components ν (east) and ξ (north).
/// When ξ is exactly zero the sun is on the prime vertical and the azimuth is 90 if ν is
/// positive, 270 if ν is negative and 0 if both are zero, which is what atan2 gives.
///
/// # Arguments
///
/// * 'lat' - observer latitude
/// * 'lmst' - local mean sidereal time
/// * 'ecliptic_longitude' - sun ecliptic longitude
/// * 'axial_tilt' - obliquity of the ecliptic
pub fn sun_azimuth(lat: f64, lmst: f64, ecliptic_longitude: f64, axial_tilt: f64) -> f64 {
    let phi = lat.to_radians();
    let theta = lmst.to_radians();
    let lambda = ecliptic_longitude.to_radians();
    let epsilon = axial_tilt.to_radians();

    let nu = -theta.sin() * lambda.cos() + theta.cos() * epsilon.cos() * lambda.sin();
    let xi = -phi.sin() * theta.cos() * lambda.cos()
        - (phi.sin() * theta.sin() * epsilon.cos() - phi.cos() * epsilon.sin()) * lambda.sin();

    azimuth_from_components(nu, xi)
}

/// Quadrant corrected azimuth from its east (nu) and north (xi) components
///
fn azimuth_from_components(nu: f64, xi: f64) -> f64 {
    if xi == 0.0 {
        return if nu > 0.0 { 90.0 } else if nu < 0.0 { 270.0 } else { 0.0 };
    }

    let raw = (nu / xi).atan().to_degrees();
    let azimuth = if xi < 0.0 {
        raw + 180.0
    } else if nu < 0.0 {
        raw + 360.0
    } else {
        raw
    };

    // A tiny negative raw angle may round up to exactly 360
    if azimuth >= 360.0 { azimuth - 360.0 } else { azimuth }
}

/// Returns the sun position for one point in time
///
/// # Arguments
///
/// * 'd' - days since J2000.0
/// * 'lat' - observer latitude (-90 to 90)
/// * 'long' - observer longitude (-180 to 180)
pub fn solar_position(d: f64, lat: f64, long: f64) -> Result<SolarPosition, SolarError> {
    validate_coordinates(lat, long)?;

    Ok(position(d, lat, long))
}

/// Returns sun positions for a sequence of day counts, in the same order as the input
///
/// Positions are calculated in parallel, each one identical to what solar_position returns.
///
/// # Arguments
///
/// * 'days' - days since J2000.0
/// * 'lat' - observer latitude (-90 to 90)
/// * 'long' - observer longitude (-180 to 180)
pub fn solar_position_series(days: &[f64], lat: f64, long: f64) -> Result<Vec<SolarPosition>, SolarError> {
    validate_coordinates(lat, long)?;

    Ok(days.par_iter().map(|d| position(*d, lat, long)).collect())
}

/// Returns timestamped sun positions for a time series
///
/// # Arguments
///
/// * 'times' - the UTC time series
/// * 'location' - observer location
pub fn solar_positions(times: &TimeSeries, location: &Location) -> Vec<SolarPositionSample> {
    let days = times.day_counts();

    times.times()
        .par_iter()
        .zip(days.par_iter())
        .map(|(t, d)| SolarPositionSample::new(*t, position(*d, location.lat(), location.long())))
        .collect()
}

fn position(d: f64, lat: f64, long: f64) -> SolarPosition {
    let lambda = sun_ecliptic_longitude(sun_mean_longitude(d), sun_mean_anomaly(d));
    let epsilon = earth_axial_tilt(d);
    let lmst = local_mean_sidereal_time(d, long);

    let altitude = sun_altitude(lat, lmst, lambda, epsilon);

    SolarPosition {
        altitude,
        zenith: 90.0 - altitude,
        azimuth: sun_azimuth(lat, lmst, lambda, epsilon),
    }
}
