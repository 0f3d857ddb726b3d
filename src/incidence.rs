use rayon::prelude::*;
use crate::models::{AoiSample, SolarPositionSample, Surface};

/// Returns the angle of incidence between the sun's rays and the surface normal, in degrees
///
/// The result is within [0, 180], where 0 means the surface faces the sun and anything
/// above 90 means the sun is behind the surface. Rounding errors that push the cosine
/// outside [-1, 1] are clamped away.
///
/// # Arguments
///
/// * 'sun_azimuth' - solar azimuth in degrees east of north
/// * 'sun_zenith' - solar zenith angle in degrees
/// * 'surface_azimuth' - surface azimuth in degrees east of north
/// * 'surface_tilt' - surface tilt from horizontal in degrees
pub fn aoi(sun_azimuth: f64, sun_zenith: f64, surface_azimuth: f64, surface_tilt: f64) -> f64 {
    let zenith = sun_zenith.to_radians();
    let tilt = surface_tilt.to_radians();
    let azimuth_diff = (sun_azimuth - surface_azimuth).to_radians();

    let cos_aoi = zenith.cos() * tilt.cos() + zenith.sin() * tilt.sin() * azimuth_diff.cos();

    cos_aoi.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Returns angles of incidence for a sequence of sun positions, in the same order as the input
///
/// # Arguments
///
/// * 'positions' - timestamped sun positions
/// * 'surface' - the surface to calculate incidence on
pub fn aoi_series(positions: &[SolarPositionSample], surface: &Surface) -> Vec<AoiSample> {
    positions
        .par_iter()
        .map(|p| AoiSample {
            valid_time: p.valid_time,
            aoi: aoi(p.azimuth, p.zenith, surface.azimuth(), surface.tilt()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone, Utc};
    use crate::models::SolarPosition;

    #[test]
    fn horizontal_surface_aoi_is_zenith() {
        for zenith in [0.0, 12.5, 45.0, 89.9, 120.0] {
            assert_abs_diff_eq!(aoi(137.0, zenith, 180.0, 0.0), zenith, epsilon = 1e-9);
        }
    }

    #[test]
    fn facing_and_opposing_the_sun() {
        assert_abs_diff_eq!(aoi(180.0, 40.0, 180.0, 40.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(aoi(0.0, 90.0, 180.0, 90.0), 180.0, epsilon = 1e-6);
        assert_abs_diff_eq!(aoi(90.0, 90.0, 180.0, 90.0), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn aoi_stays_within_bounds() {
        for i in 0..2000 {
            let sun_azimuth = (i * 37 % 360) as f64;
            let sun_zenith = (i * 13 % 181) as f64;
            let surface_azimuth = (i * 7 % 360) as f64;
            let surface_tilt = (i % 91) as f64;
            let angle = aoi(sun_azimuth, sun_zenith, surface_azimuth, surface_tilt);

            assert!((0.0..=180.0).contains(&angle), "aoi {} out of bounds", angle);
        }
    }

    #[test]
    fn series_keeps_order_and_values() {
        let start = Utc.with_ymd_and_hms(2015, 6, 21, 0, 0, 0).unwrap();
        let surface = Surface::new(30.0, 180.0).unwrap();
        let positions = (0..24)
            .map(|h| SolarPositionSample::new(
                start + TimeDelta::hours(h),
                SolarPosition { altitude: 90.0 - h as f64 * 5.0, zenith: h as f64 * 5.0, azimuth: h as f64 * 15.0 },
            ))
            .collect::<Vec<SolarPositionSample>>();

        let series = aoi_series(&positions, &surface);

        assert_eq!(series.len(), positions.len());
        for (p, a) in positions.iter().zip(series.iter()) {
            assert_eq!(a.valid_time, p.valid_time);
            assert_eq!(a.aoi, aoi(p.azimuth, p.zenith, 180.0, 30.0));
        }
    }
}
