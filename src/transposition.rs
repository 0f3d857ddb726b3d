//! Transposition of horizontal irradiance onto a tilted plane (plane-of-array, POA).
//!
//! Sky diffuse is modelled as isotropic with an empirical horizon brightening term,
//! `0.012 * zenith * (1 - cos(tilt)) / 2` applied to GHI, where the zenith angle enters in
//! degrees. The coefficient is fitted for degrees and must stay that way.

use rayon::prelude::*;
use crate::errors::SolarError;
use crate::models::{AoiSample, IrradianceSample, PoaComponents, PoaSample, SolarPositionSample};

/// Default ground reflectivity, typical for an urban environment.
///
/// Recognized ranges are roughly 0.14 - 0.22 for urban surroundings, 0.25 for grass and
/// up to 0.82 for fresh snow. Any value within [0, 1] is accepted.
pub const DEFAULT_ALBEDO: f64 = 0.16;

const HORIZON_BRIGHTENING: f64 = 0.012;

/// Returns the albedo if it is within [0, 1]
///
/// # Arguments
///
/// * 'albedo' - fraction of global irradiance reflected by the ground
pub fn validate_albedo(albedo: f64) -> Result<f64, SolarError> {
    if (0.0..=1.0).contains(&albedo) {
        Ok(albedo)
    } else {
        Err(SolarError::InvalidAlbedo(albedo))
    }
}

/// Returns plane-of-array irradiance components in W/m²
///
/// Beam, ground reflected and sky diffuse are each floored at zero before they are summed
/// into total, e.g. beam is zero whenever the sun is behind the surface (aoi > 90).
///
/// # Arguments
///
/// * 'aoi' - angle of incidence in degrees
/// * 'sun_zenith' - solar zenith angle in degrees
/// * 'surface_tilt' - surface tilt from horizontal in degrees
/// * 'ghi' - global horizontal irradiance
/// * 'dni' - direct normal irradiance
/// * 'dhi' - diffuse horizontal irradiance
/// * 'albedo' - ground reflectivity, 0 to 1
pub fn poa_irradiance(aoi: f64, sun_zenith: f64, surface_tilt: f64, ghi: f64, dni: f64, dhi: f64, albedo: f64) -> Result<PoaComponents, SolarError> {
    let albedo = validate_albedo(albedo)?;

    Ok(components(aoi, sun_zenith, surface_tilt, ghi, dni, dhi, albedo))
}

/// Returns timestamped plane-of-array irradiance for aligned series of sun positions,
/// angles of incidence and horizontal irradiance
///
/// All three series must have the same length. Element i of each series is assumed to belong
/// to the same point in time, the timestamps of the sun positions are used in the result.
///
/// # Arguments
///
/// * 'positions' - sun positions
/// * 'aoi' - angles of incidence
/// * 'irradiance' - horizontal irradiance components
/// * 'surface_tilt' - surface tilt from horizontal in degrees
/// * 'albedo' - ground reflectivity, 0 to 1
pub fn poa_series(
    positions: &[SolarPositionSample],
    aoi: &[AoiSample],
    irradiance: &[IrradianceSample],
    surface_tilt: f64,
    albedo: f64,
) -> Result<Vec<PoaSample>, SolarError> {
    let albedo = validate_albedo(albedo)?;

    if positions.len() != aoi.len() || positions.len() != irradiance.len() {
        return Err(SolarError::UnequalLengths(format!(
            "{} sun positions, {} angles of incidence and {} irradiance samples",
            positions.len(), aoi.len(), irradiance.len())));
    }

    let poa = positions
        .par_iter()
        .zip(aoi.par_iter())
        .zip(irradiance.par_iter())
        .map(|((p, a), i)| {
            PoaSample::new(p.valid_time, components(a.aoi, p.zenith, surface_tilt, i.ghi, i.dni, i.dhi, albedo))
        })
        .collect();

    Ok(poa)
}

fn components(aoi: f64, sun_zenith: f64, surface_tilt: f64, ghi: f64, dni: f64, dhi: f64, albedo: f64) -> PoaComponents {
    let cos_tilt = surface_tilt.to_radians().cos();

    let beam = dni * aoi.to_radians().cos();
    let ground = ghi * albedo * (1.0 - cos_tilt) / 2.0;

    let isotropic = dhi * (1.0 + cos_tilt) / 2.0;
    let horizon = ghi * (HORIZON_BRIGHTENING * sun_zenith * (1.0 - cos_tilt)) / 2.0;

    PoaComponents { beam, ground, diffuse: isotropic + horizon, total: 0.0 }.floored()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    #[test]
    fn horizontal_surface_receives_beam_and_diffuse() {
        let poa = poa_irradiance(30.0, 30.0, 0.0, 800.0, 700.0, 150.0, DEFAULT_ALBEDO).unwrap();

        assert_abs_diff_eq!(poa.beam, 700.0 * 30f64.to_radians().cos(), epsilon = 1e-9);
        assert_eq!(poa.ground, 0.0);
        assert_abs_diff_eq!(poa.diffuse, 150.0, epsilon = 1e-9);
        assert_eq!(poa.total, poa.beam + poa.ground + poa.diffuse);
    }

    #[test]
    fn vertical_surface_components() {
        let poa = poa_irradiance(60.0, 50.0, 90.0, 600.0, 500.0, 100.0, 0.2).unwrap();

        assert_abs_diff_eq!(poa.beam, 250.0, epsilon = 1e-9);
        assert_abs_diff_eq!(poa.ground, 600.0 * 0.2 / 2.0, epsilon = 1e-9);
        // zenith enters the horizon term in degrees: 600 * 0.012 * 50 / 2
        assert_abs_diff_eq!(poa.diffuse, 100.0 / 2.0 + 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(poa.total, 250.0 + 60.0 + 230.0, epsilon = 1e-9);
    }

    #[test]
    fn beam_is_floored_when_sun_is_behind_surface() {
        let poa = poa_irradiance(120.0, 80.0, 35.0, 300.0, 400.0, 80.0, DEFAULT_ALBEDO).unwrap();

        assert_eq!(poa.beam, 0.0);
        assert!(poa.ground > 0.0 && poa.diffuse > 0.0);
        assert_eq!(poa.total, poa.ground + poa.diffuse);
        assert_eq!(poa.floored(), poa);
    }

    #[test]
    fn albedo_must_be_a_fraction() {
        assert!(poa_irradiance(0.0, 0.0, 20.0, 100.0, 100.0, 10.0, 0.0).is_ok());
        assert!(poa_irradiance(0.0, 0.0, 20.0, 100.0, 100.0, 10.0, 1.0).is_ok());
        assert_eq!(poa_irradiance(0.0, 0.0, 20.0, 100.0, 100.0, 10.0, -0.1), Err(SolarError::InvalidAlbedo(-0.1)));
        assert_eq!(poa_irradiance(0.0, 0.0, 20.0, 100.0, 100.0, 10.0, 1.5), Err(SolarError::InvalidAlbedo(1.5)));
        assert!(matches!(validate_albedo(f64::NAN), Err(SolarError::InvalidAlbedo(_))));
    }

    #[test]
    fn series_rejects_unequal_lengths() {
        let t = Utc.with_ymd_and_hms(2015, 6, 21, 12, 0, 0).unwrap();
        let position = SolarPositionSample { valid_time: t, altitude: 60.0, zenith: 30.0, azimuth: 180.0 };
        let aoi = AoiSample { valid_time: t, aoi: 10.0 };
        let irradiance = IrradianceSample { valid_time: t, ghi: 900.0, dni: 800.0, dhi: 100.0 };

        let result = poa_series(&[position, position], &[aoi, aoi], &[irradiance], 20.0, DEFAULT_ALBEDO);
        assert!(matches!(result, Err(SolarError::UnequalLengths(_))));

        let poa = poa_series(&[position], &[aoi], &[irradiance], 20.0, DEFAULT_ALBEDO).unwrap();
        assert_eq!(poa.len(), 1);
        assert_eq!(poa[0].valid_time, t);
        assert_eq!(poa[0].total, poa_irradiance(10.0, 30.0, 20.0, 900.0, 800.0, 100.0, DEFAULT_ALBEDO).unwrap().total);
    }
}
