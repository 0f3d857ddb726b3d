use serde::Serialize;
use crate::ephemeris::TimeSeries;
use crate::errors::SolarError;
use crate::incidence::aoi_series;
use crate::models::{AoiSample, IrradianceSample, PVSystem, PoaSample, SolarPositionSample};
use crate::solar_position::solar_positions;
use crate::transposition::poa_series;

/// Result of transposing horizontal irradiance onto a PV system's plane of array
///
/// Each stage keeps its own output: sun positions feed the angles of incidence which
/// together with the horizontal irradiance feed the plane-of-array irradiance.
#[derive(Serialize, Debug)]
pub struct IrradianceEstimate {
    pub system: PVSystem,
    pub positions: Vec<SolarPositionSample>,
    pub aoi: Vec<AoiSample>,
    pub poa: Vec<PoaSample>,
    pub insolation_kwh_m2: f64,
}

/// Estimates plane-of-array irradiance for a PV system over a time series
///
/// # Arguments
///
/// * 'system' - the PV system
/// * 'times' - UTC time series
/// * 'irradiance' - horizontal irradiance, one sample per timestamp in times
pub fn estimate(system: &PVSystem, times: &TimeSeries, irradiance: &[IrradianceSample]) -> Result<IrradianceEstimate, SolarError> {
    if times.len() != irradiance.len() {
        return Err(SolarError::UnequalLengths(format!(
            "{} timestamps but {} irradiance samples", times.len(), irradiance.len())));
    }

    let positions = solar_positions(times, &system.location);
    let aoi = aoi_series(&positions, &system.surface);
    let poa = poa_series(&positions, &aoi, irradiance, system.surface.tilt(), system.albedo())?;
    let insolation_kwh_m2 = insolation(&poa, times.step_hours().unwrap_or(1.0));

    Ok(IrradianceEstimate {
        system: system.clone(),
        positions,
        aoi,
        poa,
        insolation_kwh_m2,
    })
}

/// Returns the energy received per square meter in kWh/m², given total POA irradiance
/// held constant over each step
///
/// # Arguments
///
/// * 'poa' - plane-of-array irradiance
/// * 'step_hours' - duration of each sample in hours
pub fn insolation(poa: &[PoaSample], step_hours: f64) -> f64 {
    poa.iter().fold(0f64, |acc, p| acc + p.total) * step_hours / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use crate::models::{Location, Surface};

    fn delft() -> PVSystem {
        PVSystem::new(
            "Delft",
            Location::new(52.01, 4.36, 0.0).unwrap(),
            Surface::new(35.0, 180.0).unwrap(),
        )
    }

    fn day() -> TimeSeries {
        let start = Utc.with_ymd_and_hms(2014, 4, 14, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2014, 4, 15, 0, 0, 0).unwrap();
        TimeSeries::hourly(start, end).unwrap()
    }

    #[test]
    fn estimate_is_aligned_with_time_series() {
        let times = day();
        let irradiance = times.times()
            .iter()
            .map(|t| IrradianceSample { valid_time: *t, ghi: 400.0, dni: 500.0, dhi: 100.0 })
            .collect::<Vec<IrradianceSample>>();

        let result = estimate(&delft(), &times, &irradiance).unwrap();

        assert_eq!(result.positions.len(), 24);
        assert_eq!(result.aoi.len(), 24);
        assert_eq!(result.poa.len(), 24);
        for ((t, p), poa) in times.times().iter().zip(result.positions.iter()).zip(result.poa.iter()) {
            assert_eq!(*t, p.valid_time);
            assert_eq!(*t, poa.valid_time);
            assert!(poa.beam >= 0.0 && poa.ground >= 0.0 && poa.diffuse >= 0.0);
        }

        // The sun is below the horizon at midnight and up at 09:00 UTC in Delft
        assert_eq!(result.poa[0].beam, 0.0);
        assert!(result.poa[9].beam > 0.0);
    }

    #[test]
    fn estimate_rejects_misaligned_irradiance() {
        let times = day();
        let irradiance = vec![IrradianceSample { valid_time: times.times()[0], ghi: 0.0, dni: 0.0, dhi: 0.0 }];

        assert!(matches!(estimate(&delft(), &times, &irradiance), Err(SolarError::UnequalLengths(_))));
    }

    #[test]
    fn insolation_integrates_over_step() {
        let t = Utc.with_ymd_and_hms(2014, 4, 14, 12, 0, 0).unwrap();
        let poa = vec![
            PoaSample { valid_time: t, beam: 500.0, ground: 20.0, diffuse: 80.0, total: 600.0 },
            PoaSample { valid_time: t, beam: 300.0, ground: 20.0, diffuse: 80.0, total: 400.0 },
        ];

        assert_relative_eq!(insolation(&poa, 1.0), 1.0);
        assert_relative_eq!(insolation(&poa, 0.25), 0.25);
    }
}
