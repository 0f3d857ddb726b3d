use std::fs;
use log::info;
use thiserror::Error;
use pv_irradiance::ephemeris::{parse_timestamp, TimeSeries};
use pv_irradiance::errors::SolarError;
use pv_irradiance::irradiance::{estimate, IrradianceEstimate};
use pv_irradiance::models::IrradianceSample;
use crate::config::{Files, Simulation};
use crate::initialization::Mgr;
use crate::manager_tmy::{align_tmy, TmyError};
use crate::retry;

/// Runs an irradiance estimation for the configured PV system and simulation period
///
/// # Arguments
///
/// * 'mgr' - struct with configured managers
/// * 'simulation' - simulation period
/// * 'files' - files config
pub fn run(mgr: &Mgr, simulation: &Simulation, files: &Files) -> Result<(), WorkerError> {
    let times = simulation_times(simulation)?;
    info!("{}", mgr.system);
    info!("Simulation period: {} hourly timestamps", times.len());

    let irradiance = tmy_irradiance(|| mgr.tmy.fetch_tmy(), &times)?;

    let result = estimate(&mgr.system, &times, &irradiance)?;

    let peak = result.poa.iter().fold(0f64, |acc, p| acc.max(p.total));
    info!("Insolation: {:.1} kWh/m², peak POA irradiance: {:.1} W/m²", result.insolation_kwh_m2, peak);

    save_result(&files.result_dir, &times, &result)?;

    Ok(())
}

/// Fetches a TMY document, retrying on failure, and aligns it with the time series
///
/// Only fetching is retried, a document that can't be aligned fails at once.
///
/// # Arguments
///
/// * 'fetch' - function returning the TMY json document
/// * 'times' - the time series to align with
fn tmy_irradiance<F>(mut fetch: F, times: &TimeSeries) -> Result<Vec<IrradianceSample>, WorkerError>
where F: FnMut() -> Result<String, TmyError> {
    let json = retry!(|| fetch())
        .map_err(|e| WorkerError::IrradianceError(format!("error fetching TMY data: {}", e)))?;

    align_tmy(&json, times)
        .map_err(|e| WorkerError::IrradianceError(format!("error aligning TMY data: {}", e)))
}

/// Returns the hourly time series for the simulation period, end non-inclusive
///
/// # Arguments
///
/// * 'simulation' - simulation period
fn simulation_times(simulation: &Simulation) -> Result<TimeSeries, WorkerError> {
    let start = parse_timestamp(&simulation.start)?;
    let end = parse_timestamp(&simulation.end)?;

    let times = TimeSeries::hourly(start, end)?;
    if times.is_empty() {
        return Err(WorkerError::RunSchemaError(format!("no timestamps between {} and {}", start, end)));
    }

    Ok(times)
}

/// Saves the estimate to file
///
/// # Arguments
///
/// * 'path' - path to the result directory
/// * 'times' - the simulated time series
/// * 'result' - estimate to save
fn save_result(path: &str, times: &TimeSeries, result: &IrradianceEstimate) -> Result<(), WorkerError> {
    let (Some(start), Some(end)) = (times.first(), times.last()) else {
        return Err(WorkerError::SaveResultError("empty time series".to_string()));
    };
    let filename = format!("{}{}_{}_{}_poa.json", path, result.system.name.replace(' ', "_"),
                           start.format("%Y%m%d%H%M"), end.format("%Y%m%d%H%M"));

    let json = serde_json::to_string_pretty(result)
        .map_err(|e| WorkerError::SaveResultError(format!("error serializing result: {}", e)))?;

    fs::write(&filename, json)
        .map_err(|e| WorkerError::SaveResultError(format!("error writing result to file: {}", e)))?;

    info!("Result saved to {}", filename);

    Ok(())
}

/// Error depicting errors that occur while running an estimation
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while creating run schema: {0:?}")]
    RunSchemaError(String),
    #[error("error while getting irradiance: {0:?}")]
    IrradianceError(String),
    #[error("error in solar calculation: {0}")]
    CalculationError(#[from] SolarError),
    #[error("error while saving result: {0:?}")]
    SaveResultError(String),
}
