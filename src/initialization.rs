use std::env;
use log::info;
use thiserror::Error;
use pv_irradiance::errors::SolarError;
use pv_irradiance::models::{Location, PVSystem, Surface};
use crate::config::{load_config, Config, LoadConfigurationError, SystemParameters};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_tmy::{Tmy, TmyError};

pub struct Mgr {
    pub system: PVSystem,
    pub tmy: Tmy,
}

/// Initializes and returns configuration and a Mgr struct holding the PV system and the TMY manager
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = args.iter()
        .find_map(|p| p.strip_prefix("--config="))
        .ok_or(InitializationError::ArgumentError("--config=<path> argument missing".to_string()))?;

    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting pv irradiance version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let system = pv_system(&config.system)?;
    let tmy = Tmy::new(&config.tmy, &system.location)?;

    Ok((config, Mgr { system, tmy }))
}

/// Builds a validated PV system from configuration
///
/// # Arguments
///
/// * 'params' - system parameters
fn pv_system(params: &SystemParameters) -> Result<PVSystem, SolarError> {
    let location = Location::new(params.lat, params.long, params.elevation)?;
    let surface = Surface::new(params.surface_tilt, params.surface_azimuth)?;
    let system = PVSystem::new(&params.name, location, surface);

    match params.albedo {
        Some(albedo) => system.with_albedo(albedo),
        None => Ok(system),
    }
}

/// Error depicting errors that occur while initializing
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ArgumentError: {0}")]
    ArgumentError(String),
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("SystemError: {0}")]
    SystemError(#[from] SolarError),
    #[error("TmySetupError: {0}")]
    TmySetupError(#[from] TmyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(albedo: Option<f64>) -> SystemParameters {
        SystemParameters {
            name: "Sonora".to_string(),
            lat: 30.0,
            long: -110.0,
            elevation: 0.0,
            surface_tilt: 30.0,
            surface_azimuth: 180.0,
            albedo,
        }
    }

    #[test]
    fn system_from_parameters() {
        assert_eq!(pv_system(&params(None)).unwrap().albedo(), 0.16);
        assert_eq!(pv_system(&params(Some(0.5))).unwrap().albedo(), 0.5);
        assert!(matches!(pv_system(&params(Some(2.0))), Err(SolarError::InvalidAlbedo(_))));

        let mut bad = params(None);
        bad.lat = 95.0;
        assert!(matches!(pv_system(&bad), Err(SolarError::InvalidCoordinate(_))));
    }
}
