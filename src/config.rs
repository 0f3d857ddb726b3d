use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
pub struct SystemParameters {
    pub name: String,
    pub lat: f64,
    pub long: f64,
    #[serde(default)]
    pub elevation: f64,
    pub surface_tilt: f64,
    pub surface_azimuth: f64,
    pub albedo: Option<f64>,
}

#[derive(Deserialize)]
pub struct Simulation {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize)]
pub struct TmyParameters {
    pub url: String,
    pub start_year: u16,
    pub end_year: u16,
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Files {
    pub result_dir: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    pub threads: usize,
}

#[derive(Deserialize)]
pub struct Config {
    pub system: SystemParameters,
    pub simulation: Simulation,
    pub tmy: TmyParameters,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses configuration from a toml document
///
/// # Arguments
///
/// * 'toml' - the configuration document
fn parse_config(toml: &str) -> Result<Config, LoadConfigurationError> {
    let config: Config = toml::from_str(toml)?;

    if config.tmy.start_year > config.tmy.end_year {
        return Err(LoadConfigurationError::Parameter(
            format!("tmy start_year {} is after end_year {}", config.tmy.start_year, config.tmy.end_year)));
    }

    Ok(config)
}

/// Error depicting errors that occur while loading configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("FileError: {0}")]
    File(#[from] std::io::Error),
    #[error("ParseError: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("ParameterError: {0}")]
    Parameter(String),
}
