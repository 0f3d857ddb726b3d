use thiserror::Error;

/// Error depicting errors that occur while calculating solar positions and irradiance
///
/// The azimuth singularity (sun exactly on the prime vertical, ξ == 0) is not an error,
/// it is resolved deterministically in [`crate::solar_position::sun_azimuth`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolarError {
    #[error("InvalidTimestamp: {0}")]
    InvalidTimestamp(String),
    #[error("InvalidCoordinate: {0}")]
    InvalidCoordinate(String),
    #[error("InvalidSurface: {0}")]
    InvalidSurface(String),
    #[error("InvalidAlbedo: {0} is outside [0, 1]")]
    InvalidAlbedo(f64),
    #[error("UnequalLengths: {0}")]
    UnequalLengths(String),
}
