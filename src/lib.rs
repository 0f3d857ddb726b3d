//! Sun position and plane-of-array irradiance for fixed-tilt PV arrays.
//!
//! Data flows one way, each stage taking the previous stage's output:
//! time series ([`ephemeris`]) to sun positions ([`solar_position`]) to angles of
//! incidence ([`incidence`]) to plane-of-array irradiance ([`transposition`]).
//! [`irradiance::estimate`] chains them for a [`models::PVSystem`].

pub mod ephemeris;
pub mod errors;
pub mod incidence;
pub mod irradiance;
pub mod models;
pub mod solar_position;
pub mod transposition;
