use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::SolarError;
use crate::transposition::{validate_albedo, DEFAULT_ALBEDO};

/// Geographic location of an observer
///
/// Latitude and longitude are decimal degrees, north and east positive.
/// Elevation is in meters and is informational only.
#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
pub struct Location {
    lat: f64,
    long: f64,
    elevation: f64,
}

impl Location {
    /// Returns a new Location
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude in degrees (-90 to 90)
    /// * 'long' - longitude in degrees (-180 to 180)
    /// * 'elevation' - meters above sea level
    pub fn new(lat: f64, long: f64, elevation: f64) -> Result<Location, SolarError> {
        validate_coordinates(lat, long)?;

        Ok(Location { lat, long, elevation })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn long(&self) -> f64 {
        self.long
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }
}

/// A fixed, tilted surface
///
/// Tilt is the angle from horizontal, azimuth is the direction of the horizontal
/// projection of the surface normal in degrees east of north (north = 0, east = 90,
/// south = 180, west = 270).
#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
pub struct Surface {
    tilt: f64,
    azimuth: f64,
}

impl Surface {
    /// Returns a new Surface
    ///
    /// # Arguments
    ///
    /// * 'tilt' - surface tilt in degrees (0 to 90)
    /// * 'azimuth' - surface azimuth in degrees east of north (0 to 360, non-inclusive)
    pub fn new(tilt: f64, azimuth: f64) -> Result<Surface, SolarError> {
        if !(0.0..=90.0).contains(&tilt) {
            return Err(SolarError::InvalidSurface(format!("tilt {} is outside [0, 90]", tilt)));
        }
        if !(0.0..360.0).contains(&azimuth) {
            return Err(SolarError::InvalidSurface(format!("azimuth {} is outside [0, 360)", azimuth)));
        }

        Ok(Surface { tilt, azimuth })
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }
}

/// A PV array with its location, orientation and the reflectivity of the ground in front of it
///
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PVSystem {
    pub name: String,
    pub location: Location,
    pub surface: Surface,
    albedo: f64,
}

impl PVSystem {
    /// Returns a new PVSystem using the default albedo
    ///
    /// # Arguments
    ///
    /// * 'name' - name or id of the system
    /// * 'location' - where the system is installed
    /// * 'surface' - orientation of the array
    pub fn new(name: &str, location: Location, surface: Surface) -> PVSystem {
        PVSystem {
            name: name.to_string(),
            location,
            surface,
            albedo: DEFAULT_ALBEDO,
        }
    }

    /// Returns the system with another albedo
    ///
    /// # Arguments
    ///
    /// * 'albedo' - fraction of global irradiance reflected by the ground, 0 to 1
    pub fn with_albedo(mut self, albedo: f64) -> Result<PVSystem, SolarError> {
        self.albedo = validate_albedo(albedo)?;
        Ok(self)
    }

    pub fn albedo(&self) -> f64 {
        self.albedo
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for PVSystem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "PV System '{}' at Lat {} Lon {}. Array azimuth: {} tilt: {}",
               self.name, self.location.lat, self.location.long, self.surface.azimuth, self.surface.tilt)
    }
}

/// Sun position in degrees
///
/// Zenith is always exactly 90 - altitude and azimuth is within [0, 360).
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct SolarPosition {
    pub altitude: f64,
    pub zenith: f64,
    pub azimuth: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct SolarPositionSample {
    pub valid_time: DateTime<Utc>,
    pub altitude: f64,
    pub zenith: f64,
    pub azimuth: f64,
}

impl SolarPositionSample {
    pub fn new(valid_time: DateTime<Utc>, position: SolarPosition) -> SolarPositionSample {
        SolarPositionSample {
            valid_time,
            altitude: position.altitude,
            zenith: position.zenith,
            azimuth: position.azimuth,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct AoiSample {
    pub valid_time: DateTime<Utc>,
    pub aoi: f64,
}

/// Horizontal irradiance components in W/m²
///
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct IrradianceSample {
    pub valid_time: DateTime<Utc>,
    pub ghi: f64,
    pub dni: f64,
    pub dhi: f64,
}

/// Plane-of-array irradiance components in W/m²
///
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct PoaComponents {
    pub beam: f64,
    pub ground: f64,
    pub diffuse: f64,
    pub total: f64,
}

impl PoaComponents {
    /// Returns components where each of beam, ground and diffuse is floored at zero and
    /// total is recalculated as their sum.
    ///
    pub fn floored(&self) -> PoaComponents {
        let beam = self.beam.max(0.0);
        let ground = self.ground.max(0.0);
        let diffuse = self.diffuse.max(0.0);

        PoaComponents { beam, ground, diffuse, total: beam + ground + diffuse }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct PoaSample {
    pub valid_time: DateTime<Utc>,
    pub beam: f64,
    pub ground: f64,
    pub diffuse: f64,
    pub total: f64,
}

impl PoaSample {
    pub fn new(valid_time: DateTime<Utc>, poa: PoaComponents) -> PoaSample {
        PoaSample {
            valid_time,
            beam: poa.beam,
            ground: poa.ground,
            diffuse: poa.diffuse,
            total: poa.total,
        }
    }
}

/// Checks that latitude and longitude are within their physical ranges
///
/// # Arguments
///
/// * 'lat' - latitude in degrees
/// * 'long' - longitude in degrees
pub fn validate_coordinates(lat: f64, long: f64) -> Result<(), SolarError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(SolarError::InvalidCoordinate(format!("latitude {} is outside [-90, 90]", lat)));
    }
    if !(-180.0..=180.0).contains(&long) {
        return Err(SolarError::InvalidCoordinate(format!("longitude {} is outside [-180, 180]", long)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_rejects_out_of_range_coordinates() {
        assert!(Location::new(52.01, 4.36, 0.0).is_ok());
        assert!(matches!(Location::new(90.5, 0.0, 0.0), Err(SolarError::InvalidCoordinate(_))));
        assert!(matches!(Location::new(0.0, -180.1, 0.0), Err(SolarError::InvalidCoordinate(_))));
        assert!(matches!(Location::new(f64::NAN, 0.0, 0.0), Err(SolarError::InvalidCoordinate(_))));
    }

    #[test]
    fn surface_rejects_out_of_range_orientation() {
        assert!(Surface::new(0.0, 0.0).is_ok());
        assert!(Surface::new(90.0, 359.9).is_ok());
        assert!(matches!(Surface::new(-1.0, 180.0), Err(SolarError::InvalidSurface(_))));
        assert!(matches!(Surface::new(30.0, 360.0), Err(SolarError::InvalidSurface(_))));
    }

    #[test]
    fn pv_system_display() {
        let system = PVSystem::new(
            "Sonora",
            Location::new(30.0, -110.0, 0.0).unwrap(),
            Surface::new(0.0, 180.0).unwrap(),
        );

        assert_eq!(system.to_string(), "PV System 'Sonora' at Lat 30 Lon -110. Array azimuth: 180 tilt: 0");
        assert_eq!(system.albedo(), DEFAULT_ALBEDO);
    }

    #[test]
    fn pv_system_albedo_is_validated() {
        let system = PVSystem::new(
            "Delft",
            Location::new(52.01, 4.36, 0.0).unwrap(),
            Surface::new(35.0, 180.0).unwrap(),
        );

        assert_eq!(system.clone().with_albedo(0.82).unwrap().albedo(), 0.82);
        assert_eq!(system.with_albedo(1.2), Err(SolarError::InvalidAlbedo(1.2)));
    }

    #[test]
    fn flooring_is_idempotent() {
        let poa = PoaComponents { beam: -120.5, ground: 3.2, diffuse: 80.0, total: -37.3 };
        let once = poa.floored();
        let twice = once.floored();

        assert_eq!(once, twice);
        assert_eq!(once.beam, 0.0);
        assert_eq!(once.total, 83.2);
    }
}
