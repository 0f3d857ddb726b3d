mod errors;
mod models;

use std::collections::HashMap;
use std::time::Duration;
use chrono::{DateTime, Datelike, Timelike, Utc};
use log::{debug, info};
use reqwest::blocking::Client;
use pv_irradiance::ephemeris::{parse_timestamp, TimeSeries};
use pv_irradiance::models::{IrradianceSample, Location};
use crate::config::TmyParameters;
use crate::manager_tmy::models::TmyDocument;

pub use errors::TmyError;

/// Struct for fetching Typical Meteorological Year (TMY) data from PVGIS
///
/// A TMY is one synthetic year of hourly data, composed of months picked from the
/// configured range of years.
pub struct Tmy {
    client: Client,
    url: String,
    lat: f64,
    long: f64,
    start_year: u16,
    end_year: u16,
}

impl Tmy {
    /// Returns a Tmy struct ready for fetching TMY data for the given location
    ///
    /// # Arguments
    ///
    /// * 'config' - TMY service configuration
    /// * 'location' - location to fetch data for
    pub fn new(config: &TmyParameters, location: &Location) -> Result<Tmy, TmyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Tmy {
            client,
            url: config.url.clone(),
            lat: location.lat(),
            long: location.long(),
            start_year: config.start_year,
            end_year: config.end_year,
        })
    }

    /// Retrieves the TMY json document for the configured location
    ///
    pub fn fetch_tmy(&self) -> Result<String, TmyError> {
        let response = self.client
            .get(&self.url)
            .query(&[
                ("lat", self.lat.to_string()),
                ("lon", self.long.to_string()),
                ("startyear", self.start_year.to_string()),
                ("endyear", self.end_year.to_string()),
                ("outputformat", "json".to_string()),
            ])
            .send()?
            .error_for_status()?;

        let json = response.text()?;
        info!("TMY document received, {} bytes", json.len());

        Ok(json)
    }
}

/// Parses a PVGIS TMY json document and picks one record per timestamp in the time series
///
/// Records are matched on month, day and hour in UTC since the TMY year is synthetic.
/// Leap day records in the document are skipped, and a requested February 29 uses the
/// records of February 28.
///
/// # Arguments
///
/// * 'json' - PVGIS TMY document
/// * 'times' - the time series to align with
pub fn align_tmy(json: &str, times: &TimeSeries) -> Result<Vec<IrradianceSample>, TmyError> {
    let document: TmyDocument = serde_json::from_str(json)?;
    let records = document.outputs.tmy_hourly;
    if records.is_empty() {
        return Err(TmyError::NoContent);
    }

    let mut by_hour: HashMap<(u32, u32, u32), (f64, f64, f64)> = HashMap::with_capacity(records.len());
    for r in records.iter() {
        let valid_time = parse_timestamp(&r.time)
            .map_err(|e| TmyError::Document(e.to_string()))?;

        for (name, value) in [("G(h)", r.ghi), ("Gb(n)", r.dni), ("Gd(h)", r.dhi)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TmyError::Document(format!("{} is {} at {}", name, value, r.time)));
            }
        }

        if is_leap_day(valid_time) {
            continue;
        }
        by_hour.insert((valid_time.month(), valid_time.day(), valid_time.hour()), (r.ghi, r.dni, r.dhi));
    }
    debug!("TMY records: {}, distinct hours: {}", records.len(), by_hour.len());

    let irradiance = times.times()
        .iter()
        .map(|t| {
            by_hour
                .get(&calendar_hour(*t))
                .map(|(ghi, dni, dhi)| IrradianceSample { valid_time: *t, ghi: *ghi, dni: *dni, dhi: *dhi })
                .ok_or_else(|| TmyError::Document(format!("no TMY record for {}", t)))
        })
        .collect::<Result<Vec<IrradianceSample>, TmyError>>()?;

    Ok(irradiance)
}

fn is_leap_day(date_time: DateTime<Utc>) -> bool {
    date_time.month() == 2 && date_time.day() == 29
}

fn calendar_hour(date_time: DateTime<Utc>) -> (u32, u32, u32) {
    if is_leap_day(date_time) {
        (2, 28, date_time.hour())
    } else {
        (date_time.month(), date_time.day(), date_time.hour())
    }
}
