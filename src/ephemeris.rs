use std::ops::Add;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use crate::errors::SolarError;

/// Julian day of epoch J2000.0, 2000-01-01 12:00 UTC
pub const J2000_JULIAN_DAY: f64 = 2_451_545.0;

/// Julian day of the unix epoch, 1970-01-01 00:00 UTC
const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Naive formats accepted by parse_timestamp, all interpreted as UTC.
/// The last one is the PVGIS format, e.g. "20070101:0000".
const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y%m%d:%H%M"];

/// Returns the Julian day for the given point in time
///
/// Time zone aware timestamps are converted to UTC before conversion.
///
/// # Arguments
///
/// * 'date_time' - the point in time to convert
pub fn to_julian_day<Tz: TimeZone>(date_time: &DateTime<Tz>) -> f64 {
    let utc = date_time.with_timezone(&Utc);
    let seconds = utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 / 1e9;

    UNIX_EPOCH_JULIAN_DAY + seconds / SECONDS_PER_DAY
}

/// Returns days elapsed since epoch J2000.0
///
/// # Arguments
///
/// * 'julian_day' - Julian day to convert
pub fn days_since_epoch(julian_day: f64) -> f64 {
    julian_day - J2000_JULIAN_DAY
}

/// Returns days elapsed since epoch J2000.0 for the given point in time
///
/// # Arguments
///
/// * 'date_time' - the point in time to convert
pub fn day_count<Tz: TimeZone>(date_time: &DateTime<Tz>) -> f64 {
    days_since_epoch(to_julian_day(date_time))
}

/// Parses a timestamp into UTC
///
/// RFC 3339 timestamps carry their own offset and are converted to UTC, while naive
/// timestamps (no offset) are assumed to already be in UTC.
///
/// # Arguments
///
/// * 'text' - the timestamp to parse
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, SolarError> {
    let text = text.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Ok(date_time.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| SolarError::InvalidTimestamp(format!("can't parse '{}' as a point in time", text)))
}

/// Interprets a wall clock time in the given time zone and returns it in UTC
///
/// Local times that don't exist or that occur twice (daylight saving switches) can't be
/// resolved to one absolute point in time and are rejected.
///
/// # Arguments
///
/// * 'naive' - local wall clock time
/// * 'tz' - the time zone the wall clock time belongs to
pub fn localize<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Result<DateTime<Utc>, SolarError> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(date_time) => Ok(date_time.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, _) => Err(SolarError::InvalidTimestamp(format!("local time {} is ambiguous", naive))),
        LocalResult::None => Err(SolarError::InvalidTimestamp(format!("local time {} does not exist", naive))),
    }
}

/// An ordered, strictly increasing sequence of UTC timestamps
///
#[derive(Clone, PartialEq, Debug)]
pub struct TimeSeries {
    times: Vec<DateTime<Utc>>,
}

impl TimeSeries {
    /// Returns a new TimeSeries from time zone aware timestamps, converted to UTC
    ///
    /// # Arguments
    ///
    /// * 'times' - timestamps in increasing order
    pub fn new<Tz: TimeZone>(times: &[DateTime<Tz>]) -> Result<TimeSeries, SolarError> {
        let times = times
            .iter()
            .map(|t| t.with_timezone(&Utc))
            .collect::<Vec<DateTime<Utc>>>();

        Self::checked(times)
    }

    /// Returns a new TimeSeries from naive timestamps, which are assumed to be UTC
    ///
    /// # Arguments
    ///
    /// * 'times' - timestamps in increasing order
    pub fn from_naive(times: &[NaiveDateTime]) -> Result<TimeSeries, SolarError> {
        Self::checked(times.iter().map(|t| t.and_utc()).collect())
    }

    /// Returns a TimeSeries stepping from start to end (non-inclusive)
    ///
    /// # Arguments
    ///
    /// * 'start' - the first timestamp
    /// * 'end' - the end of the series (non-inclusive)
    /// * 'step' - time between timestamps, must be positive
    pub fn range(start: DateTime<Utc>, end: DateTime<Utc>, step: TimeDelta) -> Result<TimeSeries, SolarError> {
        if step <= TimeDelta::zero() {
            return Err(SolarError::InvalidTimestamp(format!("step {} must be positive", step)));
        }
        if end < start {
            return Err(SolarError::InvalidTimestamp(format!("end {} is before start {}", end, start)));
        }

        let mut times = Vec::new();
        let mut current = start;
        while current < end {
            times.push(current);
            current = current.add(step);
        }

        Ok(TimeSeries { times })
    }

    /// Returns an hourly TimeSeries from start to end (non-inclusive)
    ///
    /// # Arguments
    ///
    /// * 'start' - the first timestamp
    /// * 'end' - the end of the series (non-inclusive)
    pub fn hourly(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<TimeSeries, SolarError> {
        Self::range(start, end, TimeDelta::hours(1))
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first(&self) -> Option<DateTime<Utc>> {
        self.times.first().copied()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.times.last().copied()
    }

    /// Returns days since J2000.0 for each timestamp, in order
    ///
    pub fn day_counts(&self) -> Vec<f64> {
        self.times.iter().map(day_count).collect()
    }

    /// Returns the time between the first two timestamps in hours, or None if there are
    /// fewer than two timestamps
    ///
    pub fn step_hours(&self) -> Option<f64> {
        match self.times.as_slice() {
            [first, second, ..] => Some((*second - *first).num_seconds() as f64 / 3600.0),
            _ => None,
        }
    }

    fn checked(times: Vec<DateTime<Utc>>) -> Result<TimeSeries, SolarError> {
        if let Some(w) = times.windows(2).find(|w| w[1] <= w[0]) {
            return Err(SolarError::InvalidTimestamp(format!("{} does not follow {} in increasing order", w[1], w[0])));
        }

        Ok(TimeSeries { times })
    }
}
