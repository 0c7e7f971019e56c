//! Decoding of archive payloads into a [`DailyMax`] series.

use crate::types::daily_max::DailyMax;
use crate::types::date_range::parse_date;
use crate::weather_data::error::WeatherDataError;
use log::{debug, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: Option<DailySection>,
}

#[derive(Debug, Deserialize)]
struct DailySection {
    time: Option<Vec<String>>,
    temperature_2m_max: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct ArchiveErrorBody {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Parses an archive response body into an ordered series of daily maxima.
///
/// Dates and temperatures are paired by index and must have the same length.
/// Days the archive reports as `null` are left out of the series.
///
/// # Errors
///
/// * [`WeatherDataError::Rejected`] if the body is an archive error payload.
/// * [`WeatherDataError::MissingField`] if `daily`, `daily.time` or
///   `daily.temperature_2m_max` is absent.
/// * [`WeatherDataError::LengthMismatch`] if the two arrays differ in length.
/// * [`WeatherDataError::JsonParse`] / [`WeatherDataError::UnparseableDate`] for malformed content.
///
/// # Examples
///
/// ```
/// use historical_temps::parse_daily_max;
///
/// let body = r#"{"daily": {"time": ["2023-08-24", "2023-08-25"],
///                          "temperature_2m_max": [28.1, 31.4]}}"#;
/// let series = parse_daily_max(body)?;
/// assert_eq!(series.len(), 2);
/// assert_eq!(series[1].temperature, 31.4);
/// # Ok::<(), historical_temps::WeatherDataError>(())
/// ```
pub fn parse_daily_max(body: &str) -> Result<Vec<DailyMax>, WeatherDataError> {
    if let Some(reason) = rejection_reason(body) {
        return Err(WeatherDataError::Rejected { reason });
    }

    let response: ArchiveResponse = serde_json::from_str(body)?;
    let daily = response
        .daily
        .ok_or(WeatherDataError::MissingField("daily"))?;
    let dates = daily
        .time
        .ok_or(WeatherDataError::MissingField("daily.time"))?;
    let temperatures = daily
        .temperature_2m_max
        .ok_or(WeatherDataError::MissingField("daily.temperature_2m_max"))?;

    if dates.len() != temperatures.len() {
        return Err(WeatherDataError::LengthMismatch {
            dates: dates.len(),
            temperatures: temperatures.len(),
        });
    }

    let mut series = Vec::with_capacity(dates.len());
    let mut skipped = 0usize;
    for (raw_date, temperature) in dates.into_iter().zip(temperatures) {
        let date = parse_date(&raw_date).map_err(|source| WeatherDataError::UnparseableDate {
            value: raw_date.clone(),
            source,
        })?;
        match temperature {
            Some(temperature) => series.push(DailyMax::new(date, temperature)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} days without a recorded maximum temperature", skipped);
    }
    debug!("Parsed {} daily maxima", series.len());
    Ok(series)
}

/// Extracts the reason from an `{"error": true, "reason": ...}` payload.
pub(crate) fn rejection_reason(body: &str) -> Option<String> {
    let parsed: ArchiveErrorBody = serde_json::from_str(body).ok()?;
    if !parsed.error {
        return None;
    }
    Some(
        parsed
            .reason
            .unwrap_or_else(|| "no reason given".to_string()),
    )
}
