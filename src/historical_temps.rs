//! This module provides [`HistoricalTemps`], a dataset of daily maximum temperatures
//! for one postal code and a configurable date window.

use crate::error::TempsError;
use crate::geocoding::locate_postal_code::{Geocoder, ZippopotamGeocoder};
use crate::types::daily_max::DailyMax;
use crate::types::date_range::{default_end, default_start, parse_date, DateField};
use crate::types::location::LatLon;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::parse_daily_max;
use crate::weather_data::fetcher::{ArchiveRequest, ArchiveSource, OpenMeteoArchive};
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Number of days returned by [`HistoricalTemps::top_x_days`] in the menu.
pub const DEFAULT_TOP_DAYS: usize = 5;

/// Daily maximum temperatures for a postal code over a date window.
///
/// The postal code is resolved to coordinates once, when the dataset is built.
/// Changing the window with [`set_start`](Self::set_start) or [`set_end`](Self::set_end)
/// downloads the whole series again for the same coordinates.
///
/// `A` is the archive the series is downloaded from, [`OpenMeteoArchive`] unless a
/// different [`ArchiveSource`] is supplied to the builder.
///
/// # Examples
///
/// ```no_run
/// # use historical_temps::{HistoricalTemps, OpenMeteoArchive, TempsError, ZippopotamGeocoder};
/// # use chrono::NaiveDate;
/// # fn main() -> Result<(), TempsError> {
/// let geocoder = ZippopotamGeocoder::new();
/// let dataset = HistoricalTemps::builder("90210")
///     .geocoder(&geocoder)
///     .archive(OpenMeteoArchive::new())
///     .start(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
///     .build()?;
///
/// println!("{} days above 35°C", dataset.extreme_days(35.0).len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HistoricalTemps<A = OpenMeteoArchive> {
    postal_code: String,
    start: NaiveDate,
    end: NaiveDate,
    location: LatLon,
    location_name: String,
    temperature_series: Vec<DailyMax>,
    archive: A,
}

impl HistoricalTemps<OpenMeteoArchive> {
    /// Builds a dataset for the default window (1950-08-13 to 2023-08-25) using the
    /// Zippopotam.us geocoder and the Open-Meteo archive.
    ///
    /// # Errors
    ///
    /// Same as [`HistoricalTemps::builder`].
    pub fn for_postal_code(postal_code: &str) -> Result<Self, TempsError> {
        let geocoder = ZippopotamGeocoder::new();
        Self::builder(postal_code)
            .geocoder(&geocoder)
            .archive(OpenMeteoArchive::new())
            .build()
    }
}

#[bon]
impl<A: ArchiveSource> HistoricalTemps<A> {
    /// Resolves `postal_code` and downloads the series for the requested window.
    ///
    /// # Arguments
    ///
    /// * `postal_code` - A US postal code (e.g. "98101").
    /// * `.geocoder(&dyn Geocoder)`: **Required.** Resolves the postal code.
    /// * `.archive(A)`: **Required.** Where the series is downloaded from.
    /// * `.start(NaiveDate)`: Optional. First day of the window, defaults to 1950-08-13.
    /// * `.end(NaiveDate)`: Optional. Last day of the window, defaults to 2023-08-25.
    ///
    /// # Errors
    ///
    /// * [`TempsError::InvalidLocation`] if the postal code resolves to non-finite
    ///   coordinates. The archive is not contacted in that case.
    /// * [`TempsError::Geocode`] if the geocoder itself fails.
    /// * [`TempsError::WeatherData`] if the initial download or parse fails.
    #[builder]
    pub fn new(
        #[builder(start_fn)] postal_code: &str,
        geocoder: &dyn Geocoder,
        archive: A,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, TempsError> {
        let place = geocoder.locate(postal_code)?;
        if !place.coordinates.is_finite() {
            warn!("Postal code '{}' did not resolve to coordinates", postal_code);
            return Err(TempsError::InvalidLocation(postal_code.to_string()));
        }

        let mut dataset = Self {
            postal_code: postal_code.to_string(),
            start: start.unwrap_or_else(default_start),
            end: end.unwrap_or_else(default_end),
            location: place.coordinates,
            location_name: place.place_name,
            temperature_series: Vec::new(),
            archive,
        };
        dataset.load_temps()?;
        info!(
            "Loaded {} days for {} ({})",
            dataset.temperature_series.len(),
            dataset.location_name,
            dataset.postal_code
        );
        Ok(dataset)
    }
}

impl<A: ArchiveSource> HistoricalTemps<A> {
    /// Replaces the series with a fresh download for the current window.
    /// The series is left untouched when the download or parse fails.
    fn load_temps(&mut self) -> Result<(), WeatherDataError> {
        let request = ArchiveRequest::new(self.location, self.start, self.end);
        let body = self.archive.fetch(&request)?;
        self.temperature_series = parse_daily_max(&body)?;
        Ok(())
    }

    /// Arithmetic mean of every temperature in the series.
    ///
    /// # Errors
    ///
    /// Returns [`TempsError::EmptySeries`] when there is nothing to average.
    pub fn average_temp(&self) -> Result<f64, TempsError> {
        if self.temperature_series.is_empty() {
            return Err(TempsError::EmptySeries);
        }
        let total: f64 = self
            .temperature_series
            .iter()
            .map(|day| day.temperature)
            .sum();
        Ok(total / self.temperature_series.len() as f64)
    }

    /// Days whose maximum was strictly above `threshold`, in chronological order.
    pub fn extreme_days(&self, threshold: f64) -> Vec<DailyMax> {
        self.temperature_series
            .iter()
            .filter(|day| day.temperature > threshold)
            .copied()
            .collect()
    }

    /// The `num_days` hottest days, hottest first.
    ///
    /// Days with the same temperature keep their chronological order. Asking for
    /// more days than the series holds returns the whole series.
    pub fn top_x_days(&self, num_days: usize) -> Vec<DailyMax> {
        let mut sorted = self.temperature_series.clone();
        sorted.sort_by_key(|day| Reverse(OrderedFloat(day.temperature)));
        sorted.truncate(num_days);
        sorted
    }

    /// Moves the start of the window and reloads the series.
    ///
    /// # Errors
    ///
    /// * [`TempsError::InvalidDate`] if `start` is not a `YYYY-MM-DD` date or the
    ///   archive cannot serve the new window (e.g. it starts after the end).
    /// * [`TempsError::WeatherData`] for transport and decoding failures.
    ///
    /// On any error the previous start date and series are kept.
    pub fn set_start(&mut self, start: &str) -> Result<(), TempsError> {
        self.set_date(DateField::Start, start)
    }

    /// Moves the end of the window and reloads the series.
    ///
    /// Errors behave as for [`set_start`](Self::set_start).
    pub fn set_end(&mut self, end: &str) -> Result<(), TempsError> {
        self.set_date(DateField::End, end)
    }

    fn set_date(&mut self, field: DateField, value: &str) -> Result<(), TempsError> {
        let invalid_date = |reason: String| TempsError::InvalidDate {
            field,
            value: value.to_string(),
            reason,
        };

        let new_date = parse_date(value).map_err(|e| invalid_date(e.to_string()))?;
        let old_date = std::mem::replace(self.date_mut(field), new_date);

        match self.load_temps() {
            Ok(()) => {
                info!(
                    "Reloaded {} days for {} from {} to {}",
                    self.temperature_series.len(),
                    self.location_name,
                    self.start,
                    self.end
                );
                Ok(())
            }
            Err(e) => {
                warn!("Reload with {} date {} failed, keeping {}", field, new_date, old_date);
                *self.date_mut(field) = old_date;
                if e.is_lookup_failure() {
                    Err(invalid_date(e.to_string()))
                } else {
                    Err(e.into())
                }
            }
        }
    }

    fn date_mut(&mut self, field: DateField) -> &mut NaiveDate {
        match field {
            DateField::Start => &mut self.start,
            DateField::End => &mut self.end,
        }
    }
}

impl<A> HistoricalTemps<A> {
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude()
    }

    /// Place name reported by the geocoder, possibly empty.
    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    pub fn temperature_series(&self) -> &[DailyMax] {
        &self.temperature_series
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }
}
