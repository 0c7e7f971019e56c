use crate::geocoding::error::GeocodeError;
use crate::types::date_range::DateField;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TempsError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("Invalid postal code '{0}', no coordinates found")]
    InvalidLocation(String),

    #[error("Invalid {field} date '{value}': {reason}")]
    InvalidDate {
        field: DateField,
        value: String,
        reason: String,
    },

    #[error("Temperature series is empty")]
    EmptySeries,
}
