//! Historic daily maximum temperatures for US postal codes.
//!
//! A [`HistoricalTemps`] dataset resolves a postal code to coordinates, downloads the
//! daily maximum temperatures for a date window from the Open-Meteo archive, and
//! answers simple questions about them: the mean, the days above a threshold, and
//! the hottest days.
//!
//! ```no_run
//! use historical_temps::{HistoricalTemps, TempsError};
//!
//! # fn main() -> Result<(), TempsError> {
//! let mut seattle = HistoricalTemps::for_postal_code("98101")?;
//! println!("{}: {:.2}", seattle.location_name(), seattle.average_temp()?);
//!
//! seattle.set_start("2020-01-01")?;
//! for day in seattle.top_x_days(5) {
//!     println!("{}", day);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod geocoding;
mod historical_temps;
mod types;
mod utils;
#[cfg(test)]
mod test_server;
mod weather_data;

pub use error::TempsError;
pub use historical_temps::*;

pub use geocoding::error::GeocodeError;
pub use geocoding::locate_postal_code::{Geocoder, ZippopotamGeocoder};

pub use weather_data::error::WeatherDataError;
pub use weather_data::extractor::parse_daily_max;
pub use weather_data::fetcher::{
    ArchiveRequest, ArchiveSource, OpenMeteoArchive, ARCHIVE_TIMEZONE, DAILY_VARIABLE,
};

pub use types::daily_max::DailyMax;
pub use types::date_range::{
    parse_date, DateField, DATE_FORMAT, DEFAULT_END_DATE, DEFAULT_START_DATE,
};
pub use types::location::{LatLon, PostalPlace};
