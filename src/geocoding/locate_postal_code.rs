//! Resolves US postal codes to coordinates and a place name.

use crate::geocoding::error::GeocodeError;
use crate::types::location::{LatLon, PostalPlace};
use crate::utils::{geocode_url, trim_base_url};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

const COUNTRY: &str = "us";

/// Maps a postal code to a [`PostalPlace`].
///
/// Codes that cannot be resolved are not errors: implementations return
/// [`PostalPlace::unresolved`] and leave the decision to the caller. Errors are
/// reserved for failures to reach or understand the lookup service.
pub trait Geocoder {
    fn locate(&self, postal_code: &str) -> Result<PostalPlace, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct ZippopotamResponse {
    #[serde(default)]
    places: Vec<ZippopotamPlace>,
}

#[derive(Debug, Deserialize)]
struct ZippopotamPlace {
    #[serde(rename = "place name", default)]
    place_name: String,
    latitude: String,
    longitude: String,
}

/// Blocking client for the Zippopotam.us postal code service.
#[derive(Debug, Clone)]
pub struct ZippopotamGeocoder {
    base_url: String,
    client: Client,
}

impl ZippopotamGeocoder {
    /// Uses `HISTORICAL_TEMPS_GEOCODE_URL` when set, the public service otherwise.
    pub fn new() -> Self {
        Self::with_base_url(&geocode_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            client: Client::new(),
        }
    }
}

impl Default for ZippopotamGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for ZippopotamGeocoder {
    fn locate(&self, postal_code: &str) -> Result<PostalPlace, GeocodeError> {
        let Some(zip) = normalize_zip(postal_code) else {
            debug!("'{}' is not a US postal code, not looking it up", postal_code);
            return Ok(PostalPlace::unresolved());
        };

        let url = format!("{}/{}/{}", self.base_url, COUNTRY, zip);
        info!("Looking up postal code {} at {}", zip, url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("Postal code {} is unknown", zip);
            return Ok(PostalPlace::unresolved());
        }
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(GeocodeError::HttpStatus { url, status });
        }

        let body = response
            .text()
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;
        place_from_body(&body)
    }
}

/// Accepts `12345` and `12345-6789`, returning the five digit code.
pub(crate) fn normalize_zip(postal_code: &str) -> Option<&str> {
    let trimmed = postal_code.trim();
    let (zip, plus_four) = match trimmed.split_once('-') {
        Some((zip, plus_four)) => (zip, Some(plus_four)),
        None => (trimmed, None),
    };
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(zip, 5) {
        return None;
    }
    if let Some(plus_four) = plus_four {
        if !all_digits(plus_four, 4) {
            return None;
        }
    }
    Some(zip)
}

/// Takes the first listed place; coordinates that do not parse become NaN.
pub(crate) fn place_from_body(body: &str) -> Result<PostalPlace, GeocodeError> {
    let response: ZippopotamResponse = serde_json::from_str(body)?;
    let Some(place) = response.places.into_iter().next() else {
        return Ok(PostalPlace::unresolved());
    };
    let latitude = place.latitude.trim().parse::<f64>().unwrap_or(f64::NAN);
    let longitude = place.longitude.trim().parse::<f64>().unwrap_or(f64::NAN);
    Ok(PostalPlace::new(LatLon(latitude, longitude), place.place_name))
}
