use log::debug;
use std::env;

pub(crate) const ARCHIVE_URL_VAR: &str = "HISTORICAL_TEMPS_ARCHIVE_URL";
pub(crate) const GEOCODE_URL_VAR: &str = "HISTORICAL_TEMPS_GEOCODE_URL";

const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
const DEFAULT_GEOCODE_URL: &str = "https://api.zippopotam.us";

pub(crate) fn archive_url() -> String {
    endpoint_from_env(ARCHIVE_URL_VAR, DEFAULT_ARCHIVE_URL)
}

pub(crate) fn geocode_url() -> String {
    endpoint_from_env(GEOCODE_URL_VAR, DEFAULT_GEOCODE_URL)
}

fn endpoint_from_env(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(url) if !url.trim().is_empty() => {
            debug!("Using {} from {}", url, var);
            trim_base_url(&url)
        }
        _ => default.to_string(),
    }
}

pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
