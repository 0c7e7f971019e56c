use crate::types::date_range::DATE_FORMAT;
use crate::types::location::LatLon;
use crate::utils::{archive_url, trim_base_url};
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::rejection_reason;
use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::blocking::Client;

/// The only daily variable requested from the archive.
pub const DAILY_VARIABLE: &str = "temperature_2m_max";
/// Day boundaries of the archive's daily aggregation.
pub const ARCHIVE_TIMEZONE: &str = "America/Los_Angeles";

/// Parameters of a single archive request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveRequest {
    pub location: LatLon,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ArchiveRequest {
    pub fn new(location: LatLon, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            location,
            start,
            end,
        }
    }

    /// Query string parameters, in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.location.latitude().to_string()),
            ("longitude", self.location.longitude().to_string()),
            ("start_date", self.start.format(DATE_FORMAT).to_string()),
            ("end_date", self.end.format(DATE_FORMAT).to_string()),
            ("daily", DAILY_VARIABLE.to_string()),
            ("timezone", ARCHIVE_TIMEZONE.to_string()),
        ]
    }
}

/// A source of raw archive responses.
///
/// Implementations return the response body untouched; decoding is done by
/// [`crate::parse_daily_max`].
pub trait ArchiveSource {
    fn fetch(&self, request: &ArchiveRequest) -> Result<String, WeatherDataError>;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for &T {
    fn fetch(&self, request: &ArchiveRequest) -> Result<String, WeatherDataError> {
        (**self).fetch(request)
    }
}

/// Blocking client for the Open-Meteo historical archive.
#[derive(Debug, Clone)]
pub struct OpenMeteoArchive {
    base_url: String,
    client: Client,
}

impl OpenMeteoArchive {
    /// Uses `HISTORICAL_TEMPS_ARCHIVE_URL` when set, the public archive otherwise.
    pub fn new() -> Self {
        Self::with_base_url(&archive_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OpenMeteoArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSource for OpenMeteoArchive {
    fn fetch(&self, request: &ArchiveRequest) -> Result<String, WeatherDataError> {
        info!(
            "Requesting daily maxima at {} from {} to {}",
            request.location, request.start, request.end
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&request.query_pairs())
            .send()
            .map_err(|e| WeatherDataError::NetworkRequest(self.base_url.clone(), e))?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response
            .text()
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;

        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            if status.is_client_error() {
                if let Some(reason) = rejection_reason(&body) {
                    return Err(WeatherDataError::Rejected { reason });
                }
            }
            return Err(WeatherDataError::HttpStatus { url, status });
        }

        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_daily_max;
    use crate::test_server::OneShotServer;

    const LIVE_ARCHIVE: &str = "https://archive-api.open-meteo.com/v1/archive";

    fn seattle_week() -> ArchiveRequest {
        ArchiveRequest::new(
            LatLon(47.6114, -122.3305),
            NaiveDate::from_ymd_opt(2023, 8, 19).unwrap(),
            NaiveDate::from_ymd_opt(2023, 8, 25).unwrap(),
        )
    }

    #[test]
    fn test_query_pairs() {
        let pairs = seattle_week().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("latitude", "47.6114".to_string()),
                ("longitude", "-122.3305".to_string()),
                ("start_date", "2023-08-19".to_string()),
                ("end_date", "2023-08-25".to_string()),
                ("daily", "temperature_2m_max".to_string()),
                ("timezone", "America/Los_Angeles".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let archive = OpenMeteoArchive::with_base_url("http://127.0.0.1:9/v1/archive/");
        assert_eq!(archive.base_url(), "http://127.0.0.1:9/v1/archive");
    }

    #[test]
    fn test_unreachable_host_is_not_a_lookup_failure() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let archive = OpenMeteoArchive::with_base_url("http://127.0.0.1:9/v1/archive");
        let err = archive.fetch(&seattle_week()).unwrap_err();
        assert!(!err.is_lookup_failure(), "Unexpected error: {:?}", err);
    }

    fn archive_for(server: &OneShotServer) -> OpenMeteoArchive {
        OpenMeteoArchive::with_base_url(&format!("{}/v1/archive", server.base_url))
    }

    #[test]
    fn test_successful_response_returns_body() {
        let body = r#"{"daily": {"time": ["2023-08-19"], "temperature_2m_max": [27.1]}}"#;
        let server = OneShotServer::respond("200 OK", "application/json", body);
        let fetched = archive_for(&server).fetch(&seattle_week()).unwrap();
        assert_eq!(fetched, body);

        let request_line = server.request_line();
        assert!(request_line.starts_with("GET /v1/archive?latitude=47.6114"));
        assert!(request_line.contains("daily=temperature_2m_max"));
        assert!(request_line.contains("timezone=America"));
    }

    #[test]
    fn test_client_error_with_reason_is_rejected() {
        let body = r#"{"error":true,"reason":"End-date must be larger or equal than start-date"}"#;
        let server = OneShotServer::respond("400 Bad Request", "application/json", body);
        let err = archive_for(&server).fetch(&seattle_week()).unwrap_err();
        server.request_line();

        assert!(err.is_lookup_failure(), "Unexpected error: {:?}", err);
        match err {
            WeatherDataError::Rejected { reason } => {
                assert_eq!(reason, "End-date must be larger or equal than start-date")
            }
            other => panic!("Expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_client_error_without_payload_is_http_status() {
        let server = OneShotServer::respond("400 Bad Request", "text/plain", "bad request");
        let err = archive_for(&server).fetch(&seattle_week()).unwrap_err();
        server.request_line();

        assert!(!err.is_lookup_failure(), "Unexpected error: {:?}", err);
        match err {
            WeatherDataError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 400),
            other => panic!("Expected an HTTP status error, got {:?}", other),
        }
    }

    #[test]
    fn test_server_error_is_http_status_even_with_payload() {
        let body = r#"{"error":true,"reason":"Service unavailable"}"#;
        let server = OneShotServer::respond("503 Service Unavailable", "application/json", body);
        let err = archive_for(&server).fetch(&seattle_week()).unwrap_err();
        server.request_line();

        assert!(!err.is_lookup_failure(), "Unexpected error: {:?}", err);
        match err {
            WeatherDataError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 503),
            other => panic!("Expected an HTTP status error, got {:?}", other),
        }
    }

    #[test]
    #[ignore] // Run with: cargo test -- --ignored
    fn test_fetch_seattle_week() -> Result<(), WeatherDataError> {
        let archive = OpenMeteoArchive::with_base_url(LIVE_ARCHIVE);
        let body = archive.fetch(&seattle_week())?;
        let series = parse_daily_max(&body)?;
        assert_eq!(series.len(), 7, "Expected one entry per day in range");
        Ok(())
    }

    #[test]
    #[ignore]
    fn test_reversed_range_is_rejected() {
        let archive = OpenMeteoArchive::with_base_url(LIVE_ARCHIVE);
        let mut request = seattle_week();
        std::mem::swap(&mut request.start, &mut request.end);
        let err = archive.fetch(&request).unwrap_err();
        assert!(err.is_lookup_failure(), "Unexpected error: {:?}", err);
    }
}
