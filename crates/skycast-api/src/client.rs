//! HTTP client for the skycast backend.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::auth::AuthProvider;
use crate::error::{extract_error_message, ApiError};
use crate::types::{
    AutocompleteResponse, Coordinate, Geocoded, GeocodeResponse, Suggestion, Unit, WeatherReport,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct BackendClient {
    pub(crate) base_url: Url,
    pub(crate) client: reqwest::Client,
    pub(crate) auth: Arc<dyn AuthProvider>,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str, auth: Arc<dyn AuthProvider>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: Url::parse(base_url)?,
            client,
            auth,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Attach the Authorization header, if the provider has one.
    pub(crate) fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.authorization() {
            Some(value) => req.header(reqwest::header::AUTHORIZATION, value),
            None => req,
        }
    }

    /// Fetch suggestions for a partial place query.
    ///
    /// A body-level `error` comes back as [`ApiError::Signaled`] so the
    /// dropdown can show the server's own wording. Disabled items (the
    /// backend's rate-limit notice) pass through in the list.
    #[instrument(skip(self), level = "info")]
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, ApiError> {
        let mut url = self.endpoint("api/autocomplete")?;
        url.query_pairs_mut().append_pair("q", query);

        let response = self.client.get(url).send().await?;
        let body: AutocompleteResponse = self.handle_response(response).await?;
        if let Some(message) = body.error {
            return Err(ApiError::Signaled(message));
        }

        tracing::debug!(count = body.suggestions.len(), "autocomplete results");
        Ok(body.suggestions)
    }

    /// Resolve a free-text query to a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn geocode(&self, query: &str) -> Result<Geocoded, ApiError> {
        let mut url = self.endpoint("api/geocode")?;
        url.query_pairs_mut().append_pair("q", query);

        let response = self.client.get(url).send().await?;
        let body: GeocodeResponse = self.handle_response(response).await?;
        if let Some(message) = body.error {
            return Err(ApiError::Signaled(message));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Geocoded {
                label: body.label,
                coordinate: Coordinate::new(lat, lon),
            }),
            _ => Err(ApiError::Invalid(
                "geocoder returned no coordinates".to_string(),
            )),
        }
    }

    /// Fetch current conditions and the daily forecast for a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn weather(
        &self,
        coordinate: Coordinate,
        unit: Unit,
    ) -> Result<WeatherReport, ApiError> {
        let mut url = self.endpoint("api/weather")?;
        url.query_pairs_mut()
            .append_pair("lat", &coordinate.latitude.to_string())
            .append_pair("lon", &coordinate.longitude.to_string())
            .append_pair("unit", unit.as_str());

        let response = self.client.get(url).send().await?;
        let mut report: WeatherReport = self.handle_response(response).await?;
        if let Some(message) = report.error.take() {
            return Err(ApiError::Signaled(message));
        }

        tracing::debug!(days = report.daily.len(), "weather report received");
        Ok(report)
    }

    /// Parse a 2xx body, or turn a failure status into a typed error
    /// carrying whatever message the body offers.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::Invalid(format!("JSON parse error: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body).unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}
