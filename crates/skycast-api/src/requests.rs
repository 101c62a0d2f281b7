//! Saved weather request CRUD against the backend.
//!
//! Records are server-owned; the client never patches its local list,
//! it refetches after each mutation. Mutating calls carry the
//! Authorization header from the client's [`AuthProvider`].
//!
//! [`AuthProvider`]: crate::auth::AuthProvider

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::BackendClient;
use crate::error::{extract_error_message, ApiError};
use crate::types::Unit;

/// A persisted location + date range + unit record.
///
/// Dates stay as the backend's ISO strings; the widget parses them for
/// display and the edit form round-trips them untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRequest {
    pub id: i64,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub unit: Unit,
}

/// Body for creating a saved request.
///
/// The backend takes either a resolved `lat`/`lon` pair or a free-text
/// `query` it geocodes once server-side. Note the create body speaks
/// `lat`/`lon` while records come back as `latitude`/`longitude`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub unit: Unit,
}

/// Partial update body; only changed fields go on the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl UpdateRequest {
    /// True when no field changed and the call can be skipped.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.unit.is_none()
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendClient {
    /// List all saved requests.
    #[instrument(skip(self), level = "info")]
    pub async fn list_requests(&self) -> Result<Vec<SavedRequest>, ApiError> {
        let url = self.endpoint("api/requests")?;
        let response = self.client.get(url).send().await?;
        let records: Vec<SavedRequest> = self.handle_response(response).await?;

        tracing::debug!(count = records.len(), "saved requests listed");
        Ok(records)
    }

    /// Fetch a single saved request by id.
    #[instrument(skip(self), level = "info")]
    pub async fn get_request(&self, id: i64) -> Result<SavedRequest, ApiError> {
        let url = self.endpoint(&format!("api/requests/{}", id))?;
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Create a saved request.
    #[instrument(skip(self, req), level = "info")]
    pub async fn create_request(&self, req: &CreateRequest) -> Result<Created, ApiError> {
        let url = self.endpoint("api/requests")?;
        let request = self.authorize(self.client.post(url).json(req));
        let response = request.send().await?;
        let created: Created = self.handle_response(response).await?;

        tracing::info!(id = created.id, "saved request created");
        Ok(created)
    }

    /// Apply a partial update to a saved request.
    ///
    /// The backend answers with an ack message, not the record; the
    /// caller refetches the list for truth.
    #[instrument(skip(self, req), level = "info")]
    pub async fn update_request(&self, id: i64, req: &UpdateRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/requests/{}", id))?;
        let request = self.authorize(self.client.put(url).json(req));
        let response = request.send().await?;

        self.ack_response(response).await
    }

    /// Delete a saved request.
    #[instrument(skip(self), level = "info")]
    pub async fn delete_request(&self, id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/requests/{}", id))?;
        let request = self.authorize(self.client.delete(url));
        let response = request.send().await?;

        self.ack_response(response).await
    }

    /// Success bodies on mutations are ack messages; ignore them.
    async fn ack_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
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
