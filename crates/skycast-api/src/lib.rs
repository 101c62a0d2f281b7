//! HTTP client for the skycast weather backend.
//!
//! Wire types plus a thin reqwest client, one method per endpoint.
//! Token issuance is external; see [`auth::AuthProvider`].

pub mod auth;
pub mod client;
pub mod error;
pub mod requests;
pub mod types;

pub use auth::{AuthProvider, NoAuth, StaticToken};
pub use client::BackendClient;
pub use error::ApiError;
pub use requests::{CreateRequest, Created, SavedRequest, UpdateRequest};
pub use types::{
    Coordinate, CurrentWeather, ForecastDay, Geocoded, Suggestion, Unit, WeatherReport,
};
