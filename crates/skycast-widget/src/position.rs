//! Device position lookup.
//!
//! The widget only ever talks to [`PositionSource`]; hosts plug in
//! whatever their platform offers. The bundled
//! [`SystemPositionSource`] reports itself unsupported, which keeps
//! silent startup attempts quiet and gives explicit requests a clear
//! status message.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use skycast_api::Coordinate;
use tokio::time::Instant;

/// How a position should be acquired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPolicy {
    /// Hard deadline for the whole attempt.
    pub timeout: Duration,
    /// A fix at most this old may be served from cache.
    pub maximum_age: Duration,
    /// Ask the platform for its most precise mode.
    pub high_accuracy: bool,
}

impl Default for PositionPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(30),
            high_accuracy: true,
        }
    }
}

/// A resolved device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coordinate: Coordinate,
    /// Accuracy radius in meters, when the platform reports one.
    pub accuracy_m: Option<f64>,
}

/// Why a position could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("geolocation not supported")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("position lookup timed out")]
    Timeout,
}

impl PositionError {
    /// Short message fit for the status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unsupported => "Geolocation is not supported here.",
            Self::PermissionDenied => "Location permission was denied.",
            Self::Unavailable => "Your location is currently unavailable.",
            Self::Timeout => "Timed out while finding your location.",
        }
    }
}

/// Platform hook for acquiring the device position.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Whether this source can produce positions at all.
    fn is_supported(&self) -> bool {
        true
    }

    async fn position(&self, policy: PositionPolicy) -> Result<Position, PositionError>;
}

/// Acquire a position under `policy`, enforcing its timeout even when
/// the source ignores it.
pub async fn acquire(
    source: &dyn PositionSource,
    policy: PositionPolicy,
) -> Result<Position, PositionError> {
    if !source.is_supported() {
        return Err(PositionError::Unsupported);
    }
    match tokio::time::timeout(policy.timeout, source.position(policy)).await {
        Ok(result) => result,
        Err(_) => Err(PositionError::Timeout),
    }
}

/// Stand-in source for hosts without a location service wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPositionSource;

#[async_trait]
impl PositionSource for SystemPositionSource {
    fn is_supported(&self) -> bool {
        false
    }

    async fn position(&self, _policy: PositionPolicy) -> Result<Position, PositionError> {
        Err(PositionError::Unsupported)
    }
}

/// Wraps a source with a short-lived cache so repeated locate actions
/// within `maximum_age` reuse the previous fix.
pub struct CachedSource<S> {
    inner: S,
    last: Mutex<Option<(Instant, Position)>>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            last: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<S: PositionSource> PositionSource for CachedSource<S> {
    fn is_supported(&self) -> bool {
        self.inner.is_supported()
    }

    async fn position(&self, policy: PositionPolicy) -> Result<Position, PositionError> {
        if policy.maximum_age > Duration::ZERO {
            // Guard must drop before the await below.
            let last = self.last.lock();
            if let Some((at, position)) = *last {
                if at.elapsed() <= policy.maximum_age {
                    return Ok(position);
                }
            }
        }
        let position = self.inner.position(policy).await?;
        *self.last.lock() = Some((Instant::now(), position));
        Ok(position)
    }
}
