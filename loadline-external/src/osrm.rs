//! Road distances from an OSRM Table service.

use std::time::Duration;

use loadline_core::{Coordinate, DistanceError, DistanceMatrix, DistanceProvider};
use log::debug;

use crate::DEFAULT_USER_AGENT;
use crate::blocking::{BlockingClient, ClientBuildError};
use crate::wire::TableResponse;

/// Base URL used when none is configured.
pub const DEFAULT_OSRM_URL: &str = "http://localhost:5000";

const DEFAULT_PROFILE: &str = "driving";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const METRES_PER_KM: f64 = 1000.0;

/// Configuration for [`OsrmDistanceProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Routing profile, e.g. `driving`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`DistanceProvider`] backed by OSRM's Table API.
///
/// Distances come back in metres and are converted to kilometres. A pair
/// with no route (a `null` cell) makes the whole matrix invalid, since the
/// solvers need every leg.
///
/// # Example
///
/// ```no_run
/// use loadline_core::{Coordinate, DistanceProvider};
/// use loadline_external::OsrmDistanceProvider;
///
/// let provider = OsrmDistanceProvider::new("http://localhost:5000")?;
/// let matrix = provider.distance_matrix(&[
///     Coordinate::new(13.0827, 80.2707),
///     Coordinate::new(12.9716, 77.5946),
/// ])?;
/// assert_eq!(matrix.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct OsrmDistanceProvider {
    client: BlockingClient,
    config: OsrmProviderConfig,
}

impl OsrmDistanceProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(OsrmProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OsrmProviderConfig) -> Result<Self, ClientBuildError> {
        let client = BlockingClient::new(config.timeout, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// Build the Table API URL: `{base_url}/table/v1/{profile}/{lng,lat;...}`.
    fn build_table_url(&self, points: &[Coordinate]) -> String {
        let coords = points
            .iter()
            .map(|point| format!("{},{}", point.lng, point.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    async fn fetch_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError> {
        let url = self.build_table_url(points);
        debug!("requesting {}x{} road matrix", points.len(), points.len());
        let response = self
            .client
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let table: TableResponse = response.json().await.map_err(|err| DistanceError::Parse {
            message: err.to_string(),
        })?;
        convert_response(table)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> DistanceError {
        if error.is_timeout() {
            return DistanceError::Timeout {
                message: format!(
                    "no answer within {} ms: {error}",
                    self.config.timeout.as_millis()
                ),
            };
        }
        if let Some(status) = error.status() {
            return DistanceError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        DistanceError::Network {
            message: error.to_string(),
        }
    }
}

/// Turn an OSRM answer into a validated kilometre matrix.
#[expect(
    clippy::float_arithmetic,
    reason = "metre to kilometre conversion divides distances"
)]
fn convert_response(response: TableResponse) -> Result<DistanceMatrix, DistanceError> {
    if !response.is_ok() {
        return Err(DistanceError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let distances = response.distances.ok_or_else(|| DistanceError::Parse {
        message: "OSRM response missing distances array".to_owned(),
    })?;
    // Unroutable pairs become NaN so matrix validation names the cell.
    let rows = distances
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map_or(f64::NAN, |metres| metres / METRES_PER_KM))
                .collect()
        })
        .collect();
    Ok(DistanceMatrix::try_from_rows(rows)?)
}

impl DistanceProvider for OsrmDistanceProvider {
    fn distance_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let matrix = self.client.block_on(self.fetch_matrix(points))?;
        if matrix.len() != points.len() {
            return Err(DistanceError::Parse {
                message: format!(
                    "OSRM returned {} rows for {} coordinates",
                    matrix.len(),
                    points.len()
                ),
            });
        }
        Ok(matrix)
    }
}
