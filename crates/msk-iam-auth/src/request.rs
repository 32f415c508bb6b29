//! Deterministic construction of the unsigned request handed to the signer.
//!
//! The request is always `GET https://kafka.<region>.amazonaws.com/` with
//! exactly two query parameters: the connect action and the expiry in
//! seconds. Query encoding is canonical (sorted, AWS percent-encoding) so the
//! signing step sees a reproducible representation.

use crate::error::{SignerError, SignerResult};
use crate::sigv4::build_canonical_query;

/// Query parameter key for the requested action.
pub const ACTION_TYPE: &str = "Action";
/// The IAM action a token authorizes: connecting to a Kafka cluster.
pub const ACTION_NAME: &str = "kafka-cluster:Connect";
/// Query parameter key for the token validity window in seconds.
pub const EXPIRES_QUERY_KEY: &str = "X-Amz-Expires";

/// Derive the MSK bootstrap endpoint host for a region.
fn endpoint_url(region: &str) -> String {
    format!("kafka.{region}.amazonaws.com")
}

/// The canonical unsigned GET request for a token, built fresh per call and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct UnsignedRequest {
    host: String,
    path: String,
    query: Vec<(String, String)>,
}

impl UnsignedRequest {
    /// Build the unsigned request for `region` with the given expiry.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::RequestBuild`] when the constructed URL does
    /// not parse. The host comes from a fixed template, so this is defensive
    /// rather than an expected path.
    pub fn new(region: &str, expiry_seconds: i64) -> SignerResult<Self> {
        let request = Self {
            host: endpoint_url(region),
            path: "/".to_owned(),
            query: vec![
                (ACTION_TYPE.to_owned(), ACTION_NAME.to_owned()),
                (EXPIRES_QUERY_KEY.to_owned(), expiry_seconds.to_string()),
            ],
        };

        request
            .url()
            .parse::<http::Uri>()
            .map_err(SignerError::RequestBuild)?;

        Ok(request)
    }

    /// The endpoint host, e.g. `kafka.us-west-2.amazonaws.com`.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The request path (always `/`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The decoded query parameter pairs.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Render the full URL with a canonically encoded query string.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "https://{}{}?{}",
            self.host,
            self.path,
            build_canonical_query(&self.query)
        )
    }
}
