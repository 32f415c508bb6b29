//! IAM-based SASL auth token generation for Amazon MSK Kafka clusters.
//!
//! Kafka clients authenticating to MSK with the IAM SASL mechanism present a
//! short-lived token instead of long-term secrets. A token is a base64
//! (URL-safe, unpadded) encoding of a SigV4-presigned URL against the
//! cluster's regional endpoint, which the broker validates against IAM.
//!
//! # Overview
//!
//! Each token-generation call runs a linear, stateless pipeline: resolve
//! credentials (default chain, named profile, assumed role, or a supplied
//! provider), build the canonical unsigned request, presign it with SigV4
//! query parameters, append the client identification tag, and base64-encode
//! the result. Entry points return the token together with its expiration
//! instant so callers can refresh proactively.
//!
//! # Usage
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), msk_iam_auth::SignerError> {
//! // Resolve credentials from the default chain and generate a token.
//! let (token, expiration) = msk_iam_auth::generate_auth_token("us-west-2").await?;
//! println!("token valid until {expiration}: {token}");
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Credential types and resolution strategies
//! - [`error`] - Signer error types
//! - [`options`] - Configuration surface and its validation
//! - [`request`] - Deterministic unsigned request construction
//! - [`sigv4`] - SigV4 query-parameter presigning
//! - [`token`] - The token pipeline and public entry points

pub mod credentials;
pub mod error;
pub mod options;
pub mod request;
pub mod sigv4;
pub mod token;

pub use credentials::Credentials;
pub use error::{SignerError, SignerResult};
pub use options::SignerOptions;
pub use request::UnsignedRequest;
pub use sigv4::{RequestSigner, SigV4QueryPresigner, hash_payload};
pub use token::{
    DEFAULT_EXPIRY_SECONDS, generate_auth_token, generate_auth_token_from_credentials_provider,
    generate_auth_token_from_profile, generate_auth_token_from_role,
    generate_auth_token_with_options,
};
