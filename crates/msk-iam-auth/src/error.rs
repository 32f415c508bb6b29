//! Error types for MSK IAM auth token generation.
//!
//! Each pipeline stage wraps its failures in a dedicated [`SignerError`]
//! variant, preserving the underlying cause so callers can distinguish a bad
//! configuration from bad credentials from a service failure by walking the
//! `source()` chain.

/// A boxed error used to carry heterogeneous SDK failure causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while generating an MSK auth token.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// No region was provided in the signer options.
    #[error("region must be provided")]
    MissingRegion,

    /// More than one credential source was configured at once.
    #[error("please provide only one of AWS profile, role ARN and AWS credentials")]
    ConflictingCredentialSources,

    /// Credential resolution failed (default chain, profile, or provider).
    #[error("failed to load credentials")]
    CredentialLoad(#[source] BoxError),

    /// The STS assume-role call failed for the given role ARN.
    #[error("unable to assume role {role_arn}")]
    AssumeRole {
        /// The role ARN that could not be assumed.
        role_arn: String,
        /// The underlying STS failure.
        #[source]
        source: BoxError,
    },

    /// The unsigned request URL could not be constructed.
    #[error("failed to build request for signing")]
    RequestBuild(#[source] http::uri::InvalidUri),

    /// The signing primitive failed to produce a signed URL.
    #[error("failed to sign request with AWS SigV4")]
    Sign(#[source] BoxError),

    /// The signed URL could not be parsed during finalization.
    #[error("failed to add user agent to the signed url")]
    InvalidSignedUrl(#[source] BoxError),
}

/// Convenience result type for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_preserve_source_in_credential_load_error() {
        use std::error::Error;

        let err = SignerError::CredentialLoad("no providers in chain".into());
        assert_eq!(err.to_string(), "failed to load credentials");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_should_name_role_arn_in_assume_role_error() {
        let err = SignerError::AssumeRole {
            role_arn: "arn:aws:iam::123456789012:role/test".to_owned(),
            source: "access denied".into(),
        };
        assert!(err.to_string().contains("arn:aws:iam::123456789012:role/test"));
    }
}
