//! Configuration surface selecting a credential-resolution strategy.
//!
//! [`SignerOptions`] mirrors the flat, all-optional shape callers configure,
//! and [`SignerOptions::validate`] enforces the invariants over it: a region
//! is required, and at most one alternative credential source may be set.
//! Validated options convert into the internal [`CredentialSource`] sum type
//! so the resolution dispatch never sees an invalid combination.

use crate::credentials::{Credentials, DEFAULT_SESSION_NAME};
use crate::error::{SignerError, SignerResult};

/// Options controlling how credentials are resolved for token generation.
///
/// Set at most one of [`aws_profile`](Self::aws_profile),
/// [`role_arn`](Self::role_arn), and
/// [`aws_credentials`](Self::aws_credentials); with none set, the default
/// credential chain is used. `sts_session_name` and `sts_region` only apply
/// when `role_arn` is set.
#[derive(Debug, Clone, Default)]
pub struct SignerOptions {
    /// The AWS region used for signing (and, by default, for STS). Required.
    pub region: Option<String>,
    /// Named shared-config profile to load credentials from.
    pub aws_profile: Option<String>,
    /// Role ARN to assume for temporary credentials.
    pub role_arn: Option<String>,
    /// Session name for the assumed role; defaults to `MSKSASLDefaultSession`.
    pub sts_session_name: Option<String>,
    /// Region for the STS client, when different from the signing region.
    pub sts_region: Option<String>,
    /// Pre-resolved credentials to sign with directly.
    pub aws_credentials: Option<Credentials>,
    /// Log the resolved identity (`sts:GetCallerIdentity`) at debug
    /// verbosity. Makes an extra remote call per token.
    pub aws_debug_creds: bool,
}

/// The single credential-resolution strategy selected by validated options.
#[derive(Debug)]
pub(crate) enum CredentialSource<'a> {
    /// Resolve via the ambient default credential chain.
    DefaultChain,
    /// Resolve via a named shared-config profile.
    Profile(&'a str),
    /// Assume a role via STS.
    AssumeRole {
        role_arn: &'a str,
        session_name: &'a str,
        sts_region: Option<&'a str>,
    },
    /// Use the supplied credentials as-is.
    Static(&'a Credentials),
}

impl SignerOptions {
    /// Create options for the given region, with the default credential
    /// chain.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    /// Check the option invariants without mutating or resolving anything.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::MissingRegion`] when no region is set, or
    /// [`SignerError::ConflictingCredentialSources`] when more than one of
    /// profile, role ARN, and credentials is set.
    pub fn validate(&self) -> SignerResult<()> {
        if self.region.is_none() {
            return Err(SignerError::MissingRegion);
        }

        let sources = usize::from(self.aws_profile.is_some())
            + usize::from(self.role_arn.is_some())
            + usize::from(self.aws_credentials.is_some());

        if sources > 1 {
            return Err(SignerError::ConflictingCredentialSources);
        }

        Ok(())
    }

    /// Validate and return the region together with the selected strategy.
    pub(crate) fn credential_source(&self) -> SignerResult<(&str, CredentialSource<'_>)> {
        self.validate()?;

        // validate() guarantees the region is present.
        let region = self.region.as_deref().ok_or(SignerError::MissingRegion)?;

        let source = if let Some(profile) = self.aws_profile.as_deref() {
            CredentialSource::Profile(profile)
        } else if let Some(role_arn) = self.role_arn.as_deref() {
            CredentialSource::AssumeRole {
                role_arn,
                session_name: self.sts_session_name.as_deref().unwrap_or(DEFAULT_SESSION_NAME),
                sts_region: self.sts_region.as_deref(),
            }
        } else if let Some(credentials) = self.aws_credentials.as_ref() {
            CredentialSource::Static(credentials)
        } else {
            CredentialSource::DefaultChain
        };

        Ok((region, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_reject_missing_region() {
        let options = SignerOptions::default();
        assert!(matches!(options.validate(), Err(SignerError::MissingRegion)));
    }

    #[test]
    fn test_should_reject_profile_and_role_arn_together() {
        let options = SignerOptions {
            aws_profile: Some("dev".to_owned()),
            role_arn: Some("arn:aws:iam::123456789012:role/test".to_owned()),
            ..SignerOptions::new("us-west-2")
        };
        assert!(matches!(
            options.validate(),
            Err(SignerError::ConflictingCredentialSources)
        ));
    }

    #[test]
    fn test_should_reject_profile_and_credentials_together() {
        let options = SignerOptions {
            aws_profile: Some("dev".to_owned()),
            aws_credentials: Some(Credentials::new("AKID", "secret", None)),
            ..SignerOptions::new("us-west-2")
        };
        assert!(matches!(
            options.validate(),
            Err(SignerError::ConflictingCredentialSources)
        ));
    }

    #[test]
    fn test_should_accept_region_only() {
        let options = SignerOptions::new("us-west-2");
        assert!(options.validate().is_ok());

        let (region, source) = options.credential_source().unwrap();
        assert_eq!(region, "us-west-2");
        assert!(matches!(source, CredentialSource::DefaultChain));
    }

    #[test]
    fn test_should_accept_single_source() {
        let options = SignerOptions {
            aws_profile: Some("dev".to_owned()),
            ..SignerOptions::new("us-west-2")
        };
        let (_, source) = options.credential_source().unwrap();
        assert!(matches!(source, CredentialSource::Profile("dev")));
    }

    #[test]
    fn test_should_default_session_name_for_assumed_role() {
        let options = SignerOptions {
            role_arn: Some("arn:aws:iam::123456789012:role/test".to_owned()),
            ..SignerOptions::new("us-west-2")
        };
        let (_, source) = options.credential_source().unwrap();
        match source {
            CredentialSource::AssumeRole {
                session_name,
                sts_region,
                ..
            } => {
                assert_eq!(session_name, DEFAULT_SESSION_NAME);
                assert_eq!(sts_region, None);
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }
}
