//! Credential resolution for MSK auth token generation.
//!
//! Credentials can come from four places: the default AWS credential chain,
//! a named shared-config profile, a role assumed via STS, or a caller-supplied
//! [`ProvideCredentials`] implementation. Resolution is performed fresh on
//! every call; nothing is cached at this layer. Callers that need caching or
//! refresh semantics should supply their own credentials provider.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use tracing::debug;

use crate::error::{SignerError, SignerResult};

/// Session name used for assumed roles when the caller does not supply one.
pub const DEFAULT_SESSION_NAME: &str = "MSKSASLDefaultSession";

/// An immutable AWS credential triple resolved for a single token-generation
/// call.
///
/// The session token is present only for temporary credentials (assumed roles
/// or session-scoped providers). The secret key is redacted from the `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl Credentials {
    /// Create credentials from an access key id, secret key, and optional
    /// session token.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    /// The access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// The session token, if these are temporary credentials.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Convert into the SDK credential type, e.g. to configure an STS client
    /// with these exact credentials.
    #[must_use]
    pub fn into_aws(self) -> aws_credential_types::Credentials {
        aws_credential_types::Credentials::new(
            self.access_key_id,
            self.secret_access_key,
            self.session_token,
            None,
            "msk-iam-auth",
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

impl From<aws_credential_types::Credentials> for Credentials {
    fn from(creds: aws_credential_types::Credentials) -> Self {
        Self {
            access_key_id: creds.access_key_id().to_owned(),
            secret_access_key: creds.secret_access_key().to_owned(),
            session_token: creds.session_token().map(ToOwned::to_owned),
        }
    }
}

/// Resolve credentials from the default credential chain, scoped to `region`.
pub(crate) async fn load_default_credentials(region: &str) -> SignerResult<Credentials> {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await;

    let provider = config
        .credentials_provider()
        .ok_or_else(|| SignerError::CredentialLoad("no credentials provider in SDK config".into()))?;

    load_credentials_from_provider(&provider).await
}

/// Resolve credentials from a named shared-config profile.
pub(crate) async fn load_credentials_from_profile(
    region: &str,
    profile: &str,
) -> SignerResult<Credentials> {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .profile_name(profile)
        .load()
        .await;

    let provider = config
        .credentials_provider()
        .ok_or_else(|| SignerError::CredentialLoad("no credentials provider in SDK config".into()))?;

    load_credentials_from_provider(&provider).await
}

/// Resolve temporary credentials by assuming `role_arn` via STS.
///
/// A fresh STS client is constructed for every call; nothing is cached
/// between invocations. Callers that want cached or auto-refreshing
/// assumed-role credentials should supply their own credentials provider
/// instead. The STS client is scoped to `sts_region` when given, falling back
/// to the signing region otherwise.
pub(crate) async fn load_credentials_from_role_arn(
    region: &str,
    sts_region: Option<&str>,
    role_arn: &str,
    session_name: &str,
) -> SignerResult<Credentials> {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(sts_region.unwrap_or(region).to_owned()))
        .load()
        .await;

    let client = aws_sdk_sts::Client::new(&config);

    let output = client
        .assume_role()
        .role_arn(role_arn)
        .role_session_name(session_name)
        .send()
        .await
        .map_err(|err| SignerError::AssumeRole {
            role_arn: role_arn.to_owned(),
            source: Box::new(err),
        })?;

    let creds = output.credentials().ok_or_else(|| SignerError::AssumeRole {
        role_arn: role_arn.to_owned(),
        source: "assume role response contained no credentials".into(),
    })?;

    Ok(Credentials::new(
        creds.access_key_id(),
        creds.secret_access_key(),
        Some(creds.session_token().to_owned()),
    ))
}

/// Resolve credentials from a caller-supplied provider, passing any failure
/// through.
pub(crate) async fn load_credentials_from_provider(
    provider: &impl ProvideCredentials,
) -> SignerResult<Credentials> {
    let creds = provider
        .provide_credentials()
        .await
        .map_err(|err| SignerError::CredentialLoad(Box::new(err)))?;

    Ok(creds.into())
}

/// Log the identity behind the resolved credentials via
/// `sts:GetCallerIdentity`.
///
/// Best effort: failures are logged at debug verbosity and never propagated.
/// This makes an extra remote call per token, so it is gated behind
/// [`SignerOptions::aws_debug_creds`](crate::SignerOptions) and not meant for
/// steady-state production use.
pub(crate) async fn log_caller_identity(region: &str, credentials: &Credentials) {
    let config = aws_sdk_sts::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .credentials_provider(credentials.clone().into_aws())
        .build();

    let client = aws_sdk_sts::Client::from_conf(config);

    match client.get_caller_identity().send().await {
        Ok(identity) => debug!(
            user_id = ?identity.user_id(),
            account = ?identity.account(),
            arn = ?identity.arn(),
            "resolved credential identity"
        ),
        Err(err) => debug!(error = %err, "unable to look up caller identity"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_expose_credential_components() {
        let creds = Credentials::new("AKID", "secret", Some("token".to_owned()));
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.secret_access_key(), "secret");
        assert_eq!(creds.session_token(), Some("token"));
    }

    #[test]
    fn test_should_redact_secret_in_debug_output() {
        let creds = Credentials::new("AKID", "super-secret", Some("session".to_owned()));
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AKID"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("session"));
    }

    #[test]
    fn test_should_round_trip_through_sdk_credentials() {
        let creds = Credentials::new("AKID", "secret", None);
        let back: Credentials = creds.clone().into_aws().into();
        assert_eq!(back, creds);
    }

    #[tokio::test]
    async fn test_should_pass_through_provider_credentials() {
        let provider = aws_credential_types::Credentials::new(
            "MOCK-ACCESS-KEY",
            "MOCK-SECRET-KEY",
            None,
            None,
            "test",
        );

        let creds = load_credentials_from_provider(&provider).await.unwrap();
        assert_eq!(creds.access_key_id(), "MOCK-ACCESS-KEY");
        assert_eq!(creds.session_token(), None);
    }
}
