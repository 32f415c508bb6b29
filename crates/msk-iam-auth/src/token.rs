//! Auth token generation: the resolve → build → sign → finalize pipeline and
//! the public entry points, one per credential-resolution strategy.
//!
//! Every call is an independent unit of work: credentials are resolved
//! fresh, the request is rebuilt, and the signing timestamp is captured once
//! per call. The returned expiration instant (signing time plus the expiry
//! window) lets callers refresh proactively before the token lapses.

use aws_credential_types::provider::ProvideCredentials;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};

use crate::credentials::{self, Credentials};
use crate::error::{SignerError, SignerResult};
use crate::options::{CredentialSource, SignerOptions};
use crate::request::UnsignedRequest;
use crate::sigv4::{RequestSigner, SigV4QueryPresigner, hash_payload};

/// The signing name (credential-scope service field) for MSK clusters.
pub const SIGNING_NAME: &str = "kafka-cluster";
/// Query parameter key for the client identification tag.
pub const USER_AGENT_KEY: &str = "User-Agent";
/// Library name reported in the `User-Agent` query parameter.
pub const LIB_NAME: &str = "msk-iam-auth";
/// Default token validity window in seconds.
pub const DEFAULT_EXPIRY_SECONDS: i64 = 900;

/// Generate an auth token using the default credential chain.
///
/// Returns the base64-encoded token and its expiration instant.
///
/// # Errors
///
/// Returns a [`SignerError`] when credential resolution or any later
/// pipeline stage fails.
pub async fn generate_auth_token(region: &str) -> SignerResult<(String, DateTime<Utc>)> {
    generate_auth_token_with_options(&SignerOptions::new(region)).await
}

/// Generate an auth token using credentials from a named AWS profile.
///
/// # Errors
///
/// Returns a [`SignerError`] when credential resolution or any later
/// pipeline stage fails.
pub async fn generate_auth_token_from_profile(
    region: &str,
    profile: &str,
) -> SignerResult<(String, DateTime<Utc>)> {
    let options = SignerOptions {
        aws_profile: Some(profile.to_owned()),
        ..SignerOptions::new(region)
    };
    generate_auth_token_with_options(&options).await
}

/// Generate an auth token using temporary credentials for an assumed role.
///
/// The session name defaults to
/// [`DEFAULT_SESSION_NAME`](crate::credentials::DEFAULT_SESSION_NAME) when
/// not supplied. A fresh STS client is created per call; callers wanting
/// cached assumed-role credentials should use
/// [`generate_auth_token_from_credentials_provider`] with their own provider.
///
/// # Errors
///
/// Returns a [`SignerError`] when the assume-role call or any later pipeline
/// stage fails.
pub async fn generate_auth_token_from_role(
    region: &str,
    role_arn: &str,
    session_name: Option<&str>,
) -> SignerResult<(String, DateTime<Utc>)> {
    let options = SignerOptions {
        role_arn: Some(role_arn.to_owned()),
        sts_session_name: session_name.map(ToOwned::to_owned),
        ..SignerOptions::new(region)
    };
    generate_auth_token_with_options(&options).await
}

/// Generate an auth token using a caller-supplied credentials provider.
///
/// The provider controls caching and refresh entirely; its failures are
/// passed through.
///
/// # Errors
///
/// Returns a [`SignerError`] when the provider or any later pipeline stage
/// fails.
pub async fn generate_auth_token_from_credentials_provider(
    region: &str,
    provider: impl ProvideCredentials,
) -> SignerResult<(String, DateTime<Utc>)> {
    let resolved = credentials::load_credentials_from_provider(&provider).await?;
    construct_auth_token(region, &resolved)
}

/// Generate an auth token from a full [`SignerOptions`] value.
///
/// Options are validated before any resolution is attempted. When
/// [`aws_debug_creds`](SignerOptions::aws_debug_creds) is set, the resolved
/// identity is logged at debug verbosity via an extra `sts:GetCallerIdentity`
/// call; that lookup is best effort and never fails token generation.
///
/// # Errors
///
/// Returns a [`SignerError`] when validation, credential resolution, or any
/// later pipeline stage fails.
pub async fn generate_auth_token_with_options(
    options: &SignerOptions,
) -> SignerResult<(String, DateTime<Utc>)> {
    let (region, source) = options.credential_source()?;

    let resolved = match source {
        CredentialSource::DefaultChain => credentials::load_default_credentials(region).await?,
        CredentialSource::Profile(profile) => {
            credentials::load_credentials_from_profile(region, profile).await?
        }
        CredentialSource::AssumeRole {
            role_arn,
            session_name,
            sts_region,
        } => {
            credentials::load_credentials_from_role_arn(region, sts_region, role_arn, session_name)
                .await?
        }
        CredentialSource::Static(creds) => creds.clone(),
    };

    if options.aws_debug_creds {
        credentials::log_caller_identity(region, &resolved).await;
    }

    construct_auth_token(region, &resolved)
}

/// Run the build → sign → finalize stages for already-resolved credentials.
fn construct_auth_token(
    region: &str,
    credentials: &Credentials,
) -> SignerResult<(String, DateTime<Utc>)> {
    let request = UnsignedRequest::new(region, DEFAULT_EXPIRY_SECONDS)?;

    let signing_time = Utc::now();
    let signed_url = SigV4QueryPresigner.presign(
        &request,
        credentials,
        &hash_payload(b""),
        SIGNING_NAME,
        region,
        signing_time,
    )?;

    let tagged_url = add_user_agent(&signed_url)?;
    let token = URL_SAFE_NO_PAD.encode(tagged_url.as_bytes());
    let expiration = signing_time + chrono::Duration::seconds(DEFAULT_EXPIRY_SECONDS);

    Ok((token, expiration))
}

/// The client identification tag:
/// `<library-name>/<library-version>/<rust-version>`.
fn user_agent() -> String {
    format!(
        "{LIB_NAME}/{}/rust{}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION")
    )
}

/// Append the `User-Agent` parameter to a signed URL and re-encode its query.
///
/// Keys are sorted and values form-encoded, matching the encoding the rest of
/// the query already uses. The `User-Agent` parameter is appended after
/// signing and is not part of the signature; the broker drops it before
/// validation.
fn add_user_agent(signed_url: &str) -> SignerResult<String> {
    let uri: http::Uri = signed_url
        .parse()
        .map_err(|err: http::uri::InvalidUri| SignerError::InvalidSignedUrl(Box::new(err)))?;

    let authority = uri
        .authority()
        .ok_or_else(|| SignerError::InvalidSignedUrl("signed url has no host".into()))?;
    let scheme = uri.scheme_str().unwrap_or("https");

    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(
        uri.query().unwrap_or("").as_bytes(),
    )
    .into_owned()
    .collect();
    pairs.push((USER_AGENT_KEY.to_owned(), user_agent()));
    pairs.sort();

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&pairs)
        .finish();

    Ok(format!("{scheme}://{authority}{}?{query}", uri.path()))
}
