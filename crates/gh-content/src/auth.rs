//! GitHub App authentication.
//!
//! Builds the short-lived app assertion (JWT), looks up the installation for
//! the target account, and exchanges it for an installation access token.
//! Tokens are never cached; every operation re-authenticates.

use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{GitHubClient, default_headers};
use crate::config::{AppCredentials, require};
use crate::error::{Error, Result};
use crate::jwt;
use crate::types::{Installation, InstallationToken};

/// Maximum assertion lifetime GitHub accepts, in seconds.
const ASSERTION_LIFETIME_SECS: i64 = 600;

/// Claims of the app-level bearer assertion.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AppClaims {
    /// Issued-at, Unix seconds.
    pub iat: i64,

    /// Expiry, Unix seconds. Always `iat + 600`.
    pub exp: i64,

    /// Issuer: the App ID.
    pub iss: String,
}

impl AppClaims {
    pub(crate) fn new(app_id: u64, now: i64) -> Self {
        Self {
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
            iss: app_id.to_string(),
        }
    }
}

/// Obtain an installation access token for the App's installation on
/// `organization`, against the public GitHub API.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for missing fields (before any network
/// call), [`Error::KeyParse`] for a bad PEM, [`Error::InstallationNotFound`]
/// when the App has no installation on the account, and
/// [`Error::AuthExchange`] when the token exchange is rejected upstream.
pub async fn installation_token(
    credentials: &AppCredentials,
    organization: &str,
) -> Result<SecretString> {
    installation_token_with_base_url(credentials, organization, GitHubClient::DEFAULT_API_URL).await
}

/// Same as [`installation_token`], against a custom API URL (GitHub
/// Enterprise, or a test server).
///
/// # Errors
/// See [`installation_token`].
pub async fn installation_token_with_base_url(
    credentials: &AppCredentials,
    organization: &str,
    base_url: &str,
) -> Result<SecretString> {
    credentials.validate()?;
    require(organization, "organization")?;

    let claims = AppClaims::new(credentials.app_id, Utc::now().timestamp());
    let assertion = jwt::sign_claims(&credentials.private_key_pem, &claims)?;

    let client = reqwest::Client::builder()
        .default_headers(default_headers(&credentials.app_name)?)
        .build()?;

    // Authenticate as the App (bearer = JWT) and find the installation.
    let response = client
        .get(format!("{base_url}/app/installations"))
        .header(AUTHORIZATION, format!("Bearer {assertion}"))
        .send()
        .await?;
    let installations: Vec<Installation> = read_auth_response(response).await?;

    let installation = installations
        .into_iter()
        .find(|installation| installation.account.login == organization)
        .ok_or_else(|| Error::InstallationNotFound(organization.to_string()))?;

    // Exchange the installation ID for a short-lived access token.
    let response = client
        .post(format!(
            "{base_url}/app/installations/{}/access_tokens",
            installation.id
        ))
        .header(AUTHORIZATION, format!("Bearer {assertion}"))
        .send()
        .await?;
    let token: InstallationToken = read_auth_response(response).await?;

    debug!(
        installation_id = installation.id,
        expires_at = ?token.expires_at,
        "obtained installation token"
    );

    Ok(SecretString::from(token.token))
}

/// Read an auth-flow response, surfacing the upstream status and message on
/// any non-success.
async fn read_auth_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response.text().await.unwrap_or_default();
    Err(Error::AuthExchange {
        status: status.as_u16(),
        message,
    })
}
