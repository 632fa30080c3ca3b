//! Error types for gh-content.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while authenticating or writing content as a GitHub App.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required configuration field was empty or zero.
    #[error("missing or empty required field: {0}")]
    InvalidArgument(&'static str),

    /// The PEM could not be parsed as an RSA private key.
    #[error("failed to parse RSA private key: {0}")]
    KeyParse(#[source] jsonwebtoken::errors::Error),

    /// Signing the app assertion failed.
    #[error("failed to sign app assertion: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The app is not installed on the target account.
    #[error("no app installation found for account: {0}")]
    InstallationNotFound(String),

    /// The installation token exchange was rejected upstream.
    #[error("installation token exchange failed ({status}): {message}")]
    AuthExchange { status: u16, message: String },

    /// A branch named in the configuration does not exist in the repository.
    #[error("branch not found: refs/heads/{0}")]
    BranchNotFound(String),

    /// Ref creation was rejected because the branch already exists (lost race).
    #[error("branch already exists: refs/heads/{0}")]
    BranchAlreadyExists(String),

    /// The path resolved to no readable file content.
    #[error("no file content found at path: {0}")]
    ContentNotFound(String),

    /// The contents API returned a payload that could not be decoded.
    #[error("failed to decode content at {path}: {reason}")]
    ContentDecode { path: String, reason: String },

    /// The ref update was rejected as non-fast-forward (a concurrent writer won).
    #[error("non-fast-forward update rejected for refs/heads/{branch}: {message}")]
    ConcurrentUpdate { branch: String, message: String },

    /// A pull request already exists for this head/base pair.
    #[error("pull request already exists: {0}")]
    DuplicatePullRequest(String),

    /// Authentication failed (bad or expired credentials).
    #[error("GitHub authentication failed - check the App credentials")]
    AuthenticationFailed,

    /// API rate limit exceeded.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// Unclassified API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),
}
