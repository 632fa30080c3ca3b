//! Authenticated GitHub API client.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::auth;
use crate::config::AppCredentials;
use crate::error::{Error, Result};
use crate::types::{
    BlobRef, ContentPayload, GitCommit, GitRef, IssueUpdate, NewBlob, NewCommit, NewPullRequest,
    NewRef, NewTree, PullRequest, RefUpdate, ReviewRequest, TreeRef,
};

/// Default headers the GitHub API requires: JSON media type, API version, and
/// the App name as the product identifier.
pub(crate) fn default_headers(app_name: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(app_name).map_err(|_| Error::InvalidArgument("app_name"))?,
    );
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static("2022-11-28"),
    );
    Ok(headers)
}

/// GitHub API client authenticated with an installation token.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Authenticate as the App's installation on `organization` and return a
    /// ready client. Drives the whole JWT + token exchange to completion.
    ///
    /// # Errors
    /// Returns the authentication errors of [`auth::installation_token`], or
    /// an error if the HTTP client cannot be built.
    pub async fn connect(credentials: &AppCredentials, organization: &str) -> Result<Self> {
        Self::connect_with_base_url(credentials, organization, Self::DEFAULT_API_URL).await
    }

    /// Same as [`GitHubClient::connect`] with a custom API URL (for GitHub
    /// Enterprise).
    ///
    /// # Errors
    /// See [`GitHubClient::connect`].
    pub async fn connect_with_base_url(
        credentials: &AppCredentials,
        organization: &str,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let token =
            auth::installation_token_with_base_url(credentials, organization, &base_url).await?;
        Self::with_token(&credentials.app_name, token, base_url)
    }

    /// Build a client around an already-obtained installation token.
    ///
    /// # Errors
    /// Returns an error if `app_name` is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn with_token(
        app_name: &str,
        token: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers(app_name)?)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Make a PATCH request.
    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .patch(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            return Ok(body);
        }

        let status_code = status.as_u16();
        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    // === Ref Operations ===

    /// Get a single branch ref.
    ///
    /// # Errors
    /// Returns error if the ref does not exist or the API call fails.
    pub async fn get_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<GitRef> {
        self.get(&format!("/repos/{owner}/{repo}/git/ref/heads/{branch}"))
            .await
    }

    /// Create `refs/heads/<branch>` pointing at `sha`.
    ///
    /// # Errors
    /// Returns [`Error::BranchAlreadyExists`] if the ref was created by a
    /// concurrent writer, or another error if the API call fails.
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef> {
        let new_ref = NewRef {
            ref_name: format!("refs/heads/{branch}"),
            sha: sha.to_string(),
        };

        match self
            .post(&format!("/repos/{owner}/{repo}/git/refs"), &new_ref)
            .await
        {
            Err(Error::ApiError {
                status: 422,
                message,
            }) if message.contains("already exists") => {
                Err(Error::BranchAlreadyExists(branch.to_string()))
            }
            other => other,
        }
    }

    /// Fast-forward `refs/heads/<branch>` to `sha`. Never forces.
    ///
    /// # Errors
    /// Returns [`Error::ConcurrentUpdate`] if the update is rejected as
    /// non-fast-forward, or another error if the API call fails.
    pub async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef> {
        let update = RefUpdate {
            sha: sha.to_string(),
        };

        match self
            .patch(
                &format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"),
                &update,
            )
            .await
        {
            Err(Error::ApiError {
                status: 422,
                message,
            }) if message.contains("fast forward") => Err(Error::ConcurrentUpdate {
                branch: branch.to_string(),
                message,
            }),
            other => other,
        }
    }

    // === Git Object Operations ===

    /// Create a UTF-8 blob object.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn create_blob(&self, owner: &str, repo: &str, content: &str) -> Result<BlobRef> {
        self.post(
            &format!("/repos/{owner}/{repo}/git/blobs"),
            &NewBlob::utf8(content),
        )
        .await
    }

    /// Get a commit object (including its tree SHA).
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<GitCommit> {
        self.get(&format!("/repos/{owner}/{repo}/git/commits/{sha}"))
            .await
    }

    /// Create a tree layered on a base tree.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn create_tree(&self, owner: &str, repo: &str, tree: NewTree) -> Result<TreeRef> {
        self.post(&format!("/repos/{owner}/{repo}/git/trees"), &tree)
            .await
    }

    /// Create a commit object.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: NewCommit,
    ) -> Result<GitCommit> {
        self.post(&format!("/repos/{owner}/{repo}/git/commits"), &commit)
            .await
    }

    // === Contents ===

    /// Fetch the contents of `path` on `reference` (a branch name).
    ///
    /// Returns the raw payload; decoding and file/directory classification is
    /// the caller's job. Path segments are percent-encoded, so paths
    /// containing `#`, `?`, or spaces reach the API intact.
    ///
    /// # Errors
    /// Returns error if the API call fails (404 for a missing path).
    pub async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<ContentPayload> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| Error::InvalidArgument("base_url"))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidArgument("base_url"))?;
            segments
                .pop_if_empty()
                .extend(["repos", owner, repo, "contents"])
                .extend(path.split('/'));
        }
        url.query_pairs_mut().append_pair("ref", reference);

        let response = self
            .client
            .get(url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .await?;

        Self::handle_response(response).await
    }

    // === Pull Requests and Issues ===

    /// Open a pull request.
    ///
    /// # Errors
    /// Returns [`Error::DuplicatePullRequest`] if one already exists for the
    /// head/base pair, or another error if the API call fails.
    pub async fn create_pull(
        &self,
        owner: &str,
        repo: &str,
        pr: NewPullRequest,
    ) -> Result<PullRequest> {
        match self.post(&format!("/repos/{owner}/{repo}/pulls"), &pr).await {
            Err(Error::ApiError {
                status: 422,
                message,
            }) if message.contains("already exists") => Err(Error::DuplicatePullRequest(message)),
            other => other,
        }
    }

    /// Request reviews on a pull request.
    ///
    /// # Errors
    /// Returns error if the API call fails (e.g. requesting the PR author).
    pub async fn request_reviewers(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        request: ReviewRequest,
    ) -> Result<PullRequest> {
        self.post(
            &format!("/repos/{owner}/{repo}/pulls/{number}/requested_reviewers"),
            &request,
        )
        .await
    }

    /// Apply assignees and labels to the issue side of a pull request.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: IssueUpdate,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .patch(&format!("/repos/{owner}/{repo}/issues/{number}"), &update)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}
