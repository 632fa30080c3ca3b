//! Wire types for the GitHub REST API.
//!
//! Request bodies derive `Serialize`, responses derive `Deserialize`. Only the
//! fields this crate reads are declared; GitHub's extra fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// === Git Data API ===

/// A branch pointer (`refs/heads/...`) and the object it targets.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Fully qualified ref name, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// The commit the ref points at.
    pub object: RefObject,
}

/// The target object of a ref.
#[derive(Debug, Clone, Deserialize)]
pub struct RefObject {
    /// Target commit SHA.
    pub sha: String,
}

/// Request to create a new ref.
#[derive(Debug, Clone, Serialize)]
pub struct NewRef {
    /// Fully qualified ref name to create.
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// Commit SHA the new ref points at.
    pub sha: String,
}

/// Request to fast-forward an existing ref.
///
/// `force` is never sent; GitHub rejects non-fast-forward updates by default,
/// which is exactly the behavior this crate relies on.
#[derive(Debug, Clone, Serialize)]
pub struct RefUpdate {
    /// New target commit SHA.
    pub sha: String,
}

/// Request to create a blob object.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlob {
    /// Blob content.
    pub content: String,

    /// Content encoding; always `utf-8` here.
    pub encoding: String,
}

impl NewBlob {
    /// A UTF-8 blob from string content.
    #[must_use]
    pub fn utf8(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: "utf-8".into(),
        }
    }
}

/// SHA of a created blob.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobRef {
    /// Blob SHA.
    pub sha: String,
}

/// Request to create a tree layered on a base tree.
#[derive(Debug, Clone, Serialize)]
pub struct NewTree {
    /// SHA of the tree to layer the new entries onto.
    pub base_tree: String,

    /// New or changed entries.
    pub tree: Vec<NewTreeItem>,
}

/// A single entry of a [`NewTree`].
#[derive(Debug, Clone, Serialize)]
pub struct NewTreeItem {
    /// Repository-relative path.
    pub path: String,

    /// Numeric mode string, e.g. `"100644"`.
    pub mode: String,

    /// Object type; `blob` for file entries.
    #[serde(rename = "type")]
    pub item_type: String,

    /// SHA of the referenced object.
    pub sha: String,
}

/// SHA of a created tree.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeRef {
    /// Tree SHA.
    pub sha: String,
}

/// Request to create a commit object.
#[derive(Debug, Clone, Serialize)]
pub struct NewCommit {
    /// Commit message.
    pub message: String,

    /// SHA of the tree the commit snapshots.
    pub tree: String,

    /// Parent commit SHAs; exactly one for the linear write path.
    pub parents: Vec<String>,
}

/// A commit object as returned by the Git Data API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    /// Commit SHA.
    pub sha: String,

    /// The tree the commit points at.
    pub tree: TreeRef,
}

// === Contents API ===

/// Response of the contents endpoint: a single file, or a directory listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentPayload {
    /// The path resolved to a single file.
    File(ContentEntry),

    /// The path resolved to a directory.
    Directory(Vec<ContentEntry>),
}

/// One entry of the contents endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// Repository-relative path.
    pub path: String,

    /// Encoded content; absent for directory entries and oversized files.
    pub content: Option<String>,

    /// Content encoding, `base64` for file payloads.
    pub encoding: Option<String>,
}

// === App installations ===

/// An installation of the App on some account.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    /// Installation ID, used for the token exchange.
    pub id: u64,

    /// The account the App is installed on.
    pub account: InstallationAccount,
}

/// The account side of an [`Installation`].
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationAccount {
    /// Account login name.
    pub login: String,
}

/// A short-lived installation access token.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationToken {
    /// The token value.
    pub token: String,

    /// Upstream-defined expiry (roughly one hour).
    pub expires_at: Option<DateTime<Utc>>,
}

// === Pull requests and issues ===

/// Request to open a pull request.
#[derive(Debug, Clone, Serialize)]
pub struct NewPullRequest {
    /// PR title.
    pub title: String,

    /// PR body.
    pub body: String,

    /// Head branch name.
    pub head: String,

    /// Base branch name.
    pub base: String,
}

/// A created pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number.
    pub number: u64,

    /// PR URL.
    pub html_url: String,
}

/// Request to ask logins for review on a PR.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    /// Review requestee logins.
    pub reviewers: Vec<String>,
}

/// Issue-side update of a PR: assignees and labels.
///
/// Empty lists are not serialized, and an update with nothing to set must not
/// be sent at all (see [`IssueUpdate::is_empty`]).
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueUpdate {
    /// Logins to assign.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,

    /// Labels to apply.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl IssueUpdate {
    /// Whether the update carries nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignees.is_empty() && self.labels.is_empty()
    }
}
