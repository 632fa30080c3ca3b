//! # gh-content
//!
//! Commit file changes to a GitHub repository and open pull requests on
//! behalf of a GitHub App: RS256 app assertions, installation token exchange,
//! and the low-level Git object-graph write path (blob, tree, commit, ref
//! update).
//!
//! The typical flow: build a [`GitHubClient`] with [`GitHubClient::connect`]
//! (which authenticates as the App's installation), then call
//! [`write_and_commit`], [`read_blob`], or [`create_pull_request`] with the
//! configuration records. Every operation re-authenticates; installation
//! tokens are never cached.
//!
//! # Security
//!
//! The private key and installation token are stored as `SecretString`, which
//! zeroizes memory on drop and redacts debug output. App assertions are
//! capped at the 600-second lifetime GitHub enforces.

mod auth;
mod client;
mod config;
mod error;
mod jwt;
mod ops;
mod traits;
mod types;

#[cfg(test)]
mod test_keys;

pub use auth::{installation_token, installation_token_with_base_url};
pub use client::GitHubClient;
pub use config::{
    AppCredentials, BranchPair, ChangeRequest, PullRequestSpec, RepositoryTarget, TreeItemMode,
};
pub use error::{Error, Result};
pub use jwt::sign_claims;
pub use ops::{create_pull_request, read_blob, write_and_commit};
// Re-export SecretString for constructing credentials
pub use secrecy::SecretString;
pub use traits::GitHubApi;
pub use types::{
    BlobRef, ContentEntry, ContentPayload, GitCommit, GitRef, Installation, InstallationAccount,
    InstallationToken, IssueUpdate, NewBlob, NewCommit, NewPullRequest, NewRef, NewTree,
    NewTreeItem, PullRequest, RefObject, RefUpdate, ReviewRequest, TreeRef,
};
