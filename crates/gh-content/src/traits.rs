//! Trait abstraction over the GitHub API surface.
//!
//! The high-level operations in [`crate::ops`] are written against
//! [`GitHubApi`] rather than the concrete client, allowing stub transports in
//! tests and alternative implementations.

use crate::client::GitHubClient;
use crate::error::Result;
use crate::types::{
    BlobRef, ContentPayload, GitCommit, GitRef, IssueUpdate, NewCommit, NewPullRequest, NewTree,
    PullRequest, ReviewRequest, TreeRef,
};

/// The endpoint surface the content operations depend on.
pub trait GitHubApi: Send + Sync {
    // === Ref Operations ===

    /// Get a single branch ref.
    fn get_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    /// Create `refs/heads/<branch>` pointing at `sha`.
    fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    /// Fast-forward `refs/heads/<branch>` to `sha`.
    fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    // === Git Object Operations ===

    /// Create a UTF-8 blob.
    fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<BlobRef>> + Send;

    /// Get a commit object.
    fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> impl std::future::Future<Output = Result<GitCommit>> + Send;

    /// Create a tree.
    fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        tree: NewTree,
    ) -> impl std::future::Future<Output = Result<TreeRef>> + Send;

    /// Create a commit.
    fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: NewCommit,
    ) -> impl std::future::Future<Output = Result<GitCommit>> + Send;

    // === Contents ===

    /// Fetch the contents of `path` on a branch.
    fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> impl std::future::Future<Output = Result<ContentPayload>> + Send;

    // === Pull Requests and Issues ===

    /// Open a pull request.
    fn create_pull(
        &self,
        owner: &str,
        repo: &str,
        pr: NewPullRequest,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    /// Request reviews on a pull request.
    fn request_reviewers(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        request: ReviewRequest,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    /// Apply assignees and labels to the issue side of a pull request.
    fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: IssueUpdate,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl GitHubApi for GitHubClient {
    async fn get_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<GitRef> {
        self.get_ref(owner, repo, branch).await
    }

    async fn create_ref(&self, owner: &str, repo: &str, branch: &str, sha: &str) -> Result<GitRef> {
        self.create_ref(owner, repo, branch, sha).await
    }

    async fn update_ref(&self, owner: &str, repo: &str, branch: &str, sha: &str) -> Result<GitRef> {
        self.update_ref(owner, repo, branch, sha).await
    }

    async fn create_blob(&self, owner: &str, repo: &str, content: &str) -> Result<BlobRef> {
        self.create_blob(owner, repo, content).await
    }

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<GitCommit> {
        self.get_commit(owner, repo, sha).await
    }

    async fn create_tree(&self, owner: &str, repo: &str, tree: NewTree) -> Result<TreeRef> {
        self.create_tree(owner, repo, tree).await
    }

    async fn create_commit(&self, owner: &str, repo: &str, commit: NewCommit) -> Result<GitCommit> {
        self.create_commit(owner, repo, commit).await
    }

    async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<ContentPayload> {
        self.get_content(owner, repo, path, reference).await
    }

    async fn create_pull(&self, owner: &str, repo: &str, pr: NewPullRequest) -> Result<PullRequest> {
        self.create_pull(owner, repo, pr).await
    }

    async fn request_reviewers(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        request: ReviewRequest,
    ) -> Result<PullRequest> {
        self.request_reviewers(owner, repo, number, request).await
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: IssueUpdate,
    ) -> Result<()> {
        self.update_issue(owner, repo, number, update).await
    }
}
