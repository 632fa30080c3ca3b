//! In-memory [`GitHubApi`] stub recording every call, for operation tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{
    BlobRef, ContentPayload, GitCommit, GitRef, IssueUpdate, NewCommit, NewPullRequest, NewTree,
    PullRequest, RefObject, ReviewRequest, TreeRef,
};

/// A stub transport: canned refs/commits/content in, recorded mutations out.
#[derive(Default)]
pub(crate) struct StubApi {
    /// Branch refs visible to `get_ref`. Mutated by `create_ref`/`update_ref`
    /// so follow-up reads see the new state.
    pub refs: Mutex<Vec<GitRef>>,

    /// Commit SHA -> tree SHA, served by `get_commit`.
    pub commits: Mutex<HashMap<String, String>>,

    /// Payload served by `get_content`; `None` means 404.
    pub content: Mutex<Option<ContentPayload>>,

    /// Every endpoint call, in order.
    pub calls: Mutex<Vec<&'static str>>,

    pub created_refs: Mutex<Vec<(String, String)>>,
    pub updated_refs: Mutex<Vec<(String, String)>>,
    pub created_blobs: Mutex<Vec<String>>,
    pub created_trees: Mutex<Vec<NewTree>>,
    pub created_commits: Mutex<Vec<NewCommit>>,
    pub created_pulls: Mutex<Vec<NewPullRequest>>,
    pub review_requests: Mutex<Vec<ReviewRequest>>,
    pub issue_updates: Mutex<Vec<IssueUpdate>>,
}

impl StubApi {
    pub fn with_branch(self, branch: &str, sha: &str) -> Self {
        self.refs.lock().unwrap().push(GitRef {
            ref_name: format!("refs/heads/{branch}"),
            object: RefObject {
                sha: sha.to_string(),
            },
        });
        self
    }

    pub fn with_commit(self, sha: &str, tree_sha: &str) -> Self {
        self.commits
            .lock()
            .unwrap()
            .insert(sha.to_string(), tree_sha.to_string());
        self
    }

    pub fn with_content(self, payload: ContentPayload) -> Self {
        *self.content.lock().unwrap() = Some(payload);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found() -> Error {
        Error::ApiError {
            status: 404,
            message: "Not Found".into(),
        }
    }
}

impl GitHubApi for StubApi {
    async fn get_ref(&self, _owner: &str, _repo: &str, branch: &str) -> Result<GitRef> {
        self.record("get_ref");
        let ref_name = format!("refs/heads/{branch}");
        self.refs
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.ref_name == ref_name)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_ref(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef> {
        self.record("create_ref");
        self.created_refs
            .lock()
            .unwrap()
            .push((branch.to_string(), sha.to_string()));
        let git_ref = GitRef {
            ref_name: format!("refs/heads/{branch}"),
            object: RefObject {
                sha: sha.to_string(),
            },
        };
        self.refs.lock().unwrap().push(git_ref.clone());
        Ok(git_ref)
    }

    async fn update_ref(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef> {
        self.record("update_ref");
        self.updated_refs
            .lock()
            .unwrap()
            .push((branch.to_string(), sha.to_string()));
        let ref_name = format!("refs/heads/{branch}");
        let mut refs = self.refs.lock().unwrap();
        let git_ref = refs
            .iter_mut()
            .find(|r| r.ref_name == ref_name)
            .ok_or_else(Self::not_found)?;
        git_ref.object.sha = sha.to_string();
        Ok(git_ref.clone())
    }

    async fn create_blob(&self, _owner: &str, _repo: &str, content: &str) -> Result<BlobRef> {
        self.record("create_blob");
        let mut blobs = self.created_blobs.lock().unwrap();
        blobs.push(content.to_string());
        Ok(BlobRef {
            sha: format!("blob-{}", blobs.len()),
        })
    }

    async fn get_commit(&self, _owner: &str, _repo: &str, sha: &str) -> Result<GitCommit> {
        self.record("get_commit");
        let tree_sha = self
            .commits
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .ok_or_else(Self::not_found)?;
        Ok(GitCommit {
            sha: sha.to_string(),
            tree: TreeRef { sha: tree_sha },
        })
    }

    async fn create_tree(&self, _owner: &str, _repo: &str, tree: NewTree) -> Result<TreeRef> {
        self.record("create_tree");
        let mut trees = self.created_trees.lock().unwrap();
        trees.push(tree);
        Ok(TreeRef {
            sha: format!("tree-{}", trees.len()),
        })
    }

    async fn create_commit(
        &self,
        _owner: &str,
        _repo: &str,
        commit: NewCommit,
    ) -> Result<GitCommit> {
        self.record("create_commit");
        let mut commits = self.created_commits.lock().unwrap();
        commits.push(commit.clone());
        let sha = format!("commit-{}", commits.len());
        self.commits
            .lock()
            .unwrap()
            .insert(sha.clone(), commit.tree.clone());
        Ok(GitCommit {
            sha,
            tree: TreeRef { sha: commit.tree },
        })
    }

    async fn get_content(
        &self,
        _owner: &str,
        _repo: &str,
        _path: &str,
        _reference: &str,
    ) -> Result<ContentPayload> {
        self.record("get_content");
        self.content
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(Self::not_found)
    }

    async fn create_pull(
        &self,
        _owner: &str,
        _repo: &str,
        pr: NewPullRequest,
    ) -> Result<PullRequest> {
        self.record("create_pull");
        self.created_pulls.lock().unwrap().push(pr);
        Ok(PullRequest {
            number: 42,
            html_url: "https://github.com/owner/repo/pull/42".into(),
        })
    }

    async fn request_reviewers(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        request: ReviewRequest,
    ) -> Result<PullRequest> {
        self.record("request_reviewers");
        self.review_requests.lock().unwrap().push(request);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/owner/repo/pull/{number}"),
        })
    }

    async fn update_issue(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
        update: IssueUpdate,
    ) -> Result<()> {
        self.record("update_issue");
        self.issue_updates.lock().unwrap().push(update);
        Ok(())
    }
}
