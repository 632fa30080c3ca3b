//! Pull request creation and follow-up annotation.

use tracing::debug;

use crate::config::{BranchPair, PullRequestSpec, RepositoryTarget};
use crate::error::Result;
use crate::traits::GitHubApi;
use crate::types::{IssueUpdate, NewPullRequest, ReviewRequest};

/// Open a pull request from the working branch into the reference branch and
/// attach reviewers, assignees, and labels. Returns the PR number.
///
/// Reviewers are requested only when the list is non-empty; a failure there
/// (e.g. requesting the PR author) is surfaced, not swallowed. Assignees and
/// labels go into a single issue update which is sent only if it carries at
/// least one of either.
///
/// # Errors
/// Returns [`crate::Error::InvalidArgument`] before any network call for
/// missing fields, and [`crate::Error::DuplicatePullRequest`] if a PR already
/// exists for this head/base pair.
pub async fn create_pull_request(
    api: &impl GitHubApi,
    repo: &RepositoryTarget,
    branches: &BranchPair,
    spec: &PullRequestSpec,
) -> Result<u64> {
    repo.validate()?;
    branches.validate()?;
    spec.validate()?;

    let owner = &repo.organization;
    let name = &repo.repo_name;

    let pr = api
        .create_pull(
            owner,
            name,
            NewPullRequest {
                title: spec.title.clone(),
                body: spec.body.clone(),
                head: branches.working_branch.clone(),
                base: branches.reference_branch.clone(),
            },
        )
        .await?;
    debug!(number = pr.number, url = %pr.html_url, "created pull request");

    if !spec.reviewers.is_empty() {
        api.request_reviewers(
            owner,
            name,
            pr.number,
            ReviewRequest {
                reviewers: spec.reviewers.clone(),
            },
        )
        .await?;
    }

    let update = IssueUpdate {
        assignees: spec.assignees.clone(),
        labels: spec.labels.clone(),
    };
    if !update.is_empty() {
        api.update_issue(owner, name, pr.number, update).await?;
    }

    Ok(pr.number)
}
