//! The Git object-graph write path: blob, tree, commit, ref update.

use tracing::debug;

use crate::config::{BranchPair, ChangeRequest, RepositoryTarget};
use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{NewCommit, NewTree, NewTreeItem};

/// Commit a single file change onto the working branch, creating the branch
/// from the reference branch if it does not exist yet. Returns the new commit
/// SHA.
///
/// The sequence is: ensure working branch -> resolve its tip -> create blob ->
/// create tree layered on the tip's tree -> create commit with the tip as sole
/// parent -> fast-forward the working ref. Every step reads IDs produced by
/// the step before it; no step is retried independently. A failed step may
/// leave orphaned blob/tree objects behind, which the hosting service
/// eventually garbage-collects.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] before any network call for missing
/// fields, [`Error::BranchNotFound`] if the reference branch is absent,
/// [`Error::BranchAlreadyExists`] if a racing writer created the working
/// branch between the lookup and the create, and [`Error::ConcurrentUpdate`]
/// if the final ref update is rejected as non-fast-forward.
pub async fn write_and_commit(
    api: &impl GitHubApi,
    repo: &RepositoryTarget,
    branches: &BranchPair,
    change: &ChangeRequest,
) -> Result<String> {
    repo.validate()?;
    branches.validate()?;
    change.validate()?;

    let owner = &repo.organization;
    let name = &repo.repo_name;

    // Exact ref lookups; a listing would only show the first page of refs.
    // For a freshly created branch the tip is the reference branch's tip
    // commit.
    let tip = match api.get_ref(owner, name, &branches.working_branch).await {
        Ok(tip) => tip,
        Err(Error::ApiError { status: 404, .. }) => {
            let reference = match api.get_ref(owner, name, &branches.reference_branch).await {
                Ok(reference) => reference,
                Err(Error::ApiError { status: 404, .. }) => {
                    return Err(Error::BranchNotFound(branches.reference_branch.clone()));
                }
                Err(err) => return Err(err),
            };

            let created = api
                .create_ref(owner, name, &branches.working_branch, &reference.object.sha)
                .await?;
            debug!(
                branch = %branches.working_branch,
                base = %branches.reference_branch,
                sha = %reference.object.sha,
                "created working branch"
            );
            created
        }
        Err(err) => return Err(err),
    };
    let tip_commit = api.get_commit(owner, name, &tip.object.sha).await?;

    let blob = api.create_blob(owner, name, &change.file_content).await?;

    let tree = api
        .create_tree(
            owner,
            name,
            NewTree {
                base_tree: tip_commit.tree.sha,
                tree: vec![NewTreeItem {
                    path: change.file_path.clone(),
                    mode: change.mode.as_str().to_owned(),
                    item_type: "blob".into(),
                    sha: blob.sha,
                }],
            },
        )
        .await?;

    let commit = api
        .create_commit(
            owner,
            name,
            NewCommit {
                message: change.commit_message.clone(),
                tree: tree.sha,
                parents: vec![tip.object.sha.clone()],
            },
        )
        .await?;

    api.update_ref(owner, name, &branches.working_branch, &commit.sha)
        .await?;
    debug!(
        branch = %branches.working_branch,
        sha = %commit.sha,
        path = %change.file_path,
        "committed file change"
    );

    Ok(commit.sha)
}
