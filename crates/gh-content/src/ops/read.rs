//! Blob content reading.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::config::{RepositoryTarget, require};
use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{ContentEntry, ContentPayload};

/// Read the content of `path` on `reference_branch`.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] before any network call for missing
/// fields, [`Error::BranchNotFound`] if the branch is absent, and
/// [`Error::ContentNotFound`] if the path resolves to no readable file
/// (missing, deleted, or a directory).
pub async fn read_blob(
    api: &impl GitHubApi,
    repo: &RepositoryTarget,
    reference_branch: &str,
    path: &str,
) -> Result<String> {
    repo.validate()?;
    require(reference_branch, "reference_branch")?;
    require(path, "file_path")?;

    let owner = &repo.organization;
    let name = &repo.repo_name;

    // Exact ref lookup; a listing would only show the first page of refs.
    match api.get_ref(owner, name, reference_branch).await {
        Ok(_) => {}
        Err(Error::ApiError { status: 404, .. }) => {
            return Err(Error::BranchNotFound(reference_branch.to_string()));
        }
        Err(err) => return Err(err),
    }

    let payload = match api.get_content(owner, name, path, reference_branch).await {
        Ok(payload) => payload,
        Err(Error::ApiError { status: 404, .. }) => {
            return Err(Error::ContentNotFound(path.to_string()));
        }
        Err(err) => return Err(err),
    };

    match payload {
        ContentPayload::File(entry) => {
            let content = decode_entry(&entry)?;
            debug!(path, branch = reference_branch, bytes = content.len(), "read blob content");
            Ok(content)
        }
        // A directory listing carries no blob content.
        ContentPayload::Directory(_) => Err(Error::ContentNotFound(path.to_string())),
    }
}

/// Decode a base64 file entry to its UTF-8 string content.
///
/// GitHub wraps the base64 payload in newlines; whitespace is stripped before
/// decoding.
fn decode_entry(entry: &ContentEntry) -> Result<String> {
    let (Some(content), Some(encoding)) = (entry.content.as_ref(), entry.encoding.as_deref())
    else {
        return Err(Error::ContentNotFound(entry.path.clone()));
    };

    if encoding != "base64" {
        return Err(Error::ContentDecode {
            path: entry.path.clone(),
            reason: format!("unexpected encoding: {encoding}"),
        });
    }

    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| Error::ContentDecode {
            path: entry.path.clone(),
            reason: err.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|err| Error::ContentDecode {
        path: entry.path.clone(),
        reason: err.to_string(),
    })
}
