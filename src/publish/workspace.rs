//! Ephemeral git workspaces for branch publication.
//!
//! The [`BranchPusher`] trait is the seam between the publish workflow and
//! the version-control tooling; [`Git2BranchPusher`] implements it with
//! git2 inside a tempdir workspace that is torn down on every exit path,
//! success or failure. Blocking git work runs off the async runtime via
//! `spawn_blocking`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{FetchOptions, IndexAddOption, PushOptions, RemoteCallbacks, Repository, Signature};
use thiserror::Error;

use crate::github::PersonalAccessToken;

/// Author identity recorded on workspace commits.
const COMMIT_AUTHOR_NAME: &str = "octoflow";
const COMMIT_AUTHOR_EMAIL: &str = "octoflow@users.noreply.github.com";

/// Errors raised by the git workspace, tagged by the failing step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitWorkspaceError {
    /// The ephemeral workspace could not be set up or driven.
    #[error("workspace error: {message}")]
    Workspace {
        /// Detail from the filesystem or task layer.
        message: String,
    },

    /// Cloning the remote repository failed.
    #[error("clone failed: {message}")]
    Clone {
        /// Error detail from git2.
        message: String,
    },

    /// Creating or checking out the branch failed.
    #[error("branch creation failed: {message}")]
    Branch {
        /// Error detail from git2.
        message: String,
    },

    /// Overlaying the caller's content tree failed.
    #[error("content overlay failed: {message}")]
    Overlay {
        /// Error detail from the copy operation.
        message: String,
    },

    /// Staging or committing the changes failed.
    #[error("commit failed: {message}")]
    Commit {
        /// Error detail from git2.
        message: String,
    },

    /// Pushing the branch to the remote failed.
    ///
    /// An existing remote branch of the same name surfaces here; no retry
    /// is attempted.
    #[error("push failed: {message}")]
    Push {
        /// Error detail from git2.
        message: String,
    },
}

/// Everything the pusher needs to publish one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPushRequest {
    /// HTTPS clone URL of the target repository.
    pub remote_url: String,
    /// Branch to create and push; also used as the commit message.
    pub branch: String,
    /// Caller-supplied content tree to overlay into the workspace.
    pub content_dir: PathBuf,
    /// Token for clone/push authentication; `None` only for remotes that
    /// need no credentials (e.g. local paths under test).
    pub token: Option<PersonalAccessToken>,
}

/// Version-control seam used by the publish workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BranchPusher: Send + Sync {
    /// Clones the remote, creates the branch, overlays the content,
    /// commits, and pushes, strictly in that order, aborting on the first
    /// failure.
    async fn push_branch(&self, request: BranchPushRequest) -> Result<(), GitWorkspaceError>;
}

/// git2-backed pusher working inside an ephemeral tempdir.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2BranchPusher;

#[async_trait]
impl BranchPusher for Git2BranchPusher {
    async fn push_branch(&self, request: BranchPushRequest) -> Result<(), GitWorkspaceError> {
        tokio::task::spawn_blocking(move || push_branch_blocking(&request))
            .await
            .map_err(|error| GitWorkspaceError::Workspace {
                message: format!("blocking git task failed: {error}"),
            })?
    }
}

fn push_branch_blocking(request: &BranchPushRequest) -> Result<(), GitWorkspaceError> {
    // Tempdir drop guarantees teardown on every exit path below.
    let workspace = tempfile::tempdir().map_err(|error| GitWorkspaceError::Workspace {
        message: error.to_string(),
    })?;

    let repo = clone_shallow(
        &request.remote_url,
        workspace.path(),
        request.token.as_ref(),
    )?;
    checkout_new_branch(&repo, &request.branch)?;
    overlay_tree(&request.content_dir, workspace.path())?;
    commit_all(&repo, &request.branch)?;
    push_to_origin(&repo, &request.branch, request.token.as_ref())?;

    tracing::debug!(branch = %request.branch, "pushed branch to remote");
    Ok(())
}

/// Builds remote callbacks carrying token credentials when present.
fn remote_callbacks(token: Option<&PersonalAccessToken>) -> RemoteCallbacks<'static> {
    let mut callbacks = RemoteCallbacks::new();
    if let Some(token) = token {
        let secret = token.clone();
        callbacks.credentials(move |_url, username, _allowed| {
            git2::Cred::userpass_plaintext(username.unwrap_or("x-access-token"), secret.value())
        });
    }
    callbacks
}

fn clone_shallow(
    url: &str,
    target: &Path,
    token: Option<&PersonalAccessToken>,
) -> Result<Repository, GitWorkspaceError> {
    let mut fetch_options = FetchOptions::new();
    fetch_options.depth(1);
    fetch_options.remote_callbacks(remote_callbacks(token));
    RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, target)
        .map_err(|error| GitWorkspaceError::Clone {
            message: error.message().to_owned(),
        })
}

fn checkout_new_branch(repo: &Repository, branch: &str) -> Result<(), GitWorkspaceError> {
    let map_error = |error: git2::Error| GitWorkspaceError::Branch {
        message: error.message().to_owned(),
    };

    let head = repo
        .head()
        .and_then(|reference| reference.peel_to_commit())
        .map_err(map_error)?;
    repo.branch(branch, &head, false).map_err(map_error)?;
    repo.set_head(&format!("refs/heads/{branch}"))
        .map_err(map_error)?;
    repo.checkout_head(Some(CheckoutBuilder::new().force()))
        .map_err(map_error)
}

/// Copies the content tree into the workspace, excluding any `.git`
/// directory so the caller's tree can never clobber the clone's own
/// control directory.
fn overlay_tree(source: &Path, target: &Path) -> Result<(), GitWorkspaceError> {
    copy_tree(source, target).map_err(|error| GitWorkspaceError::Overlay {
        message: error.to_string(),
    })
}

fn copy_tree(source: &Path, target: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let name = entry.file_name();
        if name == ".git" {
            continue;
        }
        let destination = target.join(&name);
        if entry.file_type()?.is_dir() {
            std::fs::create_dir_all(&destination)?;
            copy_tree(&entry.path(), &destination)?;
        } else {
            std::fs::copy(entry.path(), &destination)?;
        }
    }
    Ok(())
}

fn commit_all(repo: &Repository, message: &str) -> Result<(), GitWorkspaceError> {
    let map_error = |error: git2::Error| GitWorkspaceError::Commit {
        message: error.message().to_owned(),
    };

    let mut index = repo.index().map_err(map_error)?;
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .map_err(map_error)?;
    index.write().map_err(map_error)?;
    let tree_id = index.write_tree().map_err(map_error)?;
    let tree = repo.find_tree(tree_id).map_err(map_error)?;

    let signature =
        Signature::now(COMMIT_AUTHOR_NAME, COMMIT_AUTHOR_EMAIL).map_err(map_error)?;
    let parent = repo
        .head()
        .and_then(|reference| reference.peel_to_commit())
        .map_err(map_error)?;
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &[&parent],
    )
    .map_err(map_error)?;
    Ok(())
}

fn push_to_origin(
    repo: &Repository,
    branch: &str,
    token: Option<&PersonalAccessToken>,
) -> Result<(), GitWorkspaceError> {
    let map_error = |error: git2::Error| GitWorkspaceError::Push {
        message: error.message().to_owned(),
    };

    let mut remote = repo.find_remote("origin").map_err(map_error)?;
    let mut options = PushOptions::new();
    options.remote_callbacks(remote_callbacks(token));
    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    remote
        .push(&[refspec.as_str()], Some(&mut options))
        .map_err(map_error)
}
