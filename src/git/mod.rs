//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! needed to publish a directory snapshot to a remote branch, allowing for
//! multiple implementations including real repositories and mock
//! implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait, which defines the four
//! steps of a publish: look up the remote branch head, snapshot the source
//! directory as a tree, commit the snapshot, push the branch. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2`
//!   crate, backed by a bare clone cache
//! - [mock::MockRepository]: A call-recording implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations, so workflows can be exercised without a reachable remote.

pub mod mock;
pub mod repository;
mod tree;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::Path;

/// Identity attributed to publish commits
#[derive(Debug, Clone, PartialEq)]
pub struct Committer {
    /// The committer name
    pub name: String,
    /// The committer email
    pub email: String,
}

/// Common git operation trait for publishing a directory to a remote branch
///
/// All implementors must be `Send + Sync` to allow safe sharing across
/// threads. Methods return [crate::error::Result<T>]; implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::PagesPublishError] variants.
pub trait Repository: Send + Sync {
    /// Get the head commit of the target branch on the remote
    ///
    /// Returns `None` when the branch does not exist yet (first publish).
    /// When the branch exists, implementations must also make the head
    /// commit's objects available locally so it can parent the next
    /// publish commit.
    ///
    /// # Arguments
    /// * `branch` - The branch name on the remote (e.g., "gh-pages")
    ///
    /// # Example
    /// ```rust
    /// # use pages_publish::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.remote_branch_head("gh-pages")? {
    ///     Some(head) => println!("remote branch is at {}", head),
    ///     None => println!("first publish, branch will be created"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn remote_branch_head(&self, branch: &str) -> Result<Option<Oid>>;

    /// Snapshot a directory as a git tree
    ///
    /// Recursively records every file under `dir` (skipping `.git`; empty
    /// directories are omitted per git semantics) and returns the OID of the
    /// resulting tree.
    ///
    /// # Arguments
    /// * `dir` - The directory to snapshot; must exist and be readable
    fn write_directory_tree(&self, dir: &Path) -> Result<Oid>;

    /// Create the publish commit for a snapshot tree
    ///
    /// # Arguments
    /// * `tree` - OID of the snapshot tree
    /// * `parent` - Head of the remote branch, or `None` for a first publish
    /// * `committer` - Identity attributed to the commit
    /// * `message` - Commit message
    fn commit_snapshot(
        &self,
        tree: Oid,
        parent: Option<Oid>,
        committer: &Committer,
        message: &str,
    ) -> Result<Oid>;

    /// Push a publish commit to the target branch on the remote
    ///
    /// # Arguments
    /// * `branch` - The branch name on the remote
    /// * `commit` - The publish commit to push
    /// * `force` - Overwrite remote history instead of requiring fast-forward
    fn push_branch(&self, branch: &str, commit: Oid, force: bool) -> Result<()>;
}
