use crate::error::{PagesPublishError, Result};
use crate::git::{Committer, Repository};
use git2::Oid;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A call made against a [MockRepository], in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    RemoteBranchHead {
        branch: String,
    },
    WriteDirectoryTree {
        dir: PathBuf,
    },
    CommitSnapshot {
        tree: Oid,
        parent: Option<Oid>,
        committer: Committer,
        message: String,
    },
    PushBranch {
        branch: String,
        commit: Oid,
        force: bool,
    },
}

/// Mock repository for testing without actual git operations
///
/// Records every call so tests can assert exactly what a workflow passed
/// through to the git layer, and in which order.
pub struct MockRepository {
    branch_heads: HashMap<String, Oid>,
    tree_oid: Oid,
    commit_oid: Oid,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            branch_heads: HashMap::new(),
            tree_oid: Oid::zero(),
            commit_oid: Oid::zero(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the head commit the mock advertises for a remote branch
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Set the OIDs returned for the snapshot tree and the publish commit
    pub fn set_results(&mut self, tree: Oid, commit: Oid) {
        self.tree_oid = tree;
        self.commit_oid = commit;
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn remote_branch_head(&self, branch: &str) -> Result<Option<Oid>> {
        self.record(RecordedCall::RemoteBranchHead {
            branch: branch.to_string(),
        });
        Ok(self.branch_heads.get(branch).copied())
    }

    fn write_directory_tree(&self, dir: &Path) -> Result<Oid> {
        self.record(RecordedCall::WriteDirectoryTree {
            dir: dir.to_path_buf(),
        });
        if !dir.is_dir() {
            return Err(PagesPublishError::source(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }
        Ok(self.tree_oid)
    }

    fn commit_snapshot(
        &self,
        tree: Oid,
        parent: Option<Oid>,
        committer: &Committer,
        message: &str,
    ) -> Result<Oid> {
        self.record(RecordedCall::CommitSnapshot {
            tree,
            parent,
            committer: committer.clone(),
            message: message.to_string(),
        });
        Ok(self.commit_oid)
    }

    fn push_branch(&self, branch: &str, commit: Oid, force: bool) -> Result<()> {
        self.record(RecordedCall::PushBranch {
            branch: branch.to_string(),
            commit,
            force,
        });
        Ok(())
    }
}
