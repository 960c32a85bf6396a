//! Publish workflow orchestration
//!
//! Contains the core publish flow, decoupled from CLI argument parsing:
//! validate the source directory, snapshot it, commit the snapshot on top of
//! the remote branch head, push, and run lifecycle hooks around the
//! operation. The workflow is generic over [Repository] so it can run
//! against a mock without a reachable remote.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, HooksConfig};
use crate::error::{PagesPublishError, Result};
use crate::git::{Committer, Repository};
use crate::hooks::{HookContext, HookExecutor, HookType};

/// Everything one publish needs, resolved from configuration
///
/// Constructed once per invocation and never mutated afterwards. Each
/// process run issues exactly one independent publish attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Directory whose contents get published
    pub source_dir: PathBuf,

    /// Target branch on the remote
    pub branch: String,

    /// Remote repository URL (informational here; the repository
    /// implementation is already bound to it)
    pub repo_url: String,

    /// Commit message for the publish commit
    pub message: String,

    /// Identity attributed to the publish commit
    pub committer: Committer,

    /// Overwrite remote branch history instead of requiring fast-forward
    pub force: bool,

    /// Lifecycle hook scripts to run around the publish
    pub hooks: HooksConfig,
}

impl PublishRequest {
    /// Build a request from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        PublishRequest {
            source_dir: PathBuf::from(&config.source),
            branch: config.branch.clone(),
            repo_url: config.repo.clone(),
            message: config.message.clone(),
            committer: Committer {
                name: config.user.name.clone(),
                email: config.user.email.clone(),
            },
            force: config.push.force,
            hooks: config.hooks.clone(),
        }
    }
}

/// Result of a completed publish
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReceipt {
    /// The branch that was published to
    pub branch: String,

    /// Full hex id of the publish commit
    pub commit: String,

    /// Number of files in the published snapshot
    pub file_count: usize,

    /// Whether this publish created the remote branch
    pub first_publish: bool,
}

/// What a source directory scan found
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStats {
    /// Number of publishable files (recursive, `.git` excluded)
    pub file_count: usize,
}

/// Inspect the source directory before publishing.
///
/// The directory must exist and be readable; this is checked before anything
/// touches the remote, so a missing directory never produces a half-done
/// publish.
///
/// # Returns
/// * `Ok(SourceStats)` - The directory exists; carries the file count
/// * `Err` - If the path is missing, not a directory, or unreadable
pub fn scan_source(dir: &Path) -> Result<SourceStats> {
    if !dir.exists() {
        return Err(PagesPublishError::source(format!(
            "'{}' does not exist",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(PagesPublishError::source(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let mut file_count = 0;
    count_files(dir, &mut file_count)?;

    Ok(SourceStats { file_count })
}

fn count_files(dir: &Path, count: &mut usize) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            if entry.file_name() == ".git" {
                continue;
            }
            count_files(&path, count)?;
        } else if path.is_file() {
            *count += 1;
        }
    }
    Ok(())
}

/// Main publish workflow
///
/// Orchestrates the entire publish:
/// 1. Check the source directory (fails before any repository call)
/// 2. Run the pre-publish hook, if configured (a failure aborts)
/// 3. Snapshot the source directory as a tree
/// 4. Commit the snapshot on top of the remote branch head
/// 5. Push the branch
/// 6. Run the post-publish hook, if configured (failures only warn)
///
/// Exactly one publish happens per call; there are no retries, and a failure
/// at any step propagates to the caller unchanged.
///
/// # Arguments
/// * `repo` - Repository implementation bound to the target remote
/// * `request` - The resolved publish request
///
/// # Returns
/// * `Ok(PublishReceipt)` - The publish settled on the remote
/// * `Err` - The first error encountered; nothing was retried
pub fn run_publish_workflow<R: Repository>(
    repo: &R,
    request: &PublishRequest,
) -> Result<PublishReceipt> {
    let stats = scan_source(&request.source_dir)?;

    if let Some(script) = &request.hooks.pre_publish {
        let context = HookContext {
            hook_type: HookType::PrePublish,
            branch: request.branch.clone(),
            repo: request.repo_url.clone(),
            source_dir: request.source_dir.display().to_string(),
            commit_id: None,
            file_count: Some(stats.file_count),
        };
        HookExecutor::execute(script, &context)?;
    }

    let parent = repo.remote_branch_head(&request.branch)?;
    let tree = repo.write_directory_tree(&request.source_dir)?;
    let commit = repo.commit_snapshot(tree, parent, &request.committer, &request.message)?;
    repo.push_branch(&request.branch, commit, request.force)?;

    let receipt = PublishReceipt {
        branch: request.branch.clone(),
        commit: commit.to_string(),
        file_count: stats.file_count,
        first_publish: parent.is_none(),
    };

    if let Some(script) = &request.hooks.post_publish {
        let context = HookContext {
            hook_type: HookType::PostPublish,
            branch: receipt.branch.clone(),
            repo: request.repo_url.clone(),
            source_dir: request.source_dir.display().to_string(),
            commit_id: Some(receipt.commit.clone()),
            file_count: Some(receipt.file_count),
        };
        HookExecutor::execute_permissive(script, &context);
    }

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{MockRepository, RecordedCall};
    use git2::Oid;
    use std::fs;
    use tempfile::TempDir;

    fn request_for(source: &Path) -> PublishRequest {
        PublishRequest {
            source_dir: source.to_path_buf(),
            branch: "ubicomp_ue".to_string(),
            repo_url: "https://github.com/irenmax/music-grid".to_string(),
            message: "Updates".to_string(),
            committer: Committer {
                name: "irenmax".to_string(),
                email: "max.irendorfer@gmail.com".to_string(),
            },
            force: false,
            hooks: HooksConfig::default(),
        }
    }

    #[test]
    fn test_workflow_passes_configuration_through_unchanged() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("index.html"), "<html></html>").unwrap();

        let repo = MockRepository::new();
        let request = request_for(&source);

        run_publish_workflow(&repo, &request).unwrap();

        let calls = repo.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[0],
            RecordedCall::RemoteBranchHead {
                branch: "ubicomp_ue".to_string()
            }
        );
        assert_eq!(
            calls[1],
            RecordedCall::WriteDirectoryTree {
                dir: source.clone()
            }
        );
        assert_eq!(
            calls[2],
            RecordedCall::CommitSnapshot {
                tree: Oid::zero(),
                parent: None,
                committer: Committer {
                    name: "irenmax".to_string(),
                    email: "max.irendorfer@gmail.com".to_string(),
                },
                message: "Updates".to_string(),
            }
        );
        assert_eq!(
            calls[3],
            RecordedCall::PushBranch {
                branch: "ubicomp_ue".to_string(),
                commit: Oid::zero(),
                force: false,
            }
        );
    }

    #[test]
    fn test_missing_source_fails_before_any_repository_call() {
        let dir = TempDir::new().unwrap();
        let repo = MockRepository::new();
        let request = request_for(&dir.path().join("public"));

        let result = run_publish_workflow(&repo, &request);

        assert!(matches!(result, Err(PagesPublishError::Source(_))));
        assert!(
            repo.calls().is_empty(),
            "no repository operation may happen for a missing source dir"
        );
    }

    #[test]
    fn test_source_that_is_a_file_fails() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::write(&source, "not a directory").unwrap();

        let repo = MockRepository::new();
        let request = request_for(&source);

        let result = run_publish_workflow(&repo, &request);
        assert!(matches!(result, Err(PagesPublishError::Source(_))));
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_first_publish_has_no_parent() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("index.html"), "x").unwrap();

        let repo = MockRepository::new();
        let receipt = run_publish_workflow(&repo, &request_for(&source)).unwrap();

        assert!(receipt.first_publish);
        assert_eq!(receipt.file_count, 1);
    }

    #[test]
    fn test_repeat_publish_parents_on_remote_head() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("index.html"), "x").unwrap();

        let head = Oid::from_bytes(&[7; 20]).unwrap();
        let mut repo = MockRepository::new();
        repo.set_branch_head("ubicomp_ue", head);

        let receipt = run_publish_workflow(&repo, &request_for(&source)).unwrap();
        assert!(!receipt.first_publish);

        let parent = repo.calls().iter().find_map(|call| match call {
            RecordedCall::CommitSnapshot { parent, .. } => Some(*parent),
            _ => None,
        });
        assert_eq!(parent, Some(Some(head)));
    }

    #[test]
    fn test_failing_pre_publish_hook_aborts_before_repository_calls() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(&source).unwrap();

        let repo = MockRepository::new();
        let mut request = request_for(&source);
        request.hooks.pre_publish = Some("/nonexistent/hook.sh".to_string());

        let result = run_publish_workflow(&repo, &request);
        assert!(matches!(result, Err(PagesPublishError::Hook(_))));
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_scan_source_counts_files_recursively() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(source.join("posts")).unwrap();
        fs::write(source.join("index.html"), "x").unwrap();
        fs::write(source.join("posts").join("one.html"), "x").unwrap();
        fs::write(source.join("posts").join("two.html"), "x").unwrap();

        let stats = scan_source(&source).unwrap();
        assert_eq!(stats.file_count, 3);
    }

    #[test]
    fn test_scan_source_skips_git_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(source.join(".git")).unwrap();
        fs::write(source.join(".git").join("config"), "x").unwrap();
        fs::write(source.join("index.html"), "x").unwrap();

        let stats = scan_source(&source).unwrap();
        assert_eq!(stats.file_count, 1);
    }

    #[test]
    fn test_empty_source_publishes_with_zero_files() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("public");
        fs::create_dir_all(&source).unwrap();

        let repo = MockRepository::new();
        let receipt = run_publish_workflow(&repo, &request_for(&source)).unwrap();

        assert_eq!(receipt.file_count, 0);
        assert_eq!(repo.calls().len(), 4);
    }
}
