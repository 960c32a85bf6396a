use crate::error::{PagesPublishError, Result};
use crate::git::{tree, Committer};
use git2::{Oid, Repository as Git2Repo};
use std::fs;
use std::path::Path;

/// Real [Repository](super::Repository) implementation over a bare clone cache.
///
/// Publishing never touches a working tree: commits are built directly from
/// the source directory into a bare repository kept under the cache dir, and
/// pushed to the remote addressed by URL. Reusing the cache across runs keeps
/// repeat publishes cheap, since unchanged objects are already present.
pub struct Git2Repository {
    repo: Git2Repo,
    url: String,
    token: Option<String>,
}

impl std::fmt::Debug for Git2Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Repository")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Git2Repository {
    /// Open (or create) the bare cache repository backing publishes to `url`.
    ///
    /// # Arguments
    /// * `cache_dir` - Directory holding the bare cache repository
    /// * `url` - Remote repository URL (HTTPS or SSH)
    /// * `token_path` - Optional file containing a personal access token for
    ///   HTTPS remotes
    ///
    /// # Returns
    /// * `Ok(Git2Repository)` - Cache repository ready for publishing
    /// * `Err` - If the cache dir cannot be created or the token file read
    pub fn open(cache_dir: &Path, url: &str, token_path: Option<&Path>) -> Result<Self> {
        fs::create_dir_all(cache_dir)?;

        let mut opts = git2::RepositoryInitOptions::new();
        opts.bare(true);
        let repo = Git2Repo::init_opts(cache_dir, &opts)?;

        let token = match token_path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    PagesPublishError::config(format!(
                        "cannot read token file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Some(contents.trim().to_string())
            }
            None => None,
        };

        Ok(Git2Repository {
            repo,
            url: url.to_string(),
            token,
        })
    }

    /// The remote repository URL this cache publishes to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Credential callbacks shared by list, fetch and push.
    ///
    /// Tries, in order: the configured personal access token (HTTPS), SSH
    /// keys from ~/.ssh/, the SSH agent, then default credentials.
    fn remote_callbacks(&self) -> git2::RemoteCallbacks<'static> {
        let token = self.token.clone();
        let mut callbacks = git2::RemoteCallbacks::new();

        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            // Personal access token over HTTPS
            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(token) = &token {
                    return git2::Cred::userpass_plaintext(
                        username_from_url.unwrap_or("x-access-token"),
                        token,
                    );
                }
            }

            // SSH key authentication
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                // Try different key types in order of preference
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                // Try SSH agent as fallback
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            // Fall back to default credentials
            git2::Cred::default()
        });

        callbacks
    }

    /// Map a transport-level error to a remote error with a usable message.
    fn map_remote_error(&self, action: &str, e: git2::Error) -> PagesPublishError {
        if e.code() == git2::ErrorCode::Auth {
            PagesPublishError::remote(format!(
                "Authentication failed while trying to {} '{}': {}",
                action, self.url, e
            ))
        } else if e.class() == git2::ErrorClass::Net {
            PagesPublishError::remote(format!(
                "Network error while trying to {} '{}': {}",
                action, self.url, e
            ))
        } else {
            PagesPublishError::remote(format!("Failed to {} '{}': {}", action, self.url, e))
        }
    }
}

impl super::Repository for Git2Repository {
    fn remote_branch_head(&self, branch: &str) -> Result<Option<Oid>> {
        let refname = format!("refs/heads/{}", branch);
        let mut remote = self.repo.remote_anonymous(&self.url)?;

        // List the remote's advertised refs; the connection drops (and
        // disconnects) before the fetch below reuses the remote.
        let head = {
            let connection = remote
                .connect_auth(git2::Direction::Fetch, Some(self.remote_callbacks()), None)
                .map_err(|e| self.map_remote_error("connect to", e))?;

            connection
                .list()?
                .iter()
                .find(|h| h.name() == refname)
                .map(|h| h.oid())
        };

        let oid = match head {
            Some(oid) => oid,
            None => return Ok(None),
        };

        // Fetch the branch so its head commit can parent the next publish.
        // The forced refspec keeps the local branch in lockstep with the
        // remote even if a previous run left it elsewhere.
        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(self.remote_callbacks());

        let refspec = format!("+{}:{}", refname, refname);
        remote
            .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
            .map_err(|e| self.map_remote_error("fetch from", e))?;

        Ok(Some(oid))
    }

    fn write_directory_tree(&self, dir: &Path) -> Result<Oid> {
        tree::write_directory_tree(&self.repo, dir)
    }

    fn commit_snapshot(
        &self,
        tree: Oid,
        parent: Option<Oid>,
        committer: &Committer,
        message: &str,
    ) -> Result<Oid> {
        let tree = self.repo.find_tree(tree)?;
        let signature = git2::Signature::now(&committer.name, &committer.email)?;

        let parent_commit = match parent {
            Some(oid) => Some(self.repo.find_commit(oid)?),
            None => None,
        };
        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let oid = self
            .repo
            .commit(None, &signature, &signature, message, &tree, &parents)?;

        Ok(oid)
    }

    fn push_branch(&self, branch: &str, commit: Oid, force: bool) -> Result<()> {
        let refname = format!("refs/heads/{}", branch);

        // Point the local branch at the publish commit. The cache repository
        // is exclusively ours, so overwriting the reference is always safe.
        self.repo
            .reference(&refname, commit, true, "pages-publish: update publish branch")?;

        let mut remote = self.repo.remote_anonymous(&self.url)?;

        let mut callbacks = self.remote_callbacks();

        // Catch per-reference rejections during push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!(
            "{}{}:{}",
            if force { "+" } else { "" },
            refname,
            refname
        );

        match remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.class() == git2::ErrorClass::Net {
                    Err(PagesPublishError::remote(format!(
                        "Network error during push: {}",
                        e
                    )))
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(PagesPublishError::remote(format!(
                        "Reference error during push (remote branch moved? rerun, or use --force): {}",
                        e
                    )))
                } else {
                    Err(PagesPublishError::remote(format!(
                        "Failed to push branch '{}': {}",
                        branch, e
                    )))
                }
            }
        }
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send.
// All access goes through &self with libgit2's internally synchronized
// object database; pages-publish never shares one cache repository across
// concurrent publishes.
unsafe impl Sync for Git2Repository {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_cache_repository() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("cache");

        let repo = Git2Repository::open(&cache, "https://github.com/user/site", None).unwrap();
        assert_eq!(repo.url(), "https://github.com/user/site");
        assert!(cache.join("HEAD").exists(), "cache should be a bare repository");
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("cache");

        Git2Repository::open(&cache, "https://github.com/user/site", None).unwrap();
        let reopened = Git2Repository::open(&cache, "https://github.com/user/site", None);
        assert!(reopened.is_ok(), "reopening an existing cache should succeed");
    }

    #[test]
    fn test_open_reads_token_file() {
        let dir = TempDir::new().unwrap();
        let token_path = dir.path().join("token");
        std::fs::write(&token_path, "s3cret\n").unwrap();

        let repo = Git2Repository::open(
            &dir.path().join("cache"),
            "https://github.com/user/site",
            Some(&token_path),
        )
        .unwrap();
        assert_eq!(repo.token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_open_missing_token_file_fails() {
        let dir = TempDir::new().unwrap();

        let result = Git2Repository::open(
            &dir.path().join("cache"),
            "https://github.com/user/site",
            Some(&dir.path().join("no-such-token")),
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot read token file"));
    }
}
