use crate::error::{PagesPublishError, Result};
use git2::{Oid, Repository};
use std::fs;
use std::path::Path;

/// Snapshot a directory as a git tree.
///
/// Recursively traverses the directory, writing blobs for files and trees
/// for subdirectories into the repository's object database. `.git`
/// directories are skipped, empty directories are omitted (git cannot
/// represent them), and the executable bit is preserved on unix.
pub fn write_directory_tree(repo: &Repository, dir: &Path) -> Result<Oid> {
    let mut builder = repo.treebuilder(None)?;

    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().into_string().map_err(|_| {
            PagesPublishError::source(format!(
                "non-UTF-8 file name under '{}'",
                dir.display()
            ))
        })?;

        if name == ".git" {
            continue;
        }

        if path.is_dir() {
            let sub_oid = write_directory_tree(repo, &path)?;
            if repo.find_tree(sub_oid)?.is_empty() {
                continue;
            }
            builder.insert(name.as_str(), sub_oid, 0o040000)?;
        } else if path.is_file() {
            let contents = fs::read(&path)?;
            let blob_oid = repo.blob(&contents)?;
            builder.insert(name.as_str(), blob_oid, blob_filemode(&path)?)?;
        }
        // Anything else (dangling symlinks, sockets) is not publishable
    }

    Ok(builder.write()?)
}

/// Blob filemode for a path, preserving the executable bit.
#[cfg(unix)]
fn blob_filemode(path: &Path) -> Result<i32> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)?.permissions().mode();
    Ok(if mode & 0o111 != 0 { 0o100755 } else { 0o100644 })
}

#[cfg(not(unix))]
fn blob_filemode(_path: &Path) -> Result<i32> {
    Ok(0o100644)
}
