use std::fmt;

/// Warnings that occur at the boundaries of a publish.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The source directory exists but contains no files
    EmptySourceDir { path: String },
    /// The target branch does not exist on the remote yet
    MissingRemoteBranch { branch: String },
    /// A force push will discard the remote branch history
    ForcedUpdate { branch: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::EmptySourceDir { path } => {
                write!(
                    f,
                    "Source directory '{}' contains no files; publishing would replace the branch with an empty site",
                    path
                )
            }
            BoundaryWarning::MissingRemoteBranch { branch } => {
                write!(
                    f,
                    "Branch '{}' does not exist on the remote and will be created",
                    branch
                )
            }
            BoundaryWarning::ForcedUpdate { branch } => {
                write!(
                    f,
                    "Force push will discard the existing history of branch '{}'",
                    branch
                )
            }
        }
    }
}
