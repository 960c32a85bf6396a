//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user
//! interaction. Functions here are pure (no I/O side effects beyond
//! printing) and testable.

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Display a summary of a completed publish.
///
/// Shows the branch, the shortened publish commit id and the number of
/// files in the snapshot.
///
/// # Arguments
/// * `branch` - The branch that was published to
/// * `commit` - Full hex id of the publish commit
/// * `file_count` - Number of files in the published snapshot
pub fn display_publish_summary(branch: &str, commit: &str, file_count: usize) {
    let short_commit = if commit.len() > 7 { &commit[..7] } else { commit };

    println!("\n\x1b[1mPublished:\x1b[0m");
    println!("  Branch: \x1b[32m{}\x1b[0m", branch);
    println!("  Commit: {}", short_commit);
    println!("  Files:  {}", file_count);
}
