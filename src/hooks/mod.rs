//! Lifecycle hooks for extensibility
//!
//! Allows users to run custom scripts at key points of a publish:
//! - pre-publish: Before the snapshot is taken; a failure aborts the publish
//! - post-publish: After the branch is pushed; failures only warn
//!
//! Scripts receive the publish context through PAGESPUBLISH_* environment
//! variables.

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, HookType};
