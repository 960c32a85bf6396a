use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Types of hooks available in the publish workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookType {
    PrePublish,
    PostPublish,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PrePublish => "pre-publish",
            HookType::PostPublish => "post-publish",
        }
    }
}

/// Context information passed to a hook
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Type of hook being executed
    pub hook_type: HookType,
    /// Branch being published to
    pub branch: String,
    /// Remote repository URL
    pub repo: String,
    /// Source directory being published
    pub source_dir: String,
    /// Publish commit id, once one exists (post-publish only)
    pub commit_id: Option<String>,
    /// Number of files in the snapshot if already scanned
    pub file_count: Option<usize>,
}

impl HookContext {
    /// Convert context to environment variables for the hook script
    ///
    /// Maps context fields to PAGESPUBLISH_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("PAGESPUBLISH_BRANCH".to_string(), self.branch.clone());
        env.insert("PAGESPUBLISH_REPO".to_string(), self.repo.clone());
        env.insert(
            "PAGESPUBLISH_SOURCE_DIR".to_string(),
            self.source_dir.clone(),
        );

        if let Some(ref commit) = self.commit_id {
            env.insert("PAGESPUBLISH_COMMIT".to_string(), commit.clone());
        }

        if let Some(count) = self.file_count {
            env.insert("PAGESPUBLISH_FILE_COUNT".to_string(), count.to_string());
        }

        env
    }
}
