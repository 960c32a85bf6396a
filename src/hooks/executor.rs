use crate::error::{PagesPublishError, Result};
use crate::hooks::HookContext;
use std::path::Path;
use std::process::Command;

/// Executes pages-publish hook scripts
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a hook script with the given context
    ///
    /// The script is executed with environment variables set from the context.
    /// If the script exits with code 0, the hook succeeds. Any non-zero exit
    /// code is treated as a failure.
    ///
    /// # Arguments
    /// * `script_path` - Path to the hook script (must be executable)
    /// * `context` - Hook context with environment variables
    ///
    /// # Returns
    /// * `Ok(())` if hook succeeds (exit code 0)
    /// * `Err` if script not found, not executable, or returns non-zero exit code
    pub fn execute(script_path: &str, context: &HookContext) -> Result<()> {
        let path = Path::new(script_path);

        if !path.exists() {
            return Err(PagesPublishError::hook(format!(
                "Hook script not found: {}",
                script_path
            )));
        }

        if !path.is_file() {
            return Err(PagesPublishError::hook(format!(
                "Hook path is not a file: {}",
                script_path
            )));
        }

        let env_vars = context.to_env_vars();

        let mut cmd = Command::new(script_path);

        // Add environment variables to the command
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| {
            PagesPublishError::hook(format!("Failed to execute hook {}: {}", script_path, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(PagesPublishError::hook(format!(
                "Hook {} failed with exit code {}\nStdout: {}\nStderr: {}",
                script_path,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(())
    }

    /// Try to execute a hook, logging errors but not failing
    ///
    /// Used for post-publish hooks where the publish has already settled on
    /// the remote and a hook failure must not retroactively fail it.
    ///
    /// # Arguments
    /// * `script_path` - Path to the hook script
    /// * `context` - Hook context
    pub fn execute_permissive(script_path: &str, context: &HookContext) {
        match Self::execute(script_path, context) {
            Ok(()) => {
                println!("✓ Hook executed successfully: {}", script_path);
            }
            Err(e) => {
                eprintln!("⚠ Hook warning: {}", e);
            }
        }
    }
}
