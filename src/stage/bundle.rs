//! External Web Bundle generation

use crate::config::BundleConfig;
use crate::error::{Result, StageError};
use crate::logger;
use std::path::Path;
use std::process::Command;

/// One fixed invocation of the bundling tool over the staging directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleCommand {
    pub program: String,
    pub base_url: String,
    pub primary_url: String,
    pub output: String,
}

impl BundleCommand {
    pub fn from_config(config: &BundleConfig) -> Self {
        Self {
            program: config.program.clone(),
            base_url: config.base_url.clone(),
            primary_url: config.primary_url.clone(),
            output: config.output.clone(),
        }
    }

    /// `-dir <staging> -baseURL <base> -primaryURL <primary> -o <output>`
    pub fn args(&self, staging: &Path) -> Vec<String> {
        vec![
            "-dir".to_string(),
            staging.display().to_string(),
            "-baseURL".to_string(),
            self.base_url.clone(),
            "-primaryURL".to_string(),
            self.primary_url.clone(),
            "-o".to_string(),
            self.output.clone(),
        ]
    }

    /// Run the tool from `project_root` and wait for it
    ///
    /// Output is inherited. A missing program or a non-zero exit is an error.
    pub fn run(&self, project_root: &Path, staging: &Path) -> Result<()> {
        let args = self.args(staging);
        logger::log_bundle_command(&self.program, &args);

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(project_root)
            .status()
            .map_err(|source| StageError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(StageError::BundleFailed {
                program: self.program.clone(),
                status,
            })
        }
    }
}
