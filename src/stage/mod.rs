//! Staging and bundling
//!
//! Rebuilds the staging directory from the project tree, then hands it to
//! the external bundle tool.

mod bundle;
mod exclude;
mod mirror;

pub use bundle::BundleCommand;
pub use exclude::ExclusionRules;
pub use mirror::{StageReport, Stager};

use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Stage `project_root` and bundle the result
pub fn stage_and_bundle(project_root: &Path, config: &Config) -> Result<StageReport> {
    let stager = Stager::new(
        project_root,
        &config.stage.dir,
        ExclusionRules::from_config(&config.stage),
    );
    let report = stager.run()?;

    // The tool runs from the project root, so pass the configured relative path
    BundleCommand::from_config(&config.bundle).run(project_root, Path::new(&config.stage.dir))?;
    Ok(report)
}
