use std::path::Path;

use webstage::config::Config;
use webstage::{logger, stage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging)?;

    let report = stage::stage_and_bundle(Path::new("."), &cfg)?;
    logger::log_info(&format!(
        "[Bundle] Staged {} files in {} directories ({} skipped), wrote {}",
        report.files_copied, report.dirs_visited, report.files_skipped, cfg.bundle.output
    ));
    Ok(())
}
