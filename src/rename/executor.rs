use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::types::{ExecutionReport, RenameFailure, RenamePlan};

/// Rename every planned file inside `dir`.
///
/// Each rename stands alone: a failure is recorded and the rest still run.
/// Nothing already renamed is rolled back.
pub fn execute_plan(dir: &Path, plan: &RenamePlan) -> ExecutionReport {
    let mut report = ExecutionReport::default();

    for entry in &plan.entries {
        let from = dir.join(&entry.original_name);
        let to = dir.join(&entry.proposed_name);

        match fs::rename(&from, &to) {
            Ok(()) => {
                info!("Renamed: {} -> {}", entry.original_name, entry.proposed_name);
                report.renamed.push(entry.clone());
            }
            Err(e) => {
                warn!(
                    "Failed to rename {} -> {}: {}",
                    entry.original_name, entry.proposed_name, e
                );
                report.failed.push(RenameFailure {
                    entry: entry.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}
