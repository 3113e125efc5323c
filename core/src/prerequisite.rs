use std::path::PathBuf;

use uncdn_common::config::Config;

/// Outcome of checking what the filter stage needs before it can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerequisite {
    Ready,
    /// The aggregated CIDR file has never been fetched (or was removed).
    MissingAggregate { path: PathBuf },
}

/// Never prompts and never fetches; the caller decides what to do about a missing file.
pub fn check(cfg: &Config) -> Prerequisite {
    if cfg.aggregate_output.is_file() {
        Prerequisite::Ready
    } else {
        Prerequisite::MissingAggregate {
            path: cfg.aggregate_output.clone(),
        }
    }
}
