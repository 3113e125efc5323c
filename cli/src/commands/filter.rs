use std::path::Path;

use colored::*;
use tracing::warn;
use uncdn_common::config::Config;
use uncdn_core::filter::{self, FilterOutcome};
use uncdn_core::loader;
use uncdn_core::prerequisite::{self, Prerequisite};

use crate::commands::update;
use crate::terminal::{print, prompt};

/// What to do when the aggregated CIDR file is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Fetch,
    Ask,
    Abort,
}

fn resolve(auto_fetch: bool, interactive: bool) -> Resolution {
    match (auto_fetch, interactive) {
        (true, _) => Resolution::Fetch,
        (false, true) => Resolution::Ask,
        (false, false) => Resolution::Abort,
    }
}

pub async fn filter(input: &Path, output: &Path, cfg: &Config, auto_fetch: bool) -> anyhow::Result<()> {
    if let Prerequisite::MissingAggregate { path } = prerequisite::check(cfg) {
        warn!("{} does not exist.", path.display());

        let fetch = match resolve(auto_fetch, prompt::is_interactive()) {
            Resolution::Fetch => true,
            Resolution::Ask => prompt::confirm("Do you want to download CIDR lists now?")?,
            Resolution::Abort => false,
        };

        if !fetch {
            anyhow::bail!(
                "Aborting: {} is required (run with --update or --yes)",
                path.display()
            );
        }

        print::header("updating cidr database");
        update::update(cfg).await?;
        print::header("filtering input");
    }

    let ranges = loader::load_all(cfg)?;
    let outcome = filter::filter_file(input, output, &ranges)?;

    print_summary(&outcome, ranges.len(), output);
    Ok(())
}

fn print_summary(outcome: &FilterOutcome, range_count: usize, output: &Path) {
    let verdict = format!(
        "Filtering Complete: {} kept, {} removed",
        outcome.kept.len().to_string().bold().green(),
        outcome.removed.to_string().bold().yellow()
    );

    print::summary(
        &[
            ("Ranges", range_count.to_string()),
            ("Kept", outcome.kept.len().to_string()),
            ("Removed", outcome.removed.to_string()),
            ("Output", output.display().to_string()),
        ],
        &verdict,
    );
}
