use colored::*;
use uncdn_common::config::Config;
use uncdn_core::fetch::{self, UpdateReport, http::HttpFetcher};

use crate::terminal::print;

pub async fn update(cfg: &Config) -> anyhow::Result<UpdateReport> {
    let fetcher = HttpFetcher::new(cfg.fetch_timeout)?;
    let report = fetch::update(cfg, &fetcher).await?;

    print_summary(&report, cfg);
    Ok(report)
}

fn print_summary(report: &UpdateReport, cfg: &Config) {
    let verdict = format!(
        "Update Complete: {} unique CIDRs saved",
        report.unique.to_string().bold().green()
    );

    print::summary(
        &[
            ("Sources", report.sources.to_string()),
            ("Failed", report.failed.to_string()),
            ("Written to", cfg.aggregate_output.display().to_string()),
        ],
        &verdict,
    );
}
