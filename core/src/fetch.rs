//! The fetch-and-aggregate stage.
//!
//! Every URL of the source list is downloaded in turn and scanned for CIDR tokens.
//! A source that fails for any reason contributes nothing; the run carries on with
//! the next one. The union of raw tokens is written, sorted, to the aggregate file.
//!
//! Transport is hidden behind [`SourceFetcher`] so the stage can run against
//! in-memory sources as well as [`http::HttpFetcher`].

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};
use uncdn_common::config::Config;
use uncdn_common::error::LoadError;
use uncdn_common::network::extract;

pub mod http;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Retrieves a source as unstructured text.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub sources: usize,
    pub failed: usize,
    pub unique: usize,
}

/// Reads the URL list. Blank lines are ignored.
pub fn read_source_list(path: &Path) -> Result<Vec<String>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingSourceList {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Downloads every source and overwrites the aggregate file.
///
/// Only a missing source list (or a failure to write the output) is an error.
pub async fn update<F>(cfg: &Config, fetcher: &F) -> anyhow::Result<UpdateReport>
where
    F: SourceFetcher + ?Sized,
{
    let urls = read_source_list(&cfg.source_list)?;

    let mut tokens: BTreeSet<String> = BTreeSet::new();
    let mut failed: usize = 0;

    for url in &urls {
        match fetcher.fetch(url).await {
            Ok(body) => {
                let found: Vec<&str> = extract::cidr_tokens(&body).collect();
                info!("{} CIDRs extracted from {url}", found.len());
                tokens.extend(found.into_iter().map(str::to_string));
            }
            Err(e) => {
                error!("Failed to download {url}: {e}");
                failed += 1;
            }
        }
    }

    write_aggregate(&cfg.aggregate_output, &tokens)?;
    info!(
        "Saved {} unique CIDRs to {}",
        tokens.len(),
        cfg.aggregate_output.display()
    );

    Ok(UpdateReport {
        sources: urls.len(),
        failed,
        unique: tokens.len(),
    })
}

fn write_aggregate(path: &Path, tokens: &BTreeSet<String>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut out = String::new();
    for token in tokens {
        out.push_str(token);
        out.push('\n');
    }

    fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))
}
