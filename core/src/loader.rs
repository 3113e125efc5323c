//! # Range Loader
//!
//! Turns text into a [`RangeSet`]. Two matching disciplines exist:
//!
//! * **Free text** ([`ranges_from_blob`]): CIDR tokens are picked out from anywhere,
//!   which is what scraped HTML or JSON bodies need.
//! * **CIDR files** ([`ranges_from_cidr_lines`]): a line counts only if the entire
//!   line is one CIDR token. Used for the files in the database directory.
//!
//! Tokens that fail value validation are dropped without surfacing an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};
use uncdn_common::config::Config;
use uncdn_common::error::LoadError;
use uncdn_common::network::extract;
use uncdn_common::network::range::{NetworkRange, RangeSet};

/// Marker a file name must contain (case-insensitive) to be read from the database directory.
pub const CIDR_FILE_MARKER: &str = "cidrs";

/// Folds the tokens that parse into a set, skipping the rest.
pub fn parse_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> RangeSet {
    tokens
        .into_iter()
        .filter_map(|token| match token.parse::<NetworkRange>() {
            Ok(range) => Some(range),
            Err(e) => {
                trace!("Skipping token {token}: {e}");
                None
            }
        })
        .collect()
}

pub fn ranges_from_blob(blob: &str) -> RangeSet {
    parse_tokens(extract::cidr_tokens(blob))
}

pub fn ranges_from_cidr_lines(text: &str) -> RangeSet {
    parse_tokens(text.lines().filter_map(extract::cidr_line))
}

pub fn is_cidr_source(file_name: &str) -> bool {
    file_name.to_lowercase().contains(CIDR_FILE_MARKER)
}

/// Lists the candidate files of `dir` in name order.
pub fn cidr_sources(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut sources: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_cidr_source(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        // `Path::is_file` follows symlinks; directories are still excluded.
        .filter(|path| path.is_file())
        .collect();

    sources.sort();
    Ok(sources)
}

/// Loads every `*cidrs*` file of `dir`.
///
/// The directory itself must be readable. A single unreadable file is logged and skipped.
pub fn load_dir(dir: &Path) -> Result<RangeSet, LoadError> {
    let mut ranges = RangeSet::new();

    for path in cidr_sources(dir)? {
        match fs::read_to_string(&path) {
            Ok(text) => {
                let found = ranges_from_cidr_lines(&text);
                debug!("{} ranges read from {}", found.len(), path.display());
                ranges.extend(found.iter().copied());
            }
            Err(e) => warn!("Skipping {}: {e}", path.display()),
        }
    }

    info!("Loaded {} CIDR ranges from {}", ranges.len(), dir.display());
    Ok(ranges)
}

pub fn load_all(cfg: &Config) -> Result<RangeSet, LoadError> {
    load_dir(&cfg.source_dir)
}
