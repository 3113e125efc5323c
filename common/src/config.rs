use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DB_DIR: &str = "cidr-db";
pub const SOURCE_LIST_FILE: &str = "cidr-urls.txt";
pub const AGGREGATE_FILE: &str = "latest-cidrs.txt";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// One URL per line, read by the fetch stage.
    pub source_list: PathBuf,
    /// Sorted CIDR tokens written by the fetch stage.
    pub aggregate_output: PathBuf,
    /// Directory scanned for `*cidrs*` files by the range loader.
    ///
    /// The aggregate file normally lives here too.
    pub source_dir: PathBuf,
    /// Upper bound on a single HTTP request.
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_db_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            source_list: dir.join(SOURCE_LIST_FILE),
            aggregate_output: dir.join(AGGREGATE_FILE),
            source_dir: dir.to_path_buf(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_db_dir(DEFAULT_DB_DIR)
    }
}
