use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a CIDR token did not become a [`NetworkRange`](crate::network::range::NetworkRange).
///
/// Loaders treat every variant as "skip this token".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("missing '/prefix' in '{0}'")]
    MissingPrefix(String),

    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),

    #[error("invalid prefix length '{0}'")]
    InvalidPrefix(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// A file the run cannot proceed without does not exist.
    #[error("required file not found: {}", path.display())]
    MissingSourceList { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
