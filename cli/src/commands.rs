pub mod filter;
pub mod update;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use uncdn_common::config::DEFAULT_DB_DIR;

#[derive(Parser, Debug)]
#[command(name = "uncdn", version)]
#[command(about = "Remove CDN IPs based on CIDR lists.")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(true)
        .args(["update", "input_ip_list"])
))]
pub struct CommandLine {
    /// Download and update the latest CIDRs
    #[arg(long)]
    pub update: bool,

    /// Input file (plain IPs or lines with embedded IPs)
    #[arg(
        short = 'i',
        long = "input-ip-list",
        visible_alias = "ipl",
        value_name = "PATH",
        requires = "output"
    )]
    pub input_ip_list: Option<PathBuf>,

    /// Output file with lines/IPs not in any CDN CIDR
    #[arg(short, long, value_name = "PATH", requires = "input_ip_list")]
    pub output: Option<PathBuf>,

    /// Download the CIDR lists without asking when they are missing
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Directory holding cidr-urls.txt and the *cidrs* files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DB_DIR)]
    pub db_dir: PathBuf,

    /// Per-request download timeout, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrites the single-dash `-ipl` spelling, which clap would read as `-i pl`, to `--ipl`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-ipl" { OsString::from("--ipl") } else { arg })
        .collect()
}
