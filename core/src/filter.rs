//! # Line Filter
//!
//! A line is dropped as soon as **any** address on it falls inside **any** loaded range.
//! Lines without a dotted quad are always kept, and tokens that look like an address
//! but are not one (`300.1.1.1`) never match.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;
use uncdn_common::network::extract;
use uncdn_common::network::range::RangeSet;

/// An input line together with its address-shaped substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine<'a> {
    pub text: &'a str,
    pub ips: Vec<&'a str>,
}

impl<'a> CandidateLine<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ips: extract::ip_tokens(text).collect(),
        }
    }

    pub fn matches(&self, ranges: &RangeSet) -> bool {
        self.ips
            .iter()
            .filter_map(|token| extract::parse_ip(token))
            .any(|ip| ranges.contains(ip))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub kept: Vec<String>,
    pub removed: usize,
}

impl FilterOutcome {
    /// Kept lines joined by newlines, always ending in exactly one `\n`.
    ///
    /// When nothing is kept the result is a lone `"\n"`.
    pub fn render(&self) -> String {
        let mut out = self.kept.join("\n");
        out.push('\n');
        out
    }
}

pub fn filter_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    ranges: &RangeSet,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for line in lines {
        if CandidateLine::new(line).matches(ranges) {
            outcome.removed += 1;
        } else {
            outcome.kept.push(line.to_string());
        }
    }

    outcome
}

/// Strips trailing whitespace and drops blank lines.
pub fn input_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
}

pub fn filter_file(input: &Path, output: &Path, ranges: &RangeSet) -> anyhow::Result<FilterOutcome> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read input list {}", input.display()))?;

    let outcome = filter_lines(input_lines(&text), ranges);

    fs::write(output, outcome.render())
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "{} lines written to {} (removed {} lines with CDN IPs)",
        outcome.kept.len(),
        output.display(),
        outcome.removed
    );

    Ok(outcome)
}
