//! # uncdn core
//!
//! The two stages of a run plus the fetch step that feeds them:
//!
//! * **[`fetch`]**: downloads the configured source URLs and writes the aggregated CIDR file.
//! * **[`loader`]**: builds a [`RangeSet`](uncdn_common::network::range::RangeSet) from text sources.
//! * **[`filter`]**: drops every input line carrying an address inside the set.
//! * **[`prerequisite`]**: tells the caller whether the aggregated file is there to load.

pub mod fetch;
pub mod filter;
pub mod loader;
pub mod prerequisite;
