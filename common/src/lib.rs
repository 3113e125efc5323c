//! Shared types for `uncdn`: run configuration, network ranges, token extraction and errors.

pub mod config;
pub mod error;
pub mod network;
