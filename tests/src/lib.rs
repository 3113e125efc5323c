//! Cross-crate tests: fetch, load and filter wired together the way the binary does it.

mod pipeline;
