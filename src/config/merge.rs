//! Merge layer: built-in defaults applied before any file or environment source.

pub mod merge_policy;
