//! Outreach: batched generation of personalized outreach messages
//!
//! Records describing recipients are rendered into prompts and sent to a remote
//! text-generation API. A batch runs in sequential chunks with a bounded worker pool;
//! every job retries a fixed number of times and always ends with exactly one result.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod input;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod provider;
