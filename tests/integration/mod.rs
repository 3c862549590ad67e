//! Integration tests for the outreach generation engine

mod batch_pipeline;
mod batch_properties;
mod cli_parse;
mod config_integration;
mod input_files;
mod test_utils;
