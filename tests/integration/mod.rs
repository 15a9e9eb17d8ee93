//! Integration tests for kz

mod binary_cli;
mod config_integration;
mod test_utils;
mod tracked_cli;
