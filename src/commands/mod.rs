//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - start: Start the API server
//! - test: Test configuration and store connectivity
//! - config: Show or validate the effective configuration
//! - summary: Print a summary of the observation dataset

pub mod config;
pub mod start;
pub mod summary;
