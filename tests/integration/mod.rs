//! Integration tests for the RPM lesson plan generator

mod binary_runs;
mod cli_commands;
mod config_integration;
mod generation;
mod render_document;
mod service_client;
