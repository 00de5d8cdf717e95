//! Desk Common - Shared types, utilities, and configuration for the Desk services.
//!
//! This crate provides:
//! - Configuration types and environment loading
//! - Error types and handling utilities
//! - Logging setup
//! - Utility functions used across Desk services

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use config::{Config, JiraConfig, ObservabilityConfig, ServiceConfig};
pub use error::{Error, Result};
pub use logging::init_logging;
