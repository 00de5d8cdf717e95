//! Desk Action - Action-group handler service for the Desk ecosystem.
//!
//! This crate provides:
//! - The invocation event model and parameter normalization
//! - Create-vs-fetch intent resolution
//! - The fixed response envelope the agent runtime parses
//! - The handler entry point and HTTP serving surface

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod envelope;
pub mod event;
pub mod handler;
pub mod intent;
pub mod routes;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use desk_common::config::Config;
use desk_jira::JiraClient;

pub use envelope::{build_envelope, ResponseEnvelope};
pub use event::{collect_parameters, InvocationEvent};
pub use handler::handle_invocation;
pub use intent::{resolve_intent, TicketIntent};
pub use routes::{build_router, create_state, ActionState};

// ============================================================================
// Action Service
// ============================================================================

/// Action service that runs the HTTP server for agent tool invocations.
pub struct ActionService {
    config: Config,
}

impl ActionService {
    /// Create a new action service.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the action router with all routes.
    pub fn build_router(&self) -> Result<Router> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let jira =
            JiraClient::from_config(&self.config.jira).context("Failed to create Jira client")?;
        let state = create_state(jira);

        Ok(build_router(state).layer(cors))
    }

    /// Start the action service.
    pub async fn start(&self) -> Result<()> {
        tracing::info!("Starting Desk Action service");

        let router = self.build_router()?;

        let addr: SocketAddr = format!(
            "{}:{}",
            self.config.service.bind, self.config.service.port
        )
        .parse()
        .context("Invalid bind address")?;

        tracing::info!("Starting Desk Action HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
