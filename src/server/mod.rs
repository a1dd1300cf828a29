// Coach Server Module
// HTTP front end for the financial coach

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{create_router, health_check};

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::coach::FinancialCoach;
use crate::config::Config;
use crate::providers::LlmProvider;

/// State shared by every handler. Cloning is cheap; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    pub coach: FinancialCoach,
}

impl AppState {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            coach: FinancialCoach::new(provider),
        }
    }
}

pub struct CoachServer {
    state: AppState,
    bind_addr: SocketAddr,
    max_body_bytes: usize,
    insights_enabled: bool,
}

impl CoachServer {
    pub fn new(config: &Config, provider: Arc<dyn LlmProvider>) -> Result<Self> {
        let bind_addr = config.bind_addr().map_err(anyhow::Error::msg)?;
        Ok(Self {
            state: AppState::new(provider),
            bind_addr,
            max_body_bytes: config.server.max_body_bytes,
            insights_enabled: config.features.insights_enabled,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Full application: routes plus body limit and request tracing
    pub fn app(&self) -> Router {
        create_router(self.state.clone(), self.insights_enabled)
            .layer(DefaultBodyLimit::max(self.max_body_bytes))
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let app = self.app();

        let listener = tokio::net::TcpListener::bind(self.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.bind_addr))?;

        tracing::info!(
            addr = %self.bind_addr,
            provider = self.state.coach.provider().name(),
            insights = self.insights_enabled,
            "Financial coach listening"
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}
