//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::application::services::{MessageService, MessageServiceImpl};
use crate::config::Settings;
use crate::infrastructure::publisher::{self, MessagePublisher};
use crate::infrastructure::repositories::{InMemoryChatRepository, InMemoryMessageRepository};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{logging, RateLimiter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the in-memory stores, the configured user set and rules, and
    /// `publisher` into a fresh state.
    pub fn new(settings: Settings, publisher: Arc<dyn MessagePublisher>) -> Result<Self> {
        let rules = settings.transition_rules()?;
        let users = Arc::new(settings.user_directory());
        tracing::info!(users = settings.users.len(), "User directory loaded");

        let messages = MessageServiceImpl::new(
            Arc::new(InMemoryChatRepository::new()),
            Arc::new(InMemoryMessageRepository::new()),
            users,
            Arc::new(rules),
            publisher,
        );

        Ok(Self {
            messages: Arc::new(messages),
            rate_limiter: Arc::new(RateLimiter::from_settings(&settings.rate_limit)),
            settings: Arc::new(settings),
        })
    }
}

/// Build the full router with request tracing.
pub fn build_router(state: AppState) -> Router {
    routes::create_router(state).layer(ServiceBuilder::new().layer(logging::create_trace_layer()))
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let publisher = publisher::create_publisher(&settings.publisher).await?;
        tracing::info!(backend = ?settings.publisher.backend, "Event publisher ready");

        let addr: SocketAddr = settings.server_addr().parse()?;
        let state = AppState::new(settings, publisher)?;
        spawn_rate_limit_pruning(Arc::clone(&state.rate_limiter));

        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        let app = Self { listener, router };
        tracing::info!("Listening on {}", app.local_addr()?);

        Ok(app)
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Periodically forget clients whose rate limit window has expired.
fn spawn_rate_limit_pruning(limiter: Arc<RateLimiter>) {
    if !limiter.is_enabled() {
        return;
    }
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            limiter.prune();
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
