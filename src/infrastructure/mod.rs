//! Infrastructure Layer
//!
//! Contains implementations for external concerns including:
//! - In-memory repositories and the configured user directory
//! - Event publishers (Redis pub/sub, log)
//! - Prometheus metrics

pub mod metrics;
pub mod publisher;
pub mod repositories;
