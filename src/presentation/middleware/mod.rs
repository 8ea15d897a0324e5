//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod logging;
pub mod rate_limit;

pub use auth::auth_middleware;
pub use logging::{create_trace_layer, track_metrics};
pub use rate_limit::{rate_limit, RateLimitInfo, RateLimiter};
