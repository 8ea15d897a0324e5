//! REST API endpoint tests

mod auth_tests;
mod chat_tests;
mod health_tests;
mod message_tests;
mod rate_limit_tests;
