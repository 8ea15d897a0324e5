//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **MessageStatus**: Closed set of message delivery statuses
//! - **TransitionRules**: Injected status graph deciding which status may follow which

mod message_status;
mod transition_rules;

pub use message_status::*;
pub use transition_rules::*;
