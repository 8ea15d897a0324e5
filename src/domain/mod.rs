//! # Domain Layer
//!
//! The domain layer contains the core business logic of the messaging backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Chat, Message, Attachment, User) and
//!   the repository / lookup traits they are stored behind
//! - **value_objects**: Immutable value types (MessageStatus, TransitionRules)
//! - **error**: Invariant violations and repository failures
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Entities validate their own invariants at construction
//! - Status changes are pure value transforms; storage decides what to keep
//! - Repository traits define data access contracts

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use error::{DomainError, RepositoryError};
pub use value_objects::*;
