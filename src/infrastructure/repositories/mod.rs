//! Repository Implementations
//!
//! In-memory implementations of the domain repository traits.
//!
//! Each store guards its map with a single reader/writer lock: lookups and
//! scans share it, creates and status updates take it exclusively. Entities
//! are copied in on write and copied out on read.
//!
//! ## Available Repositories
//!
//! - **InMemoryChatRepository** - Chat creation and lookup
//! - **InMemoryMessageRepository** - Message creation, lookup and status updates
//! - **StaticUserDirectory** - The configured user set
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chat_messaging::infrastructure::repositories::{
//!     InMemoryChatRepository, InMemoryMessageRepository, StaticUserDirectory,
//! };
//!
//! let chat_repo = Arc::new(InMemoryChatRepository::new());
//! let message_repo = Arc::new(InMemoryMessageRepository::new());
//! let users = Arc::new(StaticUserDirectory::new(settings.users()));
//! ```

mod table;

pub mod chat_repository;
pub mod message_repository;
pub mod user_directory;

pub use chat_repository::InMemoryChatRepository;
pub use message_repository::InMemoryMessageRepository;
pub use user_directory::StaticUserDirectory;
