//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local store used without a database
//! - **completion**: HTTP client for the chat completions API
//! - **crypto**: Argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod completion;
pub mod crypto;
pub mod memory;
pub mod persistence;
