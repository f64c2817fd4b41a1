//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the cell store contract used by services.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Storage faults surface as `RepoError::Db` and are never retried here.
//! - Missing rows or columns read as empty collections, not errors.

pub mod cell_repo;
