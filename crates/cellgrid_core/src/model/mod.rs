//! Sparse cell domain model.
//!
//! # Responsibility
//! - Define the canonical cell record and its coordinate key.
//! - Own the coordinate validation policy applied to external input.
//!
//! # Invariants
//! - Every stored cell is identified by its `(row_id, col_id)` pair.
//! - Deletion is a hard delete; there are no tombstones.

pub mod cell;
pub mod coordinate;
pub mod request;
