//! Presentation-side grid model.
//!
//! # Responsibility
//! - Rebuild dense matrices from sparse cells as a pure projection.
//! - Model client state as server snapshot plus pending local edits.
//!
//! # Invariants
//! - Nothing in this module talks to storage; the store stays authoritative.

pub mod dense;
pub mod session;
