//! Board export: tabular projection and spreadsheet writing.
//!
//! # Responsibility
//! - Derive the rows × visible-weeks text table from a board snapshot.
//! - Hand that table to the `.xlsx` writer unchanged.
//!
//! # Invariants
//! - Export reads the board only; it never mutates or persists.

pub mod projector;
pub mod xlsx;
