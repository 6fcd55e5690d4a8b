//! Board state model.
//!
//! # Responsibility
//! - Define the persisted entity graph: board, experiments, weeks, cells, tasks.
//! - Provide the pure week generator, style cascade and mutation operations.
//!
//! # Invariants
//! - The board is a plain value; mutations consume it and return a successor.
//! - Derived reads (progress, effective style) are computed, never stored.

pub mod board;
pub mod ops;
pub mod seed;
pub mod style;
pub mod task;
pub mod theme;
pub mod week;
