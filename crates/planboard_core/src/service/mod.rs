//! Core use-case services.
//!
//! # Responsibility
//! - Persist and restore the board through repository slots.
//! - Own the live board and route mutations through one update path.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_session;
pub mod board_store;
