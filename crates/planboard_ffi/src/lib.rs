//! Flutter bridge for the planning board core.

pub mod api;
