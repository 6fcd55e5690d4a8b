//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the board store persists through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories store opaque strings; document decoding and validation
//!   happen in the service layer.

pub mod kv_repo;
