//! Caller-layer use cases over the stores.
//!
//! # Responsibility
//! - Validate user input before it reaches a store.
//! - Turn generative-model failures into user-visible fallback values.
//!
//! # Invariants
//! - Services never bypass store persistence contracts.
//! - No model failure propagates past this layer.

pub mod archive_service;
pub mod ledger_service;
pub mod librarian;
pub mod session;
