//! View-layer query functions over in-memory collections.
//!
//! # Invariants
//! - Every function is pure: inputs are borrowed, outputs are new `Vec`s.
//! - Sorting is stable; equal keys keep input order in both directions.
//! - Empty input yields empty output.

pub mod filter;
pub mod sort;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returned when a selector string names no known option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectorError {
    pub kind: &'static str,
    pub value: String,
}

impl Display for ParseSelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for ParseSelectorError {}
