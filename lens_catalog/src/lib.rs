//! # Lens Catalog
//!
//! The "Codex" crate - static reference data for the lens engine.
//! Sovereignty records, the knowledge base loader, built-in lens identifiers,
//! archetypal bases and named lens patterns live here. This crate holds no
//! session state and performs no narrative generation.

pub mod archetypes;
pub mod error;
pub mod knowledge;
pub mod lenses;
pub mod sovereignty;

pub use archetypes::*;
pub use error::*;
pub use knowledge::*;
pub use lenses::*;
pub use sovereignty::*;
