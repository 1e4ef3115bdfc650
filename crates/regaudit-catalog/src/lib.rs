//! Regulation catalog: regulators and their requirements.
//!
//! The catalog is plain data. It is built once (usually [`RegulationCatalog::standard`])
//! and passed by reference to the audit runner; nothing here is mutated after construction.

#![forbid(unsafe_code)]

mod builder;
mod model;
mod standard;

pub use builder::{CatalogBuilder, CatalogError};
pub use model::{RegulationCatalog, RegulatorSection, Requirement};
