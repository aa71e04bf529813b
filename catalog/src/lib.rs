//! # MorJodi Catalog Library
//!
//! Core library for the reference taxonomies used by the MorJodi admin
//! dashboard: religion, caste, sub-caste and gotra. It turns raw backend
//! payloads into one canonical node shape and computes which child options
//! are selectable as parent selections change.
//!
//! ## Modules
//!
//! - [`model`] - Canonical taxonomy nodes, levels and boundary normalization
//! - [`filter`] - Parent-scoped filtering and selection reconciliation
//! - [`preferences`] - Multi-select partner-preference filters
//! - [`cascade`] - Single-select religion → caste → sub-caste → gotra chain
//! - [`source`] - Fetch collaborators (REST backend and in-memory)
//! - [`errors`] - Error types for the fetch layer
//!
//! Filtering and cascade logic never fail; only fetching does.

pub mod cascade;
pub mod errors;
pub mod filter;
pub mod model;
pub mod preferences;
pub mod source;

pub use cascade::{CascadeDriver, FetchRequest, SingleSelectCascade};
pub use errors::CatalogError;
pub use filter::SelectionSet;
pub use model::{CasteCategory, Level, NodeId, TaxonomyNode};
pub use preferences::{PartnerPreferences, Reconciliation};
pub use source::{HttpTaxonomySource, StaticTaxonomySource, TaxonomySource};
