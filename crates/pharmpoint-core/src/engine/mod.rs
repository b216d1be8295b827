//! # Engine Module
//!
//! The algorithms that turn parsed records into pharmacophore features.
//!
//! ## Architecture
//!
//! - **Ingestion** ([`ingestion`]) - Validates ligand clusters and converts each to one feature
//! - **Exclusion** ([`exclusion`]) - Turns binding-site atoms into van der Waals exclusion spheres
//! - **Merging** ([`merge`]) - Iterative same-kind proximity merge run to a fixpoint
//! - **Selection** ([`strategy`]) - Pluggable policies bounding how many features survive
//! - **Configuration** ([`config`]) - Pipeline parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - Event callbacks for front ends
//! - **Error Handling** ([`error`]) - The aggregate error type of a pipeline run
//!
//! Everything here is synchronous and deterministic: the same input in the same order always
//! yields the same features in the same order.

pub mod config;
pub mod error;
pub mod exclusion;
pub mod ingestion;
pub mod merge;
pub mod progress;
pub mod strategy;
