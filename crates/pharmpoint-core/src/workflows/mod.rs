//! # Workflows Module
//!
//! Top-level entry points that run a complete derivation.
//!
//! - **Derivation Workflow** ([`derive`]) - The in-memory pipeline
//!   ([`derive::derive_pharmacophore`]) from cluster groups and site atoms to ranked ligand
//!   features plus exclusion spheres, and the file-to-file wrapper ([`derive::run`]) that reads
//!   the inputs named in a [`PipelineConfig`](crate::engine::config::PipelineConfig), optionally
//!   applies a selection strategy, and writes a session file.

pub mod derive;
