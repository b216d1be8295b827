//! # Core Module
//!
//! Fundamental building blocks for pharmacophore derivation.
//!
//! ## Architecture
//!
//! - **Feature Representation** ([`models`]) - Labeled interaction points, clusters, and atom records
//! - **File I/O** ([`io`]) - Cluster SDF files, site PDB files, and session JSON output
//! - **Reference Data** ([`utils`]) - Static chemical tables such as van der Waals radii

pub mod io;
pub mod models;
pub mod utils;
