//! # PharmPoint Core Library
//!
//! A library for deriving pharmacophore models, small sets of labeled 3-D interaction points,
//! from pre-clustered ligand geometry and a binding-site structure.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separated:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Feature`, `Cluster`, `AtomRecord`),
//!   the weighted-merge primitive, the element radius table, and file I/O for cluster files,
//!   site structures, and pharmacophore session files.
//!
//! - **[`engine`]: The Logic Core.** The algorithms that turn raw records into features:
//!   cluster ingestion, exclusion-sphere extraction, the iterative proximity merge, and the
//!   family of selection strategies, together with configuration and error types.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into complete runs,
//!   either as a pure in-memory pipeline or as a file-to-file derivation that writes a session.

pub mod core;
pub mod engine;
pub mod workflows;
