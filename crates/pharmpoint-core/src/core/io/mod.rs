//! Provides input/output functionality for the file formats around a pharmacophore run.
//!
//! Readers implement the [`traits::RecordFile`] interface: the cluster SDF reader yields
//! [`Cluster`](crate::core::models::cluster::Cluster) records, the site PDB reader yields
//! [`AtomRecord`](crate::core::models::cluster::AtomRecord)s. The session writer serializes
//! features into the JSON format understood by Pharmit-style search tools.

pub mod pdb;
pub mod sdf;
pub mod session;
pub mod traits;
