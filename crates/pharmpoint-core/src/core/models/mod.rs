//! Data structures for pharmacophore features and the atom groupings they are derived from.
//!
//! - [`feature`] holds the [`feature::Feature`] point model together with the `distance` and
//!   weighted `merge` primitives every higher layer relies on.
//! - [`cluster`] holds the transient [`cluster::AtomRecord`] and [`cluster::Cluster`] records
//!   produced by the file readers and consumed by ingestion.

pub mod cluster;
pub mod feature;
