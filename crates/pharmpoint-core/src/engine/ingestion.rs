use crate::core::models::cluster::Cluster;
use crate::core::models::feature::{Feature, FeatureError, InteractionKind, LIGAND_FEATURE_RADIUS};
use nalgebra::Point3;
use thiserror::Error;
use tracing::debug;

const DONOR_HEAVY_ELEMENT: &str = "N";
const DONOR_HYDROGEN_ELEMENT: &str = "H";
const ACCEPTOR_ELEMENT: &str = "O";

/// What is wrong with a single cluster that cannot become a feature.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterDefect {
    #[error("cluster contains no atoms")]
    Empty,
    #[error("expected {expected} atom(s), found {found}")]
    AtomCount { expected: usize, found: usize },
    #[error("atom {index} must be element '{expected}', found '{found}'")]
    Element {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error("cluster size must be positive")]
    ZeroClusterSize,
    #[error("{0} clusters cannot be ingested")]
    NotIngestible(InteractionKind),
    #[error("cluster is tagged {found} but its group declares {expected}")]
    KindMismatch {
        expected: InteractionKind,
        found: InteractionKind,
    },
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestionError {
    #[error("Malformed {kind} cluster at index {index}: {defect}")]
    MalformedCluster {
        kind: InteractionKind,
        index: usize,
        defect: ClusterDefect,
    },
}

fn expect_atom_count(cluster: &Cluster, expected: usize) -> Result<(), ClusterDefect> {
    if cluster.atoms.len() != expected {
        return Err(ClusterDefect::AtomCount {
            expected,
            found: cluster.atoms.len(),
        });
    }
    Ok(())
}

fn expect_element(
    cluster: &Cluster,
    index: usize,
    expected: &'static str,
) -> Result<Point3<f64>, ClusterDefect> {
    let atom = &cluster.atoms[index];
    if atom.element != expected {
        return Err(ClusterDefect::Element {
            index,
            expected,
            found: atom.element.clone(),
        });
    }
    Ok(atom.position)
}

/// Converts one cluster into its feature.
///
/// - Hydrophobic clusters sit at the unweighted centroid of their atoms (at least one).
/// - Donor clusters must be exactly `[N, H]`; the feature sits on the nitrogen.
/// - Acceptor clusters must be exactly `[O]`; the feature sits on the oxygen.
///
/// Every ligand feature gets radius [`LIGAND_FEATURE_RADIUS`] and starts with the cluster
/// size as its weight.
pub fn cluster_to_feature(cluster: &Cluster) -> Result<Feature, ClusterDefect> {
    if cluster.cluster_size == 0 {
        return Err(ClusterDefect::ZeroClusterSize);
    }

    let position = match cluster.kind {
        InteractionKind::Hydrophobic => cluster.centroid().ok_or(ClusterDefect::Empty)?,
        InteractionKind::Donor => {
            expect_atom_count(cluster, 2)?;
            let nitrogen = expect_element(cluster, 0, DONOR_HEAVY_ELEMENT)?;
            expect_element(cluster, 1, DONOR_HYDROGEN_ELEMENT)?;
            nitrogen
        }
        InteractionKind::Acceptor => {
            expect_atom_count(cluster, 1)?;
            expect_element(cluster, 0, ACCEPTOR_ELEMENT)?
        }
        InteractionKind::Exclusion => return Err(ClusterDefect::NotIngestible(cluster.kind)),
    };

    Ok(Feature::new(
        cluster.kind,
        position,
        LIGAND_FEATURE_RADIUS,
        f64::from(cluster.cluster_size),
    )?)
}

/// Ingests a whole group of clusters declared to be of `kind`, one feature per cluster.
///
/// Ingestion stops at the first malformed cluster.
///
/// # Errors
///
/// Returns [`IngestionError::MalformedCluster`] naming the offending cluster's index.
pub fn ingest_clusters(
    kind: InteractionKind,
    clusters: &[Cluster],
) -> Result<Vec<Feature>, IngestionError> {
    let features = clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            let result = if cluster.kind != kind {
                Err(ClusterDefect::KindMismatch {
                    expected: kind,
                    found: cluster.kind,
                })
            } else {
                cluster_to_feature(cluster)
            };
            result.map_err(|defect| IngestionError::MalformedCluster {
                kind,
                index,
                defect,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(%kind, count = features.len(), "Ingested cluster group.");
    Ok(features)
}
