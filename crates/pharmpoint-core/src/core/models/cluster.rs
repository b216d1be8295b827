use super::feature::InteractionKind;
use nalgebra::Point3;

/// A single atom as read from a cluster file or a site structure.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The element symbol as written in the source file (e.g., "N", "O1").
    pub element: String,
}

impl AtomRecord {
    pub fn new(x: f64, y: f64, z: f64, element: &str) -> Self {
        Self {
            position: Point3::new(x, y, z),
            element: element.to_string(),
        }
    }
}

/// An externally pre-aggregated group of atoms that becomes exactly one feature.
///
/// Clusters are short-lived: a reader produces them, ingestion consumes each into a
/// [`Feature`](super::feature::Feature), and they are dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// The interaction kind declared for the group this cluster was read from.
    pub kind: InteractionKind,
    /// The atoms of the cluster, in file order.
    pub atoms: Vec<AtomRecord>,
    /// How many source conformations support this cluster; becomes the initial feature weight.
    pub cluster_size: u32,
}

impl Cluster {
    pub fn new(kind: InteractionKind, atoms: Vec<AtomRecord>, cluster_size: u32) -> Self {
        Self {
            kind,
            atoms,
            cluster_size,
        }
    }

    /// The unweighted centroid of all atom positions, or `None` for an empty cluster.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum = self
            .atoms
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, atom| acc + atom.position.coords);
        Some(Point3::from(sum / self.atoms.len() as f64))
    }
}
