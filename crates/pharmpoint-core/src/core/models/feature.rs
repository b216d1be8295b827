use nalgebra::Point3;
use std::fmt;
use thiserror::Error;

/// Radius assigned to every feature derived from a ligand cluster, in Angstroms.
pub const LIGAND_FEATURE_RADIUS: f64 = 1.0;

/// The interaction a pharmacophore feature stands for.
///
/// The kind of a feature is fixed at creation; only features of identical kind
/// may ever be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionKind {
    /// Hydrophobic contact, typically the centroid of an aromatic ring.
    Hydrophobic,
    /// Hydrogen-bond donor, located at the donating heavy atom.
    Donor,
    /// Hydrogen-bond acceptor, located at the accepting oxygen.
    Acceptor,
    /// Steric exclusion sphere occupied by the binding site itself.
    Exclusion,
}

impl InteractionKind {
    /// The feature name used by Pharmit / ZINCPharmer session files.
    pub fn session_name(&self) -> &'static str {
        match self {
            InteractionKind::Hydrophobic => "Hydrophobic",
            InteractionKind::Donor => "HydrogenDonor",
            InteractionKind::Acceptor => "HydrogenAcceptor",
            InteractionKind::Exclusion => "ExclusionSphere",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InteractionKind::Hydrophobic => "hydrophobic",
            InteractionKind::Donor => "donor",
            InteractionKind::Acceptor => "acceptor",
            InteractionKind::Exclusion => "exclusion",
        };
        f.pad(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Cannot merge a {left} feature with a {right} feature")]
    KindMismatch {
        left: InteractionKind,
        right: InteractionKind,
    },
    #[error("Feature radius must be positive and finite (got {0})")]
    InvalidRadius(f64),
    #[error("Feature weight must be positive and finite (got {0})")]
    InvalidWeight(f64),
    #[error("Feature position must be finite (got ({x}, {y}, {z}))")]
    InvalidPosition { x: f64, y: f64, z: f64 },
}

/// A labeled point in 3-D space: one pharmacophore feature.
///
/// Fields are private so that the invariants established by [`Feature::new`] hold for
/// the lifetime of the value: the kind never changes, the position is finite, and both
/// radius and weight stay strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    kind: InteractionKind,
    position: Point3<f64>,
    radius: f64,
    weight: f64,
}

impl Feature {
    /// Creates a feature after validating its position, radius and weight.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidPosition`] when a coordinate is NaN or infinite, and
    /// [`FeatureError::InvalidRadius`] or [`FeatureError::InvalidWeight`] when the
    /// respective value is not a positive, finite number.
    pub fn new(
        kind: InteractionKind,
        position: Point3<f64>,
        radius: f64,
        weight: f64,
    ) -> Result<Self, FeatureError> {
        if !position.coords.iter().all(|c| c.is_finite()) {
            return Err(FeatureError::InvalidPosition {
                x: position.x,
                y: position.y,
                z: position.z,
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FeatureError::InvalidRadius(radius));
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(FeatureError::InvalidWeight(weight));
        }
        Ok(Self {
            kind,
            position,
            radius,
            weight,
        })
    }

    /// Creates a feature with the default weight of 1.
    pub fn with_unit_weight(
        kind: InteractionKind,
        position: Point3<f64>,
        radius: f64,
    ) -> Result<Self, FeatureError> {
        Self::new(kind, position, radius, 1.0)
    }

    #[inline]
    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns a copy of this feature with a different radius.
    pub fn with_radius(&self, radius: f64) -> Result<Self, FeatureError> {
        Self::new(self.kind, self.position, radius, self.weight)
    }
}

/// Euclidean distance between the positions of two features, regardless of kind.
#[inline]
pub fn distance(a: &Feature, b: &Feature) -> f64 {
    nalgebra::distance(&a.position, &b.position)
}

/// Folds two features of the same kind into their weighted centroid.
///
/// Position and radius are averaged with each feature's weight; the result carries the
/// summed weight. The numeric result does not depend on argument order, which is what
/// lets the merge engine fold features in any sequence.
///
/// # Errors
///
/// Returns [`FeatureError::KindMismatch`] when the kinds differ. This is a caller bug,
/// not a recoverable condition.
pub fn merge(a: &Feature, b: &Feature) -> Result<Feature, FeatureError> {
    if a.kind != b.kind {
        return Err(FeatureError::KindMismatch {
            left: a.kind,
            right: b.kind,
        });
    }
    let total_weight = a.weight + b.weight;
    let coords = (a.position.coords * a.weight + b.position.coords * b.weight) / total_weight;
    let radius = (a.radius * a.weight + b.radius * b.weight) / total_weight;

    Ok(Feature {
        kind: a.kind,
        position: Point3::from(coords),
        radius,
        weight: total_weight,
    })
}
