use crate::core::models::cluster::AtomRecord;
use crate::core::models::feature::{Feature, FeatureError, InteractionKind};
use crate::core::utils::elements::vdw_radius;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExclusionError {
    #[error("No van der Waals radius known for element '{element}' (site atom {index})")]
    UnknownElement { element: String, index: usize },
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Turns every site atom into an exclusion sphere sized by its van der Waals radius.
///
/// Exclusion features keep the default weight of 1; they are never merged or ranked.
///
/// # Errors
///
/// Returns [`ExclusionError::UnknownElement`] for the first atom whose element is not in
/// the radius table. There is no fallback radius.
pub fn extract_exclusion_features(atoms: &[AtomRecord]) -> Result<Vec<Feature>, ExclusionError> {
    let features = atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| -> Result<Feature, ExclusionError> {
            let radius =
                vdw_radius(&atom.element).ok_or_else(|| ExclusionError::UnknownElement {
                    element: atom.element.clone(),
                    index,
                })?;
            Ok(Feature::with_unit_weight(
                InteractionKind::Exclusion,
                atom.position,
                radius,
            )?)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = features.len(), "Extracted exclusion spheres.");
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn each_atom_becomes_an_exclusion_sphere_with_table_radius() {
        let atoms = vec![
            AtomRecord::new(1.0, 2.0, 3.0, "O"),
            AtomRecord::new(4.0, 5.0, 6.0, "C"),
            AtomRecord::new(7.0, 8.0, 9.0, "N1"),
        ];

        let features = extract_exclusion_features(&atoms).unwrap();

        assert_eq!(features.len(), 3);
        assert!(
            features
                .iter()
                .all(|f| f.kind() == InteractionKind::Exclusion && f.weight() == 1.0)
        );
        assert_eq!(features[0].radius(), 1.52);
        assert_eq!(features[0].position(), &Point3::new(1.0, 2.0, 3.0));
        assert_eq!(features[1].radius(), 1.70);
        assert_eq!(features[2].radius(), 1.55);
    }

    #[test]
    fn unknown_element_aborts_extraction() {
        let atoms = vec![
            AtomRecord::new(0.0, 0.0, 0.0, "C"),
            AtomRecord::new(0.0, 0.0, 0.0, "ZN"),
            AtomRecord::new(0.0, 0.0, 0.0, "XX"),
        ];
        assert_eq!(
            extract_exclusion_features(&atoms),
            Err(ExclusionError::UnknownElement {
                element: "ZN".into(),
                index: 1
            })
        );
    }

    #[test]
    fn non_finite_site_atom_aborts_extraction() {
        let atoms = vec![
            AtomRecord::new(1.0, 2.0, 3.0, "O"),
            AtomRecord::new(f64::NAN, 2.0, 3.0, "C"),
        ];
        assert!(matches!(
            extract_exclusion_features(&atoms),
            Err(ExclusionError::Feature(FeatureError::InvalidPosition { .. }))
        ));
    }

    #[test]
    fn empty_site_yields_no_spheres() {
        assert!(extract_exclusion_features(&[]).unwrap().is_empty());
    }
}
