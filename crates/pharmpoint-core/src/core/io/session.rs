use crate::core::models::feature::Feature;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SessionPoint {
    name: &'static str,
    enabled: bool,
    x: f64,
    y: f64,
    z: f64,
    radius: f64,
    weight: f64,
}

impl From<&Feature> for SessionPoint {
    fn from(feature: &Feature) -> Self {
        let position = feature.position();
        Self {
            name: feature.kind().session_name(),
            enabled: true,
            x: position.x,
            y: position.y,
            z: position.z,
            radius: feature.radius(),
            weight: feature.weight(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Session {
    points: Vec<SessionPoint>,
}

/// Writer for Pharmit / ZINCPharmer session files.
///
/// The output is a single JSON object whose `points` array lists the features in the
/// order given, each enabled.
pub struct SessionFile;

impl SessionFile {
    /// Serializes `features`, in order, to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_to(features: &[Feature], writer: &mut impl Write) -> Result<(), SessionFileError> {
        let session = Session {
            points: features.iter().map(SessionPoint::from).collect(),
        };
        serde_json::to_writer(&mut *writer, &session)?;
        writer.flush()?;
        Ok(())
    }

    /// Serializes `features` to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_to_path<P: AsRef<Path>>(
        features: &[Feature],
        path: P,
    ) -> Result<(), SessionFileError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(features, &mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::feature::InteractionKind;
    use nalgebra::Point3;
    use serde_json::Value;

    fn write_to_value(features: &[Feature]) -> Value {
        let mut buffer = Vec::new();
        SessionFile::write_to(features, &mut buffer).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn writes_points_with_session_names_and_geometry() {
        let features = vec![
            Feature::new(
                InteractionKind::Donor,
                Point3::new(1.5, -2.0, 3.25),
                1.0,
                4.0,
            )
            .unwrap(),
            Feature::with_unit_weight(InteractionKind::Exclusion, Point3::new(0.0, 0.0, 0.0), 1.7)
                .unwrap(),
        ];

        let value = write_to_value(&features);
        let points = value["points"].as_array().unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["name"], "HydrogenDonor");
        assert_eq!(points[0]["enabled"], true);
        assert_eq!(points[0]["x"], 1.5);
        assert_eq!(points[0]["y"], -2.0);
        assert_eq!(points[0]["z"], 3.25);
        assert_eq!(points[0]["radius"], 1.0);
        assert_eq!(points[0]["weight"], 4.0);
        assert_eq!(points[1]["name"], "ExclusionSphere");
        assert_eq!(points[1]["radius"], 1.7);
    }

    #[test]
    fn empty_feature_list_writes_empty_points_array() {
        let value = write_to_value(&[]);
        assert_eq!(value, serde_json::json!({ "points": [] }));
    }

    #[test]
    fn write_to_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let features = vec![
            Feature::with_unit_weight(InteractionKind::Hydrophobic, Point3::origin(), 1.0).unwrap(),
        ];

        SessionFile::write_to_path(&features, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["points"][0]["name"], "Hydrophobic");
    }
}
