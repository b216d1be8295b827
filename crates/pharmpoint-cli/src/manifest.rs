use crate::config::InputPaths;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct TargetEntry {
    name: String,
    rings: String,
    donors: String,
    acceptors: String,
    site: String,
    output: String,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(rename = "target", default)]
    targets: Vec<TargetEntry>,
}

/// One named derivation of a batch run.
#[derive(Debug, Clone)]
pub struct BatchTarget {
    pub name: String,
    pub paths: InputPaths,
}

/// The targets of a batch run, with every path resolved.
#[derive(Debug, Clone)]
pub struct BatchManifest {
    pub targets: Vec<BatchTarget>,
}

impl BatchManifest {
    /// Loads a manifest. Relative paths inside it are taken relative to the manifest's own
    /// directory, so a manifest and its inputs can be moved together.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading batch manifest from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let file: ManifestFile = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_entries(file.targets, base_dir)
    }

    fn from_entries(entries: Vec<TargetEntry>, base_dir: &Path) -> Result<Self> {
        if entries.is_empty() {
            return Err(CliError::Config(
                "Batch manifest must list at least one [[target]].".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CliError::Config(format!(
                    "Duplicate target name in batch manifest: '{}'",
                    entry.name
                )));
            }
        }

        let mut outputs = HashSet::new();
        let targets = entries
            .into_iter()
            .map(|entry| {
                let paths = InputPaths {
                    rings: base_dir.join(&entry.rings),
                    donors: base_dir.join(&entry.donors),
                    acceptors: base_dir.join(&entry.acceptors),
                    site: base_dir.join(&entry.site),
                    output: base_dir.join(&entry.output),
                };
                if !outputs.insert(paths.output.clone()) {
                    return Err(CliError::Config(format!(
                        "Target '{}' writes to an output already claimed by another target: {}",
                        entry.name,
                        paths.output.display()
                    )));
                }
                Ok(BatchTarget {
                    name: entry.name,
                    paths,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { targets })
    }
}
