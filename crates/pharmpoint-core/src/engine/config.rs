use super::merge::{DEFAULT_MERGE_THRESHOLD, validate_threshold};
use super::strategy::SelectionConfig;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Paths to the three ligand cluster files, one per ligand interaction kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSources {
    pub rings: PathBuf,
    pub donors: PathBuf,
    pub acceptors: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub clusters: ClusterSources,
    pub site_path: PathBuf,
    pub output_path: PathBuf,
    pub merge_threshold: f64,
    /// Optional reduction of the ranked ligand features; `None` keeps all of them.
    pub selection: Option<SelectionConfig>,
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    rings_path: Option<PathBuf>,
    donors_path: Option<PathBuf>,
    acceptors_path: Option<PathBuf>,
    site_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    merge_threshold: Option<f64>,
    selection: Option<SelectionConfig>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rings_path(mut self, path: PathBuf) -> Self {
        self.rings_path = Some(path);
        self
    }
    pub fn donors_path(mut self, path: PathBuf) -> Self {
        self.donors_path = Some(path);
        self
    }
    pub fn acceptors_path(mut self, path: PathBuf) -> Self {
        self.acceptors_path = Some(path);
        self
    }
    pub fn site_path(mut self, path: PathBuf) -> Self {
        self.site_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = Some(threshold);
        self
    }
    pub fn selection(mut self, selection: Option<SelectionConfig>) -> Self {
        self.selection = selection;
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let clusters = ClusterSources {
            rings: self
                .rings_path
                .ok_or(ConfigError::MissingParameter("rings_path"))?,
            donors: self
                .donors_path
                .ok_or(ConfigError::MissingParameter("donors_path"))?,
            acceptors: self
                .acceptors_path
                .ok_or(ConfigError::MissingParameter("acceptors_path"))?,
        };

        let merge_threshold = self.merge_threshold.unwrap_or(DEFAULT_MERGE_THRESHOLD);
        validate_threshold(merge_threshold).map_err(|e| ConfigError::InvalidParameter {
            name: "merge_threshold",
            reason: e.to_string(),
        })?;

        if let Some(selection) = &self.selection {
            selection.build(merge_threshold)?;
        }

        Ok(PipelineConfig {
            clusters,
            site_path: self
                .site_path
                .ok_or(ConfigError::MissingParameter("site_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            merge_threshold,
            selection: self.selection,
        })
    }
}
