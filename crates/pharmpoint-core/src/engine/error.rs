use thiserror::Error;

use super::config::ConfigError;
use super::exclusion::ExclusionError;
use super::ingestion::IngestionError;
use super::merge::MergeError;
use crate::core::io::pdb::SiteFileError;
use crate::core::io::sdf::ClusterFileError;
use crate::core::io::session::SessionFileError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cluster ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Exclusion extraction failed: {0}")]
    Exclusion(#[from] ExclusionError),

    #[error("Proximity merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("Failed to read cluster file '{path}': {source}")]
    ClusterFile {
        path: String,
        source: ClusterFileError,
    },

    #[error("Failed to read site structure '{path}': {source}")]
    SiteFile { path: String, source: SiteFileError },

    #[error("Failed to write session file '{path}': {source}")]
    SessionFile {
        path: String,
        source: SessionFileError,
    },
}
