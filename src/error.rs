use std::path::PathBuf;
use thiserror::Error;

/// The main error type for brahmi-prep operations.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Raw data directory not found: {0}")]
    RawDirNotFound(PathBuf),

    #[error("Failed while scanning {path}: {source}")]
    DirectoryScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("No annotation files (*.json) found in {0}")]
    NoAnnotations(PathBuf),

    #[error("Failed to parse annotations from {path}: {source}")]
    AnnotationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write class mapping to {path}: {source}")]
    ClassMappingWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse class mapping from {path}: {source}")]
    ClassMappingParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid class mapping in {path}: {message}")]
    ClassMappingInvalid { path: PathBuf, message: String },

    #[error("Failed to serialize manifest for {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse manifest from {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize run report: {source}")]
    ReportSerialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
