//! Dataset descriptor for YOLO training tools.
//!
//! The file is a YAML mapping with `path`, `train`, `val`, `nc` and `names`,
//! where `names[i]` is the class with id `i`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PrepError;
use crate::split::Split;
use crate::vocab::ClassVocabulary;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Absolute dataset root.
    pub path: PathBuf,
    /// Training images, relative to `path`.
    pub train: String,
    /// Validation images, relative to `path`.
    pub val: String,
    /// Number of classes; always `names.len()`.
    pub nc: usize,
    pub names: Vec<String>,
}

impl DatasetManifest {
    pub fn new(output_root: impl Into<PathBuf>, vocab: &ClassVocabulary) -> Self {
        let names = vocab.names().to_vec();
        Self {
            path: output_root.into(),
            train: format!("images/{}", Split::Train),
            val: format!("images/{}", Split::Val),
            nc: names.len(),
            names,
        }
    }
}

pub fn write_manifest(path: &Path, manifest: &DatasetManifest) -> Result<(), PrepError> {
    let yaml = serde_yaml::to_string(manifest).map_err(|source| PrepError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PrepError::IoAt {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, yaml).map_err(|source| PrepError::IoAt {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_manifest(path: &Path) -> Result<DatasetManifest, PrepError> {
    let data = fs::read_to_string(path).map_err(|source| PrepError::IoAt {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&data).map_err(|source| PrepError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
