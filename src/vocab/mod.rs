//! Annotation discovery and the character class vocabulary.
//!
//! The vocabulary is the sorted set of every `char` value seen across all
//! annotation files. Sorting is what makes ids reproducible: the same set of
//! labels always yields the same `label -> id` table, whatever order the
//! files were read in.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, Serializer};
use walkdir::WalkDir;

use crate::error::PrepError;
use crate::model::{AnnotatedSample, CharAnnotation, ClassId};

const ANNOTATION_EXTENSION: &str = "json";

/// Bijective `label <-> id` mapping with ids dense in `[0, len)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassVocabulary {
    names: Vec<String>,
    ids: BTreeMap<String, ClassId>,
}

impl ClassVocabulary {
    /// Builds a vocabulary from labels, deduplicating and assigning ids in
    /// sorted label order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        Self::from_unique_names(unique.into_iter().collect())
    }

    /// Builds the vocabulary from every annotation of every sample.
    pub fn from_samples(samples: &[AnnotatedSample]) -> Self {
        Self::from_labels(
            samples
                .iter()
                .flat_map(|sample| sample.annotations.iter())
                .map(|ann| ann.label.as_str()),
        )
    }

    fn from_unique_names(names: Vec<String>) -> Self {
        let ids = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), ClassId::new(idx)))
            .collect();
        Self { names, ids }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn id_of(&self, label: &str) -> Option<ClassId> {
        self.ids.get(label).copied()
    }

    pub fn name_of(&self, id: ClassId) -> Option<&str> {
        self.names.get(id.as_usize()).map(String::as_str)
    }

    /// Class names ordered by ascending id.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (ClassId::new(idx), name.as_str()))
    }
}

// Serialized as a JSON object `label -> id`, keys in id order.
impl Serialize for ClassVocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(id, name)| (name, id.as_usize())))
    }
}

/// Lists the `*.json` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched.
pub fn discover_annotation_files(dir: &Path) -> Result<Vec<PathBuf>, PrepError> {
    if !dir.is_dir() {
        return Err(PrepError::RawDirNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| PrepError::DirectoryScan {
            path: dir.to_path_buf(),
            source,
        })?;

        let is_annotation = entry.path().extension().and_then(|ext| ext.to_str())
            == Some(ANNOTATION_EXTENSION);
        if entry.file_type().is_file() && is_annotation {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Parses an annotation array from raw bytes.
pub fn parse_annotations(bytes: &[u8]) -> Result<Vec<CharAnnotation>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Reads one annotation file. Any parse failure is fatal for the run.
pub fn read_annotation_file(path: &Path) -> Result<Vec<CharAnnotation>, PrepError> {
    let file = fs::File::open(path).map_err(|source| PrepError::IoAt {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| PrepError::AnnotationParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Discovers and parses every annotation file in `dir`.
pub fn load_samples(dir: &Path) -> Result<Vec<AnnotatedSample>, PrepError> {
    discover_annotation_files(dir)?
        .into_iter()
        .map(|json_path| {
            let annotations = read_annotation_file(&json_path)?;
            let base_name = json_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(AnnotatedSample {
                base_name,
                json_path,
                annotations,
            })
        })
        .collect()
}

/// Writes the vocabulary as pretty-printed UTF-8 JSON.
///
/// Non-ASCII labels are written verbatim, not `\u`-escaped.
pub fn write_class_mapping(path: &Path, vocab: &ClassVocabulary) -> Result<(), PrepError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PrepError::IoAt {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = fs::File::create(path).map_err(|source| PrepError::IoAt {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, vocab).map_err(|source| {
        PrepError::ClassMappingWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(|source| PrepError::IoAt {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a mapping written by [`write_class_mapping`].
///
/// The ids must be exactly `0..N` with no gaps or repeats.
pub fn read_class_mapping(path: &Path) -> Result<ClassVocabulary, PrepError> {
    let data = fs::read(path).map_err(|source| PrepError::IoAt {
        path: path.to_path_buf(),
        source,
    })?;
    class_mapping_from_slice(&data, path)
}

/// Fuzz-only entrypoint for class mapping parsing and id validation.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_class_mapping(data: &[u8]) -> Result<(), PrepError> {
    let _ = class_mapping_from_slice(data, Path::new("<fuzz>"))?;
    Ok(())
}

fn class_mapping_from_slice(data: &[u8], path: &Path) -> Result<ClassVocabulary, PrepError> {
    let raw: BTreeMap<String, usize> =
        serde_json::from_slice(data).map_err(|source| PrepError::ClassMappingParse {
            path: path.to_path_buf(),
            source,
        })?;

    let class_count = raw.len();
    let mut names: Vec<Option<String>> = vec![None; class_count];
    for (name, id) in raw {
        let invalid = |message: String| PrepError::ClassMappingInvalid {
            path: path.to_path_buf(),
            message,
        };
        let slot = names.get_mut(id).ok_or_else(|| {
            invalid(format!(
                "id {id} for '{name}' is out of range for {class_count} class(es)"
            ))
        })?;
        if let Some(existing) = slot {
            return Err(invalid(format!(
                "id {id} is assigned to both '{existing}' and '{name}'"
            )));
        }
        *slot = Some(name);
    }

    // Every slot is filled: N distinct in-range ids over N slots.
    Ok(ClassVocabulary::from_unique_names(
        names.into_iter().flatten().collect(),
    ))
}
