//! Output tree creation and per-sample file writing.
//!
//! Layout under the output root:
//!
//! ```text
//! images/train/<image file>   labels/train/<base>.txt
//! images/val/<image file>     labels/val/<base>.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageReader;
use log::{debug, warn};
use serde::Serialize;

use crate::config::BoxPolicy;
use crate::convert::{convert_annotations, render_label_file};
use crate::error::PrepError;
use crate::model::AnnotatedSample;
use crate::split::Split;
use crate::vocab::ClassVocabulary;

const LABEL_EXTENSION: &str = "txt";

/// Paths of the four split directories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates `images/{train,val}` and `labels/{train,val}`.
    ///
    /// Existing directories and their contents are left alone.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, PrepError> {
        let layout = Self::new(root);
        for split in Split::ALL {
            for dir in [layout.images_dir(split), layout.labels_dir(split)] {
                fs::create_dir_all(&dir)
                    .map_err(|source| PrepError::IoAt { path: dir, source })?;
            }
        }
        Ok(layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self, split: Split) -> PathBuf {
        self.root.join("images").join(split.as_str())
    }

    pub fn labels_dir(&self, split: Split) -> PathBuf {
        self.root.join("labels").join(split.as_str())
    }

    pub fn label_path(&self, split: Split, base_name: &str) -> PathBuf {
        self.labels_dir(split)
            .join(format!("{base_name}.{LABEL_EXTENSION}"))
    }
}

/// Why a sample produced no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// No `<base>.<ext>` exists for any accepted extension.
    MissingImage,
    /// An image file exists but its size could not be read from it.
    UndecodableImage,
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::MissingImage => "missing-image",
            SkipReason::UndecodableImage => "undecodable-image",
        }
    }
}

/// What happened to one sample.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleOutcome {
    Written {
        image_path: PathBuf,
        label_path: PathBuf,
        label_count: usize,
        dropped_unknown: usize,
        dropped_invalid: usize,
    },
    Skipped(SkipReason),
}

/// Finds `<raw_dir>/<base_name>.<ext>`, trying `extensions` in order.
///
/// The first existing file wins, so list order is the tie-break when a base
/// name has images in several formats.
pub fn resolve_image(raw_dir: &Path, base_name: &str, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| raw_dir.join(format!("{base_name}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// Decodes the image and returns its `(width, height)`.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. Returns `None` for unknown formats, headers that do not parse,
/// pixel data that fails to decode and zero-sized images; callers treat all
/// of these as "cannot decode".
pub fn read_image_dimensions(path: &Path) -> Option<(u32, u32)> {
    let image = ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .decode()
        .ok()?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

/// Converts one sample and writes its label file and image copy.
///
/// A missing image is logged at warn level; an undecodable one only at debug
/// level. Neither writes anything. I/O failures while writing are fatal.
pub fn materialize_sample(
    sample: &AnnotatedSample,
    split: Split,
    raw_dir: &Path,
    extensions: &[String],
    layout: &OutputLayout,
    vocab: &ClassVocabulary,
    policy: BoxPolicy,
) -> Result<SampleOutcome, PrepError> {
    let Some(image_path) = resolve_image(raw_dir, &sample.base_name, extensions) else {
        warn!("Image for {} not found. Skipping.", sample.base_name);
        return Ok(SampleOutcome::Skipped(SkipReason::MissingImage));
    };

    let Some((width, height)) = read_image_dimensions(&image_path) else {
        debug!("Could not decode image {}", image_path.display());
        return Ok(SampleOutcome::Skipped(SkipReason::UndecodableImage));
    };

    let converted = convert_annotations(&sample.annotations, vocab, width, height, policy);

    let label_path = layout.label_path(split, &sample.base_name);
    fs::write(&label_path, render_label_file(&converted.lines)).map_err(|source| {
        PrepError::IoAt {
            path: label_path.clone(),
            source,
        }
    })?;

    let image_out = layout
        .images_dir(split)
        .join(image_path.file_name().unwrap_or_default());
    fs::copy(&image_path, &image_out).map_err(|source| PrepError::IoAt {
        path: image_out.clone(),
        source,
    })?;

    Ok(SampleOutcome::Written {
        image_path: image_out,
        label_path,
        label_count: converted.lines.len(),
        dropped_unknown: converted.dropped_unknown,
        dropped_invalid: converted.dropped_invalid,
    })
}
