//! Annotation records as they appear on disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{BBoxXYXY, Pixel};

/// One labelled character: `{"char": "…", "bbox": [xmin, ymin, xmax, ymax]}`.
///
/// Extra keys in the source object are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharAnnotation {
    #[serde(rename = "char")]
    pub label: String,
    pub bbox: BBoxXYXY<Pixel>,
}

impl CharAnnotation {
    pub fn new(label: impl Into<String>, bbox: BBoxXYXY<Pixel>) -> Self {
        Self {
            label: label.into(),
            bbox,
        }
    }
}

/// An annotation file together with its parsed contents.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedSample {
    /// File name of the JSON file without its extension; shared with the image.
    pub base_name: String,
    pub json_path: PathBuf,
    pub annotations: Vec<CharAnnotation>,
}
