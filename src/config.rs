//! Pipeline configuration.

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::PrepError;

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png"];
pub const DEFAULT_VAL_FRACTION: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MAPPING_FILE: &str = "class_mapping.json";
pub const DEFAULT_MANIFEST_FILE: &str = "brahmi_config.yaml";

/// What the label converter does with boxes that are not well formed.
///
/// A box is "not well formed" when a coordinate is non-finite, `max < min` on
/// either axis, or any corner lies outside the image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BoxPolicy {
    /// Convert every box as-is; normalized values may leave `[0, 1]`.
    #[default]
    PassThrough,
    /// Clip corners to the image before converting.
    Clamp,
    /// Drop the annotation.
    Drop,
}

/// Everything the pipeline needs to know, passed explicitly to
/// [`run_pipeline`](crate::pipeline::run_pipeline).
#[derive(Clone, Debug)]
pub struct PrepConfig {
    /// Flat directory holding `<base>.json` and `<base>.<ext>` pairs.
    pub raw_dir: PathBuf,
    /// Root of the generated `images/` and `labels/` trees.
    pub output_dir: PathBuf,
    /// Accepted image extensions, without the dot, in lookup priority order.
    pub image_extensions: Vec<String>,
    pub val_fraction: f64,
    pub seed: u64,
    pub mapping_path: PathBuf,
    pub manifest_path: PathBuf,
    pub box_policy: BoxPolicy,
}

impl PrepConfig {
    pub fn new(raw_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            output_dir: output_dir.into(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            val_fraction: DEFAULT_VAL_FRACTION,
            seed: DEFAULT_SEED,
            mapping_path: PathBuf::from(DEFAULT_MAPPING_FILE),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_FILE),
            box_policy: BoxPolicy::default(),
        }
    }

    /// Replaces the extension list, stripping any leading dots.
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.image_extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), PrepError> {
        if !(0.0..=1.0).contains(&self.val_fraction) {
            return Err(PrepError::InvalidConfig {
                message: format!(
                    "validation fraction must be between 0.0 and 1.0, got {}",
                    self.val_fraction
                ),
            });
        }

        if self.image_extensions.is_empty() {
            return Err(PrepError::InvalidConfig {
                message: "at least one image extension is required".to_string(),
            });
        }

        if let Some(bad) = self
            .image_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains(['/', '\\']))
        {
            return Err(PrepError::InvalidConfig {
                message: format!("invalid image extension '{bad}'"),
            });
        }

        Ok(())
    }
}

/// `".png"` and `"png"` name the same extension.
pub fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_string()
}

/// clap value parser for the validation fraction.
pub fn validate_size(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}
