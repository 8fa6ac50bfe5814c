//! brahmi-prep: character annotations to a YOLO training dataset.
//!
//! Reads a flat directory of `<base>.json` annotation arrays
//! (`[{"char": "…", "bbox": [xmin, ymin, xmax, ymax]}, …]`) and their images,
//! and produces:
//!
//! - `class_mapping.json`, the sorted `char -> id` vocabulary;
//! - `images/{train,val}` and `labels/{train,val}` under the output root;
//! - `brahmi_config.yaml`, the dataset manifest.
//!
//! # Modules
//!
//! - [`model`]: boxes, class ids and annotation records
//! - [`vocab`]: annotation discovery and the class vocabulary
//! - [`split`]: seeded train/validation split
//! - [`convert`]: pixel boxes to normalized label lines
//! - [`materialize`]: output tree and per-sample writes
//! - [`manifest`]: dataset descriptor
//! - [`pipeline`]: the full run and its report
//! - [`config`], [`error`]: configuration and error types

pub mod config;
pub mod convert;
pub mod error;
pub mod manifest;
pub mod materialize;
pub mod model;
pub mod pipeline;
pub mod split;
pub mod vocab;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use config::{BoxPolicy, PrepConfig};
pub use error::PrepError;
pub use pipeline::{run_pipeline, PrepReport};

/// Prepare a YOLO training dataset from per-image character annotations.
#[derive(Parser)]
#[command(name = "brahmi-prep")]
#[command(version, about)]
struct Cli {
    /// Directory containing <base>.json annotation files and their images.
    #[arg(long, env = "BRAHMI_RAW_DIR")]
    raw_dir: PathBuf,

    /// Root of the generated images/ and labels/ trees.
    #[arg(long, env = "BRAHMI_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Accepted image extensions, in lookup priority order.
    #[arg(
        long = "ext",
        env = "BRAHMI_IMAGE_EXTENSIONS",
        value_delimiter = ',',
        default_value = "png"
    )]
    extensions: Vec<String>,

    /// Fraction of samples assigned to the validation split.
    #[arg(long, env = "BRAHMI_VAL_SIZE", default_value_t = config::DEFAULT_VAL_FRACTION, value_parser = config::validate_size)]
    val_size: f64,

    /// Seed for the train/validation shuffle.
    #[arg(long, env = "BRAHMI_SEED", default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Where to write the class mapping.
    #[arg(long = "mapping", env = "BRAHMI_MAPPING_PATH", default_value = config::DEFAULT_MAPPING_FILE)]
    mapping_path: PathBuf,

    /// Where to write the dataset manifest.
    #[arg(long = "manifest", env = "BRAHMI_MANIFEST_PATH", default_value = config::DEFAULT_MANIFEST_FILE)]
    manifest_path: PathBuf,

    /// Handling of inverted, non-finite or out-of-image boxes.
    #[arg(long, env = "BRAHMI_BOX_POLICY", value_enum, default_value = "pass-through")]
    box_policy: BoxPolicy,

    /// Format of the summary printed on success.
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    fn to_config(&self) -> PrepConfig {
        let mut config = PrepConfig::new(&self.raw_dir, &self.output_dir)
            .with_image_extensions(&self.extensions);
        config.val_fraction = self.val_size;
        config.seed = self.seed;
        config.mapping_path = self.mapping_path.clone();
        config.manifest_path = self.manifest_path.clone();
        config.box_policy = self.box_policy;
        config
    }
}

/// Run the brahmi-prep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PrepError> {
    let cli = Cli::parse();
    let report = run_pipeline(&cli.to_config())?;
    print!("{}", render_report(&report, cli.report)?);
    Ok(())
}

fn render_report(report: &PrepReport, format: ReportFormat) -> Result<String, PrepError> {
    match format {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|source| PrepError::ReportSerialize { source })?;
            Ok(format!("{json}\n"))
        }
        ReportFormat::Text => Ok(report.to_string()),
    }
}
