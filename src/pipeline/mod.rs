//! The end-to-end preparation run.
//!
//! Stages run strictly in order: vocabulary, split, per-sample conversion and
//! copy, manifest. Reproducibility depends only on the sorted vocabulary and
//! the seeded split, never on the order samples are processed in.

mod report;

pub use report::{PrepReport, SkipEvent, SplitCounts};

use std::collections::BTreeMap;
use std::fs;

use log::info;

use crate::config::PrepConfig;
use crate::error::PrepError;
use crate::manifest::{write_manifest, DatasetManifest};
use crate::materialize::{materialize_sample, OutputLayout, SampleOutcome};
use crate::model::AnnotatedSample;
use crate::split::{split_samples, Split};
use crate::vocab::{load_samples, write_class_mapping, ClassVocabulary};

/// Runs every stage for `config` and returns a summary.
///
/// Fatal problems (bad configuration, unreadable or malformed annotation
/// files, an empty input directory, write failures) abort the run. Samples
/// without a usable image are skipped and recorded in the report.
pub fn run_pipeline(config: &PrepConfig) -> Result<PrepReport, PrepError> {
    config.validate()?;

    info!("Building class vocabulary...");
    let samples = load_samples(&config.raw_dir)?;
    if samples.is_empty() {
        return Err(PrepError::NoAnnotations(config.raw_dir.clone()));
    }
    let vocab = ClassVocabulary::from_samples(&samples);
    info!("Found {} unique characters.", vocab.len());
    write_class_mapping(&config.mapping_path, &vocab)?;

    let layout = OutputLayout::create(&config.output_dir)?;

    let assignment = split_samples(
        samples.iter().map(|s| s.base_name.as_str()),
        config.val_fraction,
        config.seed,
    );

    let mut report = PrepReport {
        annotation_files: samples.len(),
        classes: vocab.len(),
        assigned: SplitCounts {
            train: assignment.train.len(),
            val: assignment.val.len(),
        },
        mapping_path: config.mapping_path.clone(),
        manifest_path: config.manifest_path.clone(),
        ..Default::default()
    };

    info!("Converting and moving files...");
    let by_name: BTreeMap<&str, &AnnotatedSample> = samples
        .iter()
        .map(|s| (s.base_name.as_str(), s))
        .collect();

    for split in Split::ALL {
        for name in assignment.names(split) {
            let Some(sample) = by_name.get(name.as_str()) else {
                continue;
            };

            match materialize_sample(
                sample,
                split,
                &config.raw_dir,
                &config.image_extensions,
                &layout,
                &vocab,
                config.box_policy,
            )? {
                SampleOutcome::Written {
                    label_count,
                    dropped_unknown,
                    dropped_invalid,
                    ..
                } => {
                    report.written.bump(split);
                    report.labels_written += label_count;
                    report.dropped_unknown += dropped_unknown;
                    report.dropped_invalid += dropped_invalid;
                }
                SampleOutcome::Skipped(reason) => {
                    report.record_skip(name.as_str(), split, reason);
                }
            }
        }
    }

    let output_root = fs::canonicalize(layout.root()).map_err(|source| PrepError::IoAt {
        path: layout.root().to_path_buf(),
        source,
    })?;
    write_manifest(
        &config.manifest_path,
        &DatasetManifest::new(&output_root, &vocab),
    )?;
    report.output_root = output_root;

    info!(
        "Data preparation complete. '{}' created.",
        config.manifest_path.display()
    );
    Ok(report)
}
