//! Run summary for a dataset preparation.
//!
//! Both skip kinds land here with a reason code, even though only a missing
//! image is announced in the log at warn level.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::materialize::SkipReason;
use crate::split::Split;

/// Per-split sample counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SplitCounts {
    pub train: usize,
    pub val: usize,
}

impl SplitCounts {
    pub fn get(&self, split: Split) -> usize {
        match split {
            Split::Train => self.train,
            Split::Val => self.val,
        }
    }

    pub fn bump(&mut self, split: Split) {
        match split {
            Split::Train => self.train += 1,
            Split::Val => self.val += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.val
    }
}

/// A sample that produced no output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkipEvent {
    pub base_name: String,
    pub split: Split,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PrepReport {
    pub annotation_files: usize,
    pub classes: usize,
    /// Samples assigned to each split by the splitter.
    pub assigned: SplitCounts,
    /// Samples whose label file and image were written.
    pub written: SplitCounts,
    pub labels_written: usize,
    /// Annotations whose label was not in the vocabulary.
    pub dropped_unknown: usize,
    /// Annotations removed by the `drop` box policy.
    pub dropped_invalid: usize,
    pub skipped: Vec<SkipEvent>,
    pub output_root: PathBuf,
    pub mapping_path: PathBuf,
    pub manifest_path: PathBuf,
}

impl PrepReport {
    pub fn record_skip(&mut self, base_name: impl Into<String>, split: Split, reason: SkipReason) {
        self.skipped.push(SkipEvent {
            base_name: base_name.into(),
            split,
            reason,
        });
    }

    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}

impl fmt::Display for PrepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Prepared {} annotation file(s), {} class(es)",
            self.annotation_files, self.classes
        )?;
        for split in Split::ALL {
            writeln!(
                f,
                "  {}: {} written of {} assigned",
                split,
                self.written.get(split),
                self.assigned.get(split)
            )?;
        }
        writeln!(f, "  label lines: {}", self.labels_written)?;

        if self.dropped_unknown > 0 || self.dropped_invalid > 0 {
            writeln!(
                f,
                "  dropped annotations: {} unknown label, {} invalid box",
                self.dropped_unknown, self.dropped_invalid
            )?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped ({}):", self.skipped.len())?;
            for event in &self.skipped {
                writeln!(
                    f,
                    "  - {} [{}]: {}",
                    event.base_name,
                    event.split,
                    event.reason.code()
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Output:   {}", self.output_root.display())?;
        writeln!(f, "Mapping:  {}", self.mapping_path.display())?;
        writeln!(f, "Manifest: {}", self.manifest_path.display())
    }
}
