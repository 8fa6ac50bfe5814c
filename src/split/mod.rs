//! Seeded train/validation split.

use std::collections::BTreeSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

/// The two output partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    /// Directory name used under `images/` and `labels/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disjoint, exhaustive assignment of sample names to splits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitAssignment {
    pub train: Vec<String>,
    pub val: Vec<String>,
}

impl SplitAssignment {
    pub fn names(&self, split: Split) -> &[String] {
        match split {
            Split::Train => &self.train,
            Split::Val => &self.val,
        }
    }

    pub fn split_of(&self, name: &str) -> Option<Split> {
        if self.train.iter().any(|n| n == name) {
            Some(Split::Train)
        } else if self.val.iter().any(|n| n == name) {
            Some(Split::Val)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.val.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of validation samples: `ceil(total * val_fraction)`, capped at `total`.
pub fn val_count(total: usize, val_fraction: f64) -> usize {
    if total == 0 {
        return 0;
    }
    let raw = (total as f64 * val_fraction).ceil() as usize;
    raw.min(total)
}

/// Partitions `names` into train and validation lists.
///
/// Names are deduplicated and sorted before the seeded shuffle, so the result
/// depends only on the set of names, the fraction and the seed. The first
/// `val_count` shuffled names go to validation, the rest to training. There
/// is no stratification by class.
pub fn split_samples<I, S>(names: I, val_fraction: f64, seed: u64) -> SplitAssignment
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let unique: BTreeSet<String> = names.into_iter().map(Into::into).collect();
    let mut shuffled: Vec<String> = unique.into_iter().collect();

    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_val = val_count(shuffled.len(), val_fraction);
    let train = shuffled.split_off(n_val);

    SplitAssignment {
        train,
        val: shuffled,
    }
}
