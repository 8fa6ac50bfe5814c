#![allow(dead_code)]

use std::collections::BTreeSet;

use brahmi_prep::model::{BBoxXYXY, Pixel};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Tolerance for normalized values after `{:.6}` formatting.
pub const EPS_LABEL_TEXT: f64 = 1e-6;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A single grapheme label: Brahmi letters, Latin letters or digits.
pub fn arb_label() -> BoxedStrategy<String> {
    prop_oneof![
        (0x11005u32..=0x11037).prop_map(|cp| char::from_u32(cp).unwrap_or('?').to_string()),
        "[a-zA-Z0-9]",
    ]
    .boxed()
}

/// Label multisets, duplicates included.
pub fn arb_labels(max_len: usize) -> BoxedStrategy<Vec<String>> {
    prop::collection::vec(arb_label(), 0..=max_len).boxed()
}

/// Distinct base names shaped like scanned page file stems.
pub fn arb_base_names(max_len: usize) -> BoxedStrategy<Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}_[0-9]{1,3}", 0..=max_len)
        .prop_map(|set: BTreeSet<String>| set.into_iter().collect())
        .boxed()
}

pub fn arb_image_size() -> BoxedStrategy<(u32, u32)> {
    (1u32..=4096, 1u32..=4096).boxed()
}

/// An image size together with a well-formed box inside it.
pub fn arb_sized_box() -> BoxedStrategy<((u32, u32), BBoxXYXY<Pixel>)> {
    arb_image_size()
        .prop_flat_map(|(w, h)| {
            let (wf, hf) = (w as f64, h as f64);
            (
                Just((w, h)),
                (0.0..=wf, 0.0..=wf),
                (0.0..=hf, 0.0..=hf),
            )
        })
        .prop_map(|(size, (x1, x2), (y1, y2))| {
            let bbox = BBoxXYXY::<Pixel>::from_xyxy(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2));
            (size, bbox)
        })
        .boxed()
}

pub fn arb_val_fraction() -> BoxedStrategy<f64> {
    prop_oneof![Just(0.0), Just(0.2), Just(1.0), 0.0f64..=1.0].boxed()
}
