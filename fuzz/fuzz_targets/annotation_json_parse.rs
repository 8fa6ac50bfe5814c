//! Feeds arbitrary bytes to the annotation file parser, then pushes whatever
//! parses through every box policy of the label converter.

#![no_main]

use brahmi_prep::config::BoxPolicy;
use brahmi_prep::convert::{convert_annotations, render_label_file};
use brahmi_prep::vocab::{parse_annotations, ClassVocabulary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(annotations) = parse_annotations(data) else {
        return;
    };

    let vocab = ClassVocabulary::from_labels(annotations.iter().map(|a| a.label.as_str()));
    for policy in [BoxPolicy::PassThrough, BoxPolicy::Clamp, BoxPolicy::Drop] {
        let converted = convert_annotations(&annotations, &vocab, 640, 480, policy);
        let _ = render_label_file(&converted.lines);
    }
});
