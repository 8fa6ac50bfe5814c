//! Pixel boxes to normalized YOLO label lines.

use std::fmt;

use crate::config::BoxPolicy;
use crate::model::{BBoxXYXY, CharAnnotation, ClassId, Pixel};
use crate::vocab::ClassVocabulary;

/// One row of a YOLO label file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelLine {
    pub class_id: ClassId,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for LabelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.x_center, self.y_center, self.width, self.height
        )
    }
}

/// Result of converting one sample's annotations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertedLabels {
    /// Lines in source annotation order.
    pub lines: Vec<LabelLine>,
    /// Annotations whose label is not in the vocabulary.
    pub dropped_unknown: usize,
    /// Annotations removed by [`BoxPolicy::Drop`].
    pub dropped_invalid: usize,
}

/// Converts a pixel box to `(x_center, y_center, width, height)` normalized
/// by the image size.
///
/// Size and center are computed in pixels first (`center = min + size / 2`)
/// and only then divided, x values by the width and y values by the height.
/// Nothing is clamped or validated.
pub fn convert_box(
    bbox: &BBoxXYXY<Pixel>,
    image_width: u32,
    image_height: u32,
) -> (f64, f64, f64, f64) {
    let (w, h) = (image_width as f64, image_height as f64);
    let center = bbox.center().normalize(w, h);
    (center.x, center.y, bbox.width() / w, bbox.height() / h)
}

fn is_well_formed(bbox: &BBoxXYXY<Pixel>, image_width: f64, image_height: f64) -> bool {
    bbox.is_finite() && bbox.is_ordered() && bbox.is_within(image_width, image_height)
}

/// Converts every annotation of a sample into label lines.
///
/// Annotations with a label outside `vocab` are dropped without comment.
pub fn convert_annotations(
    annotations: &[CharAnnotation],
    vocab: &ClassVocabulary,
    image_width: u32,
    image_height: u32,
    policy: BoxPolicy,
) -> ConvertedLabels {
    let mut out = ConvertedLabels {
        lines: Vec::with_capacity(annotations.len()),
        ..Default::default()
    };
    let (w, h) = (image_width as f64, image_height as f64);

    for ann in annotations {
        let Some(class_id) = vocab.id_of(&ann.label) else {
            out.dropped_unknown += 1;
            continue;
        };

        let bbox = match policy {
            BoxPolicy::PassThrough => ann.bbox,
            BoxPolicy::Clamp => ann.bbox.clamp_to(w, h),
            BoxPolicy::Drop => {
                if !is_well_formed(&ann.bbox, w, h) {
                    out.dropped_invalid += 1;
                    continue;
                }
                ann.bbox
            }
        };

        let (x_center, y_center, width, height) = convert_box(&bbox, image_width, image_height);
        out.lines.push(LabelLine {
            class_id,
            x_center,
            y_center,
            width,
            height,
        });
    }

    out
}

/// Label file contents: one line per label, `\n`-separated, no trailing newline.
///
/// An empty slice renders as an empty string.
pub fn render_label_file(lines: &[LabelLine]) -> String {
    lines
        .iter()
        .map(LabelLine::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(label: &str, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> CharAnnotation {
        CharAnnotation::new(label, BBoxXYXY::from_xyxy(xmin, ymin, xmax, ymax))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn converts_reference_box() {
        // w=40, h=60, center (30, 50), image 100x200
        let bbox = BBoxXYXY::from_xyxy(10.0, 20.0, 50.0, 80.0);
        let (xc, yc, w, h) = convert_box(&bbox, 100, 200);
        assert_close(xc, 0.30);
        assert_close(yc, 0.25);
        assert_close(w, 0.40);
        assert_close(h, 0.30);
    }

    #[test]
    fn pass_through_keeps_inverted_and_out_of_bounds_boxes() {
        let vocab = ClassVocabulary::from_labels(["a"]);
        let anns = [
            ann("a", 50.0, 80.0, 10.0, 20.0),
            ann("a", 150.0, 250.0, 300.0, 400.0),
        ];
        let out = convert_annotations(&anns, &vocab, 100, 200, BoxPolicy::PassThrough);

        assert_eq!(out.lines.len(), 2);
        assert_close(out.lines[0].width, -0.4);
        assert_close(out.lines[0].height, -0.3);
        assert!(out.lines[1].x_center > 1.0);
        assert!(out.lines[1].y_center > 1.0);
        assert_eq!(out.dropped_invalid, 0);
    }

    #[test]
    fn clamp_and_drop_policies() {
        let vocab = ClassVocabulary::from_labels(["a"]);
        let anns = [
            ann("a", -10.0, 0.0, 50.0, 100.0),
            ann("a", 10.0, 10.0, 20.0, 20.0),
        ];

        let clamped = convert_annotations(&anns, &vocab, 100, 100, BoxPolicy::Clamp);
        assert_eq!(clamped.lines.len(), 2);
        assert_close(clamped.lines[0].x_center, 0.25);
        assert_close(clamped.lines[0].width, 0.5);

        let dropped = convert_annotations(&anns, &vocab, 100, 100, BoxPolicy::Drop);
        assert_eq!(dropped.lines.len(), 1);
        assert_eq!(dropped.dropped_invalid, 1);
        assert_close(dropped.lines[0].x_center, 0.15);
    }

    #[test]
    fn unknown_labels_are_dropped_and_order_is_kept() {
        let vocab = ClassVocabulary::from_labels(["a", "b"]);
        let anns = [
            ann("b", 0.0, 0.0, 10.0, 10.0),
            ann("zz", 0.0, 0.0, 10.0, 10.0),
            ann("a", 0.0, 0.0, 10.0, 10.0),
        ];
        let out = convert_annotations(&anns, &vocab, 10, 10, BoxPolicy::PassThrough);

        let ids: Vec<_> = out.lines.iter().map(|l| l.class_id).collect();
        assert_eq!(ids, vec![ClassId(1), ClassId(0)]);
        assert_eq!(out.dropped_unknown, 1);
    }

    #[test]
    fn label_file_has_no_trailing_newline() {
        let vocab = ClassVocabulary::from_labels(["a", "b"]);
        let anns = [
            ann("a", 10.0, 20.0, 50.0, 80.0),
            ann("b", 0.0, 0.0, 100.0, 200.0),
        ];
        let out = convert_annotations(&anns, &vocab, 100, 200, BoxPolicy::PassThrough);

        assert_eq!(
            render_label_file(&out.lines),
            "0 0.300000 0.250000 0.400000 0.300000\n1 0.500000 0.500000 1.000000 1.000000"
        );
        assert_eq!(render_label_file(&[]), "");
    }
}
