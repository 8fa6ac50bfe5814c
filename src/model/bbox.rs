//! Corner-form bounding boxes.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::Pixel;

/// An axis-aligned box stored as `[xmin, ymin, xmax, ymax]`.
///
/// Construction does not check that `min <= max`. Annotation files are
/// converted as-is, so an inverted or degenerate box has to survive parsing
/// and reach the converter intact.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Width of the box. Negative when `xmax < xmin`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box. Negative when `ymax < ymin`.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point, computed as `min + size / 2` on each axis.
    #[inline]
    pub fn center(&self) -> Coord<TSpace> {
        Coord::new(
            self.min.x + self.width() / 2.0,
            self.min.y + self.height() / 2.0,
        )
    }

    /// Returns `(x_center, y_center, width, height)` in the box's own space.
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        let center = self.center();
        (center.x, center.y, self.width(), self.height())
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if `min <= max` on both axes.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl BBoxXYXY<Pixel> {
    /// Clips every corner into `[0, image_width] x [0, image_height]`.
    pub fn clamp_to(&self, image_width: f64, image_height: f64) -> Self {
        Self::from_xyxy(
            self.min.x.clamp(0.0, image_width),
            self.min.y.clamp(0.0, image_height),
            self.max.x.clamp(0.0, image_width),
            self.max.y.clamp(0.0, image_height),
        )
    }

    /// True when the whole box lies inside the image.
    pub fn is_within(&self, image_width: f64, image_height: f64) -> bool {
        self.min.x >= 0.0
            && self.min.y >= 0.0
            && self.max.x <= image_width
            && self.max.y <= image_height
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Annotation files spell boxes as a bare four-number array.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.min.x, self.min.y, self.max.x, self.max.y].serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [xmin, ymin, xmax, ymax] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBoxXYXY::from_xyxy(xmin, ymin, xmax, ymax))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cxcywh_uses_min_plus_half_size() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 20.0, 50.0, 80.0);
        assert_eq!(bbox.to_cxcywh(), (30.0, 50.0, 40.0, 60.0));
    }

    #[test]
    fn inverted_box_keeps_negative_size() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(50.0, 80.0, 10.0, 20.0);
        assert!(!bbox.is_ordered());
        assert_eq!(bbox.width(), -40.0);
        assert_eq!(bbox.height(), -60.0);
        assert_eq!(bbox.to_cxcywh(), (30.0, 50.0, -40.0, -60.0));
    }

    #[test]
    fn clamp_pulls_corners_into_image() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(-5.0, 10.0, 120.0, 250.0);
        let clamped = bbox.clamp_to(100.0, 200.0);
        assert_eq!(clamped, BBoxXYXY::from_xyxy(0.0, 10.0, 100.0, 200.0));
        assert!(clamped.is_within(100.0, 200.0));
        assert!(!bbox.is_within(100.0, 200.0));
    }

    #[test]
    fn deserializes_from_four_number_array() {
        let bbox: BBoxXYXY<Pixel> = serde_json::from_str("[1, 2.5, 3, 4]").expect("parse bbox");
        assert_eq!(bbox, BBoxXYXY::from_xyxy(1.0, 2.5, 3.0, 4.0));
    }

    #[test]
    fn rejects_arrays_of_wrong_length() {
        assert!(serde_json::from_str::<BBoxXYXY<Pixel>>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<BBoxXYXY<Pixel>>("[1, 2, 3, 4, 5]").is_err());
    }

    #[test]
    fn serializes_back_to_array() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            serde_json::to_string(&bbox).expect("serialize"),
            "[1.0,2.0,3.0,4.0]"
        );
    }
}
