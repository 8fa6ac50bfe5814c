//! Typed 2D points.

use std::marker::PhantomData;

use super::{Normalized, Pixel};

/// A point tagged with the coordinate space it lives in.
#[derive(Clone, Copy, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Coord<TSpace> {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns true if both components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Coord<Pixel> {
    /// Divides x by the image width and y by the image height.
    ///
    /// No clamping: points outside the image map outside `[0, 1]`.
    #[inline]
    pub fn normalize(&self, image_width: f64, image_height: f64) -> Coord<Normalized> {
        Coord::new(self.x / image_width, self.y / image_height)
    }
}

impl<TSpace> std::fmt::Debug for Coord<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coord")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<TSpace> Default for Coord<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_divides_per_axis() {
        let p: Coord<Pixel> = Coord::new(30.0, 50.0);
        let n = p.normalize(100.0, 200.0);
        assert_eq!(n.x, 0.3);
        assert_eq!(n.y, 0.25);
    }

    #[test]
    fn normalize_passes_out_of_range_points_through() {
        let p: Coord<Pixel> = Coord::new(-10.0, 400.0);
        let n = p.normalize(100.0, 200.0);
        assert_eq!(n.x, -0.1);
        assert_eq!(n.y, 2.0);
    }

    #[test]
    fn is_finite_rejects_nan() {
        let p: Coord<Pixel> = Coord::new(f64::NAN, 1.0);
        assert!(!p.is_finite());
    }
}
