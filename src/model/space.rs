//! Coordinate space markers.
//!
//! Annotation boxes arrive in pixel space and leave in normalized space; the
//! markers keep the two from being mixed up in the converter.

use std::fmt;

/// Absolute pixel positions, origin at the top-left corner, y growing down.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Positions divided by the image width (x) and height (y).
///
/// Nominally in `[0, 1]`, but nothing enforces that: a box that sticks out of
/// its image keeps sticking out after normalization.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
