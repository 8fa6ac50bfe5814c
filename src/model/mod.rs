//! Core value types shared by the pipeline stages.
//!
//! Boxes carry a zero-sized marker for their coordinate space so that pixel
//! and normalized values cannot be mixed by accident. The types are
//! permissive: inverted, empty or out-of-image boxes are representable,
//! because the converter's default is to pass them through untouched.
//!
//! # Example
//!
//! ```
//! use brahmi_prep::model::{BBoxXYXY, CharAnnotation, Pixel};
//!
//! let ann: CharAnnotation =
//!     serde_json::from_str(r#"{"char": "ka", "bbox": [10, 20, 50, 80]}"#).unwrap();
//! assert_eq!(ann.bbox, BBoxXYXY::<Pixel>::from_xyxy(10.0, 20.0, 50.0, 80.0));
//! ```

mod bbox;
mod coord;
mod ids;
mod record;
mod space;

pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use ids::ClassId;
pub use record::{AnnotatedSample, CharAnnotation};
pub use space::{Normalized, Pixel};
