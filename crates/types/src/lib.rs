pub mod color;
pub mod geometry;
pub mod report;
pub mod value;

pub use color::Color;
pub use geometry::{resolve, ImageGeometry, ResolvedGeometry};
pub use report::{ImageFailure, PatchReport};
pub use value::{format_value, image_error_marker, ImageSource, TypeTag, Value};
