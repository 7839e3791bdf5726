pub mod parsers;
pub mod set;
pub mod translate;

pub use parsers::StyleError;
pub use set::StyleSet;
pub use translate::{to_inline_css, to_run_properties, to_target_markup, TargetFormat};
