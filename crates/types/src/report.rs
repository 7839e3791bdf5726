//! Per-operation substitution summary returned alongside the output bytes.

use serde::Serialize;

/// What happened to each placeholder during one substitution pass.
///
/// Per-token degradations (cleared placeholders, absorbed image failures)
/// live here; they are never raised as errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatchReport {
    /// Names substituted with a caller-supplied value, in discovery order.
    pub substituted: Vec<String>,
    /// Names with no supplied value; their spans were cleared to empty text.
    pub cleared: Vec<String>,
    /// Image tokens whose processing failed and degraded to an inline marker.
    pub image_failures: Vec<ImageFailure>,
    /// Tokens whose written type tag was not recognized (substituted as text).
    pub unrecognized_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageFailure {
    pub name: String,
    pub message: String,
}

impl PatchReport {
    pub fn is_clean(&self) -> bool {
        self.image_failures.is_empty() && self.unrecognized_types.is_empty()
    }
}
