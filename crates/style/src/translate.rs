//! Translation of a normalized style set into target-format markup.
//!
//! Properties without a representable equivalent in the target format are
//! silently omitted. An empty set produces an empty fragment so unstyled
//! text is never wrapped in spurious formatting runs.

use crate::parsers;
use crate::set::StyleSet;

/// The two markup targets a style set can translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// OOXML run properties (the children of a `<w:rPr>` element).
    RunProperties,
    /// Inline CSS declarations for the flat HTML path.
    InlineCss,
}

pub fn to_target_markup(set: &StyleSet, format: TargetFormat) -> String {
    match format {
        TargetFormat::RunProperties => to_run_properties(set),
        TargetFormat::InlineCss => to_inline_css(set),
    }
}

/// Render the set as `<w:rPr>` children. Font sizes become half-point
/// values; color values are emitted without a leading `#`.
pub fn to_run_properties(set: &StyleSet) -> String {
    let mut out = String::new();
    for (key, value) in set.iter() {
        match (key, value) {
            ("font-weight", "bold") => out.push_str("<w:b/>"),
            ("font-style", "italic") => out.push_str("<w:i/>"),
            ("text-decoration", "underline") => out.push_str("<w:u w:val=\"single\"/>"),
            ("text-decoration", "line-through") => out.push_str("<w:strike/>"),
            ("font-size", value) => {
                if let Ok(points) = parsers::parse_point_size(value) {
                    let half_points = (points * 2.0).round() as u32;
                    out.push_str(&format!("<w:sz w:val=\"{}\"/>", half_points));
                }
            }
            ("color", value) => {
                out.push_str(&format!(
                    "<w:color w:val=\"{}\"/>",
                    value.trim_start_matches('#')
                ));
            }
            ("background-color", value) => {
                out.push_str(&format!(
                    "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>",
                    value.trim_start_matches('#')
                ));
            }
            _ => {} // no run-level equivalent
        }
    }
    out
}

/// Render the set as inline CSS declarations joined with `; `.
pub fn to_inline_css(set: &StyleSet) -> String {
    set.iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}
