//! Re-merging of placeholder tokens that a host editor split across runs.
//!
//! Word-compatible editors freely break a `{{name:type}}` the user typed into
//! several adjacent `<w:r><w:t>` runs (spell-check state, revision tracking,
//! or a mid-token edit all trigger this). Before grammar parsing, the body
//! markup is normalized so every placeholder is one contiguous span again.
//!
//! The pass runs to a fixed point, bounded at [`MAX_PASSES`] so pathological
//! input always terminates. Repairing already-repaired text is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on repair passes; normal documents converge in one or two.
pub const MAX_PASSES: usize = 20;

/// A complete `{{...}}` span, possibly with structural tags embedded in its
/// interior (braces themselves intact).
static TOKEN_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{[^{}]*\}\}").expect("valid token span regex"));

/// Structural tags inside a matched span.
static STRUCTURAL_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid structural tag regex"));

/// An opening brace pair split by one or more structural tags: `{<...>{`.
static SPLIT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{(?:<[^>]*>)+\{").expect("valid split open regex"));

/// A closing brace pair split by one or more structural tags: `}<...>}`.
static SPLIT_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\}(?:<[^>]*>)+\}").expect("valid split close regex"));

/// Restore contiguous placeholder spans in structured-markup text.
///
/// Iterates [`repair_pass`] until a pass makes no change or the iteration
/// bound is hit, whichever comes first.
pub fn repair(body: &str) -> String {
    let mut current = body.to_string();
    for pass in 0..MAX_PASSES {
        let next = repair_pass(&current);
        if next == current {
            if pass > 0 {
                log::debug!("placeholder repair converged after {} pass(es)", pass);
            }
            return current;
        }
        current = next;
    }
    log::warn!("placeholder repair hit the {} pass bound", MAX_PASSES);
    current
}

/// One repair pass: (a) strip structural tags from the interior of complete
/// `{{...}}` spans; (b) merge brace pairs that were themselves split by a
/// structural tag boundary, so the next pass sees a complete span.
fn repair_pass(text: &str) -> String {
    let merged = TOKEN_SPAN.replace_all(text, |caps: &regex::Captures| {
        let span = &caps[0];
        if span.contains('<') {
            STRUCTURAL_TAG.replace_all(span, "").into_owned()
        } else {
            span.to_string()
        }
    });
    let opened = SPLIT_OPEN.replace_all(&merged, "{{");
    SPLIT_CLOSE.replace_all(&opened, "}}").into_owned()
}
