//! The structured record produced for each `{{...}}` span.

use serde::Serialize;
use stampa_style::StyleSet;
use stampa_types::{ImageGeometry, TypeTag};

/// One parsed placeholder occurrence.
///
/// `literal_span` is the exact original substring, delimiters included; it is
/// the join key back into the host document text. The same name may occur
/// several times with different types; each occurrence carries its own span
/// and is substituted independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub name: String,
    pub type_tag: TypeTag,
    /// The tag exactly as written, when one was present.
    pub raw_tag: Option<String>,
    /// False when the written tag was not in the recognized set. The token
    /// still substitutes as text; validation layers can report it.
    pub recognized: bool,
    /// Non-style options, in declaration order.
    pub options: Vec<(String, String)>,
    /// Whitelisted style options, normalized at parse time.
    pub styles: StyleSet,
    pub literal_span: String,
}

impl Placeholder {
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Requested image dimensions from the `width`/`height`/`ratio` options.
    /// Malformed values are ignored rather than failing the token.
    pub fn image_geometry(&self) -> ImageGeometry {
        ImageGeometry {
            width: self.option("width").and_then(|v| v.parse().ok()),
            height: self.option("height").and_then(|v| v.parse().ok()),
            ratio: self.option("ratio").and_then(parse_ratio),
        }
    }
}

fn parse_ratio(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once(':')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}
