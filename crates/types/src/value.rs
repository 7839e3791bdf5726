//! Variable values supplied by the caller and their type-directed formatting.
//!
//! A template declares what it expects (`{{age:number}}`); the caller supplies
//! a [`Value`]. Formatting dispatches on the declared tag and the variant,
//! never on runtime reflection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The closed set of placeholder type tags.
///
/// Synonyms (`string`, `integer`, `int`, `bool`) are normalized at parse
/// time; unrecognized tags fall back to `Text` but are flagged so validation
/// can report them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    #[default]
    Text,
    Number,
    Image,
    Date,
    Boolean,
}

impl TypeTag {
    /// Map a raw tag to its canonical type. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Option<TypeTag> {
        match tag {
            "text" | "string" => Some(TypeTag::Text),
            "number" | "integer" | "int" => Some(TypeTag::Number),
            "image" => Some(TypeTag::Image),
            "date" => Some(TypeTag::Date),
            "boolean" | "bool" => Some(TypeTag::Boolean),
            _ => None,
        }
    }
}

/// Where image bytes come from. The core never fetches anything itself:
/// a `Path` is resolved through the caller's resource provider and `Bytes`
/// are already-downloaded data with their content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageSource {
    Path(String),
    Bytes { data: Vec<u8>, content_type: String },
}

/// A caller-supplied variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
    Image(ImageSource),
}

impl Value {
    pub fn is_image(&self) -> bool {
        matches!(self, Value::Image(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// Format a value for substitution under the given declared type.
///
/// Numbers render as integers, booleans as `Yes`/`No`, structured dates as
/// ISO `YYYY-MM-DD`. A text value supplied for a date placeholder is passed
/// through verbatim. Image values are never formatted as text; the backends
/// handle them before reaching this point.
pub fn format_value(tag: TypeTag, value: &Value) -> String {
    match (tag, value) {
        (TypeTag::Number, Value::Number(n)) => format!("{}", n.trunc() as i64),
        (TypeTag::Number, Value::Text(s)) => s.clone(),
        (TypeTag::Boolean, Value::Bool(b)) => yes_no(*b),
        (TypeTag::Boolean, Value::Text(s)) => yes_no(s == "true" || s == "1"),
        (TypeTag::Date, Value::Date(d)) => d.format("%Y-%m-%d").to_string(),
        (TypeTag::Date, Value::Text(s)) => s.clone(),
        (TypeTag::Image, _) => String::new(),
        (_, v) => display(v),
    }
}

/// The replacement emitted when per-image processing fails. Image failures
/// never abort the rest of the document.
pub fn image_error_marker(name: &str) -> String {
    format!("[image error: {}]", name)
}

fn yes_no(b: bool) -> String {
    if b { "Yes" } else { "No" }.to_string()
}

fn display(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        Value::Number(n) => format!("{}", n),
        Value::Bool(b) => yes_no(*b),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Image(_) => String::new(),
    }
}
