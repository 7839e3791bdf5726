//! The normalized style set attached to a placeholder.
//!
//! Keys are restricted to a fixed whitelist; whether an option is a style is
//! decided exactly once, at parse time. Everything else stays an ordinary
//! option on the placeholder.

use serde::Serialize;
use stampa_types::Color;

/// An insertion-ordered map of canonical style property -> normalized value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleSet {
    entries: Vec<(String, String)>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a raw `key:value` option through the style whitelist.
    ///
    /// Returns `true` if the key was a recognized style property (matched
    /// case-sensitively) and was absorbed into the set; `false` leaves the
    /// pair to the caller as an ordinary option.
    pub fn insert_normalized(&mut self, key: &str, value: &str) -> bool {
        let (canonical, normalized) = match key {
            "bold" => ("font-weight", on_off(value, "bold", "normal")),
            "italic" => ("font-style", on_off(value, "italic", "normal")),
            "underline" => ("text-decoration", on_off(value, "underline", "none")),
            "font-size" => ("font-size", with_point_unit(value)),
            "color" => ("color", Color::resolve_to_hex(value)),
            "background-color" => ("background-color", Color::resolve_to_hex(value)),
            _ => return false,
        };
        self.set(canonical, normalized);
        true
    }

    /// Insert or update a canonical property, preserving first-seen order.
    pub fn set(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn on_off(value: &str, on: &str, off: &str) -> String {
    if value == "true" || value == "1" { on } else { off }.to_string()
}

/// Bare integer font sizes get an implicit point unit appended.
fn with_point_unit(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        format!("{}pt", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_routes_and_normalizes() {
        let mut set = StyleSet::new();
        assert!(set.insert_normalized("bold", "true"));
        assert!(set.insert_normalized("italic", "0"));
        assert!(set.insert_normalized("underline", "1"));
        assert!(set.insert_normalized("font-size", "12"));
        assert!(set.insert_normalized("color", "red"));
        assert!(!set.insert_normalized("width", "300"));
        assert!(!set.insert_normalized("Bold", "true")); // case-sensitive

        assert_eq!(set.get("font-weight"), Some("bold"));
        assert_eq!(set.get("font-style"), Some("normal"));
        assert_eq!(set.get("text-decoration"), Some("underline"));
        assert_eq!(set.get("font-size"), Some("12pt"));
        assert_eq!(set.get("color"), Some("FF0000"));
    }

    #[test]
    fn font_size_with_unit_passes_through() {
        let mut set = StyleSet::new();
        set.insert_normalized("font-size", "14pt");
        assert_eq!(set.get("font-size"), Some("14pt"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut set = StyleSet::new();
        set.insert_normalized("color", "navy");
        set.insert_normalized("bold", "true");
        let keys: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "font-weight"]);
    }

    #[test]
    fn repeated_key_updates_in_place() {
        let mut set = StyleSet::new();
        set.insert_normalized("bold", "true");
        set.insert_normalized("bold", "false");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("font-weight"), Some("normal"));
    }
}
