use serde::{de, Deserialize, Deserializer, Serialize};

/// The fixed name -> RGB table used when normalizing style option values.
/// Anything not listed here is passed through untouched.
const NAMED_COLORS: [(&str, &str); 15] = [
    ("black", "000000"),
    ("white", "FFFFFF"),
    ("red", "FF0000"),
    ("green", "008000"),
    ("blue", "0000FF"),
    ("yellow", "FFFF00"),
    ("cyan", "00FFFF"),
    ("magenta", "FF00FF"),
    ("gray", "808080"),
    ("silver", "C0C0C0"),
    ("maroon", "800000"),
    ("olive", "808000"),
    ("navy", "000080"),
    ("purple", "800080"),
    ("orange", "FFA500"),
];

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Look up a named color from the fixed table.
    pub fn named(name: &str) -> Option<Color> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, hex)| Self::parse_hex(hex).ok())
    }

    /// Resolve a style option value to a bare 6-hex RGB string.
    ///
    /// Named colors go through the fixed table; `#`-prefixed and bare hex
    /// strings are canonicalized; anything else is returned unchanged.
    pub fn resolve_to_hex(value: &str) -> String {
        let value = value.trim();
        if let Some(color) = Self::named(value) {
            return color.to_hex();
        }
        match Self::parse_hex(value.strip_prefix('#').unwrap_or(value)) {
            Ok(color) => color.to_hex(),
            Err(_) => value.to_string(),
        }
    }

    /// Render as an uppercase `RRGGBB` string without a leading `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a hex color string (RGB or RRGGBB, leading `#` already stripped).
    fn parse_hex(hex: &str) -> Result<Color, String> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {}", hex));
        }
        match hex.len() {
            3 => {
                // RGB format - expand each digit
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            6 => {
                // RRGGBB format
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(color) = Color::named(&s) {
            return Ok(color);
        }
        Color::parse_hex(s.strip_prefix('#').unwrap_or(&s)).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_resolve() {
        assert_eq!(Color::named("red"), Some(Color { r: 255, g: 0, b: 0 }));
        assert_eq!(Color::named("navy"), Some(Color { r: 0, g: 0, b: 128 }));
        assert_eq!(Color::named("chartreuse"), None);
    }

    #[test]
    fn resolve_to_hex_handles_names_hex_and_passthrough() {
        assert_eq!(Color::resolve_to_hex("red"), "FF0000");
        assert_eq!(Color::resolve_to_hex("#00ff00"), "00FF00");
        assert_eq!(Color::resolve_to_hex("1a2b3c"), "1A2B3C");
        assert_eq!(Color::resolve_to_hex("f00"), "FF0000");
        // Unknown values pass through untouched.
        assert_eq!(Color::resolve_to_hex("rgb(1,2,3)"), "rgb(1,2,3)");
    }

    #[test]
    fn hex_roundtrip() {
        let c = Color {
            r: 16,
            g: 32,
            b: 255,
        };
        assert_eq!(c.to_hex(), "1020FF");
    }
}
