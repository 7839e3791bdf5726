//! The placeholder grammar parser.
//!
//! `parse` is pure and total: malformed interior content degrades to
//! best-effort fields instead of failing. Parsing the same input twice yields
//! identical tokens, and parsing never mutates the source text.

use crate::token::Placeholder;
use stampa_style::StyleSet;
use stampa_types::TypeTag;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Extract every placeholder token from `text`, in discovery order.
///
/// A token is delimited by a literal `{{` and the nearest following `}}`;
/// nested braces are not supported. Whitespace around delimiters, `:` and
/// `,` is insignificant, so `{{ name : text }}` parses identically to
/// `{{name:text}}`.
pub fn parse(text: &str) -> Vec<Placeholder> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while let Some(open_offset) = text[cursor..].find(OPEN) {
        let open = cursor + open_offset;
        let interior_start = open + OPEN.len();
        let Some(close_offset) = text[interior_start..].find(CLOSE) else {
            break;
        };
        let close = interior_start + close_offset;
        let literal_span = &text[open..close + CLOSE.len()];
        let interior = &text[interior_start..close];
        tokens.push(parse_interior(interior, literal_span));
        cursor = close + CLOSE.len();
    }
    tokens
}

/// Split the interior on top-level commas; the head segment is `name[:type]`,
/// every later segment is a `key:value` pair split on its first `:` only
/// (so `ratio:16:9` keeps `16:9` intact as the value).
fn parse_interior(interior: &str, literal_span: &str) -> Placeholder {
    let mut segments = interior.split(',');
    let head = segments.next().unwrap_or_default();

    let (name, raw_tag) = match head.split_once(':') {
        Some((name, tag)) => (name.trim(), Some(tag.trim())),
        None => (head.trim(), None),
    };
    let resolved = raw_tag.map(TypeTag::from_tag);
    let type_tag = resolved.flatten().unwrap_or_default();
    // A missing tag is the documented default, not an unrecognized one.
    let recognized = !matches!(resolved, Some(None));

    let mut options = Vec::new();
    let mut styles = StyleSet::new();
    for segment in segments {
        let (key, value) = match segment.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (segment.trim(), ""),
        };
        if key.is_empty() {
            continue;
        }
        if !styles.insert_normalized(key, value) {
            options.push((key.to_string(), value.to_string()));
        }
    }

    Placeholder {
        name: name.to_string(),
        type_tag,
        raw_tag: raw_tag.map(str::to_string),
        recognized,
        options,
        styles,
        literal_span: literal_span.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_token_parses() {
        let tokens = parse("Hello {{name:text}}!");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "name");
        assert_eq!(tokens[0].type_tag, TypeTag::Text);
        assert_eq!(tokens[0].literal_span, "{{name:text}}");
        assert!(tokens[0].recognized);
    }

    #[test]
    fn whitespace_variants_parse_identically() {
        let compact = parse("{{name:text,bold:true}}");
        let spaced = parse("{{ name : text , bold : true }}");
        assert_eq!(compact[0].name, spaced[0].name);
        assert_eq!(compact[0].type_tag, spaced[0].type_tag);
        assert_eq!(compact[0].styles, spaced[0].styles);
        // The literal span still reflects the original text exactly.
        assert_eq!(spaced[0].literal_span, "{{ name : text , bold : true }}");
    }

    #[test]
    fn missing_type_defaults_to_text() {
        let tokens = parse("{{name}}");
        assert_eq!(tokens[0].type_tag, TypeTag::Text);
        assert_eq!(tokens[0].raw_tag, None);
        assert!(tokens[0].recognized);
    }

    #[test]
    fn unknown_type_falls_back_but_is_flagged() {
        let tokens = parse("{{name:blob}}");
        assert_eq!(tokens[0].type_tag, TypeTag::Text);
        assert_eq!(tokens[0].raw_tag.as_deref(), Some("blob"));
        assert!(!tokens[0].recognized);
    }

    #[test]
    fn option_values_split_on_first_colon_only() {
        let tokens = parse("{{photo:image,width:800,ratio:16:9}}");
        assert_eq!(tokens[0].option("width"), Some("800"));
        assert_eq!(tokens[0].option("ratio"), Some("16:9"));
    }

    #[test]
    fn style_keys_route_to_styles_and_others_stay_options() {
        let tokens = parse("{{t:text,bold:true,color:red,custom:thing}}");
        let token = &tokens[0];
        assert_eq!(token.styles.get("font-weight"), Some("bold"));
        assert_eq!(token.styles.get("color"), Some("FF0000"));
        assert_eq!(token.option("custom"), Some("thing"));
        assert!(token.option("bold").is_none());
    }

    #[test]
    fn duplicate_names_yield_independent_tokens() {
        let tokens = parse("{{x:text}} and {{x:number}}");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].type_tag, TypeTag::Text);
        assert_eq!(tokens[1].type_tag, TypeTag::Number);
    }

    #[test]
    fn discovery_order_is_document_order() {
        let tokens = parse("{{b:text}} {{a:text}} {{c:text}}");
        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn unterminated_token_is_skipped() {
        assert!(parse("text {{name:text").is_empty());
        assert_eq!(parse("{{a:text}} {{b").len(), 1);
    }

    #[test]
    fn parsing_is_repeatable() {
        let text = "Hi {{a:text,bold:true}}, {{b:number}}";
        assert_eq!(parse(text), parse(text));
    }
}
