//! Flat-text (HTML) substitution path.
//!
//! HTML templates are a single string: no container, no fragment repair.
//! Placeholders substitute directly into the text, styles become inline CSS
//! spans, and images embed as base64 `data:` URIs. The path is total — it
//! always returns a rendered string plus a report of what degraded.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::GenericImageView;
use stampa_grammar::Placeholder;
use stampa_style::to_inline_css;
use stampa_traits::ResourceProvider;
use stampa_types::{
    format_value, image_error_marker, resolve, ImageFailure, ImageSource, PatchReport, TypeTag,
    Value,
};
use std::collections::HashMap;

/// The substituted template plus the per-token outcomes.
#[derive(Debug)]
pub struct RenderedHtml {
    pub html: String,
    pub report: PatchReport,
}

#[derive(Debug)]
pub struct HtmlRenderer<'a> {
    resources: &'a dyn ResourceProvider,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(resources: &'a dyn ResourceProvider) -> Self {
        Self { resources }
    }

    /// Substitute every placeholder in the template against the variable map.
    pub fn render(&self, template: &str, variables: &HashMap<String, Value>) -> RenderedHtml {
        let tokens = stampa_grammar::parse(template);
        log::debug!("found {} placeholder token(s) in template", tokens.len());

        let mut report = PatchReport::default();
        let mut html = template.to_string();
        for token in &tokens {
            if !token.recognized {
                report.unrecognized_types.push(token.name.clone());
            }
            let replacement = match (token.type_tag, variables.get(&token.name)) {
                (_, None) => {
                    report.cleared.push(token.name.clone());
                    String::new()
                }
                (TypeTag::Image, Some(Value::Image(source))) => {
                    match self.image_tag(token, source) {
                        Ok(tag) => {
                            report.substituted.push(token.name.clone());
                            tag
                        }
                        Err(message) => {
                            log::warn!(
                                "image substitution for '{}' degraded: {}",
                                token.name,
                                message
                            );
                            report.image_failures.push(ImageFailure {
                                name: token.name.clone(),
                                message,
                            });
                            image_error_marker(&token.name)
                        }
                    }
                }
                (TypeTag::Image, Some(_)) => {
                    report.image_failures.push(ImageFailure {
                        name: token.name.clone(),
                        message: "supplied value is not an image".to_string(),
                    });
                    image_error_marker(&token.name)
                }
                (_, Some(value)) => {
                    report.substituted.push(token.name.clone());
                    text_replacement(token, value)
                }
            };
            html = html.replacen(&token.literal_span, &replacement, 1);
        }
        RenderedHtml { html, report }
    }

    fn image_tag(&self, token: &Placeholder, source: &ImageSource) -> Result<String, String> {
        let (bytes, content_type) = match source {
            ImageSource::Bytes { data, content_type } => (data.clone(), content_type.clone()),
            ImageSource::Path(path) => {
                let data = self.resources.load(path).map_err(|e| e.to_string())?;
                let content_type = image::guess_format(&data)
                    .map(|f| f.to_mime_type().to_string())
                    .unwrap_or_else(|_| "image/png".to_string());
                ((*data).clone(), content_type)
            }
        };
        let (natural_width, natural_height) = image::load_from_memory(&bytes)
            .map(|img| img.dimensions())
            .map_err(|e| format!("image decode failed: {}", e))?;
        let geometry = resolve(&token.image_geometry(), natural_width, natural_height);
        let css = to_inline_css(&token.styles);
        let style_attr = if css.is_empty() {
            String::new()
        } else {
            format!(" style=\"{}\"", css)
        };
        Ok(format!(
            "<img src=\"data:{};base64,{}\" width=\"{}\" height=\"{}\"{}/>",
            content_type,
            BASE64.encode(&bytes),
            geometry.width,
            geometry.height,
            style_attr
        ))
    }
}

fn text_replacement(token: &Placeholder, value: &Value) -> String {
    let text = format_value(token.type_tag, value);
    let escaped = quick_xml::escape::escape(text.as_str());
    let css = to_inline_css(&token.styles);
    if css.is_empty() {
        escaped.into_owned()
    } else {
        format!("<span style=\"{}\">{}</span>", css, escaped)
    }
}
