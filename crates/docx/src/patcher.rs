//! The package patcher: one template through
//! `Opened -> BodyExtracted -> Repaired -> Substituted -> Serialized`.
//!
//! No transition is skipped. Fatal failures (unreadable archive, missing
//! body, unwritable relationships) abort with no output; per-token failures
//! degrade to empty text or an inline error marker and are collected in the
//! patch report. All mutation happens on this operation's working copy, so a
//! caller always sees either a complete output or none at all.

use crate::container::{
    Container, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART, MEDIA_DIR,
};
use crate::drawing;
use crate::error::PatchError;
use crate::rels::{ContentTypes, Relationships};
use image::GenericImageView;
use stampa_grammar::Placeholder;
use stampa_style::to_run_properties;
use stampa_traits::{ResourceError, ResourceProvider};
use stampa_types::{
    format_value, image_error_marker, resolve, ImageFailure, ImageSource, PatchReport, TypeTag,
    Value,
};
use std::collections::HashMap;

/// The fully substituted container plus what happened along the way.
#[derive(Debug)]
pub struct PatchOutcome {
    pub bytes: Vec<u8>,
    pub report: PatchReport,
}

/// Patches one word-processing package at a time. The patcher itself is
/// stateless; every `patch` call works on its own container copy.
#[derive(Debug)]
pub struct DocxPatcher<'a> {
    resources: &'a dyn ResourceProvider,
}

enum ImageError {
    /// The container would be structurally invalid; abort the operation.
    Fatal(PatchError),
    /// Absorbed locally as an inline marker.
    Degraded(String),
}

/// Pending media injections for one patch operation.
struct MediaContext {
    rels: Option<Relationships>,
    content_types: ContentTypes,
    media: Vec<(String, Vec<u8>)>,
    existing: Vec<String>,
    next_doc_pr: u32,
}

impl MediaContext {
    /// Register the image bytes as a new media part plus one relationship
    /// entry, returning the fresh relationship id.
    fn add_image(
        &mut self,
        name_slug: &str,
        extension: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, PatchError> {
        let rels = self.rels.as_mut().ok_or_else(|| {
            PatchError::RelationshipWrite(
                "container has no relationships part for the body".to_string(),
            )
        })?;
        let media_name = Self::unique_media_name(&self.existing, &self.media, name_slug, extension);
        let rel_id = rels.next_free_id();
        rels.append_image(&rel_id, &format!("media/{}", media_name))?;
        self.content_types.ensure_default(extension, content_type);
        self.media
            .push((format!("{}{}", MEDIA_DIR, media_name), bytes));
        Ok(rel_id)
    }

    fn unique_media_name(
        existing: &[String],
        pending: &[(String, Vec<u8>)],
        name_slug: &str,
        extension: &str,
    ) -> String {
        let mut n = pending.len() + 1;
        loop {
            let candidate = format!("{}_{}.{}", name_slug, n, extension);
            let full = format!("{}{}", MEDIA_DIR, candidate);
            let taken = existing.iter().any(|e| *e == full)
                || pending.iter().any(|(name, _)| *name == full);
            if !taken {
                return candidate;
            }
            n += 1;
        }
    }
}

impl<'a> DocxPatcher<'a> {
    pub fn new(resources: &'a dyn ResourceProvider) -> Self {
        Self { resources }
    }

    /// Substitute every placeholder in the template against the variable map
    /// and return the rewritten package bytes.
    pub fn patch(
        &self,
        template: &[u8],
        variables: &HashMap<String, Value>,
    ) -> Result<PatchOutcome, PatchError> {
        // Opened
        let mut container = Container::open(template)?;

        // BodyExtracted
        let body = container
            .part_utf8(DOCUMENT_PART)?
            .ok_or(PatchError::MissingBodyPart(DOCUMENT_PART))?;

        // Repaired
        let repaired = stampa_repair::repair(&body);
        let tokens = stampa_grammar::parse(&repaired);
        log::debug!("found {} placeholder token(s) in body", tokens.len());

        // Substituted
        let mut report = PatchReport::default();
        let mut media = MediaContext {
            rels: container.part_utf8(DOCUMENT_RELS_PART)?.map(Relationships::new),
            content_types: ContentTypes::new(container.part_utf8(CONTENT_TYPES_PART)?),
            media: Vec::new(),
            existing: container.part_names().map(str::to_string).collect(),
            next_doc_pr: 1,
        };
        let mut patched = repaired;
        for token in &tokens {
            if !token.recognized {
                report.unrecognized_types.push(token.name.clone());
            }
            let replacement = match (token.type_tag, variables.get(&token.name)) {
                // Unmatched placeholders are always cleared, never left as
                // literal text.
                (_, None) => {
                    report.cleared.push(token.name.clone());
                    String::new()
                }
                (TypeTag::Image, Some(Value::Image(source))) => {
                    match self.image_replacement(token, source, &mut media) {
                        Ok(fragment) => {
                            report.substituted.push(token.name.clone());
                            fragment
                        }
                        Err(ImageError::Fatal(e)) => return Err(e),
                        Err(ImageError::Degraded(message)) => {
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
                    let message = "supplied value is not an image".to_string();
                    report.image_failures.push(ImageFailure {
                        name: token.name.clone(),
                        message,
                    });
                    image_error_marker(&token.name)
                }
                (_, Some(value)) => {
                    report.substituted.push(token.name.clone());
                    text_replacement(token, value)
                }
            };
            patched = patched.replacen(&token.literal_span, &replacement, 1);
        }

        // Serialized
        container.set_part(DOCUMENT_PART, patched.into_bytes());
        if !media.media.is_empty() {
            if let Some(rels) = media.rels {
                container.set_part(DOCUMENT_RELS_PART, rels.into_xml().into_bytes());
            }
            container.set_part(CONTENT_TYPES_PART, media.content_types.into_xml().into_bytes());
            for (name, bytes) in media.media {
                container.set_part(&name, bytes);
            }
        }
        let bytes = container.to_bytes()?;
        log::debug!(
            "patched package: {} substituted, {} cleared, {} image failure(s)",
            report.substituted.len(),
            report.cleared.len(),
            report.image_failures.len()
        );
        Ok(PatchOutcome { bytes, report })
    }

    fn image_replacement(
        &self,
        token: &Placeholder,
        source: &ImageSource,
        media: &mut MediaContext,
    ) -> Result<String, ImageError> {
        let (bytes, content_type) = self
            .load_image(source)
            .map_err(|e| ImageError::Degraded(e.to_string()))?;
        let (natural_width, natural_height) = image::load_from_memory(&bytes)
            .map(|img| img.dimensions())
            .map_err(|e| ImageError::Degraded(format!("image decode failed: {}", e)))?;
        let geometry = resolve(&token.image_geometry(), natural_width, natural_height);
        let extension = extension_for(&content_type);
        let rel_id = media
            .add_image(&slug::slugify(&token.name), extension, &content_type, bytes)
            .map_err(ImageError::Fatal)?;
        let doc_pr = media.next_doc_pr;
        media.next_doc_pr += 1;
        // Splice the drawing between the current text run's content; a run
        // may hold both text and drawing children.
        Ok(format!(
            "</w:t>{}<w:t xml:space=\"preserve\">",
            drawing::inline_drawing(&rel_id, &token.name, &geometry, doc_pr)
        ))
    }

    fn load_image(&self, source: &ImageSource) -> Result<(Vec<u8>, String), ResourceError> {
        match source {
            ImageSource::Bytes { data, content_type } => Ok((data.clone(), content_type.clone())),
            ImageSource::Path(path) => {
                let data = self.resources.load(path)?;
                let content_type = sniff_content_type(&data, path);
                Ok(((*data).clone(), content_type))
            }
        }
    }
}

/// The type-formatted, style-wrapped replacement for a non-image token.
///
/// With styles, the current run is closed, a styled run spliced in, and a
/// plain run reopened so surrounding text keeps its original formatting. An
/// empty style set splices escaped text only.
fn text_replacement(token: &Placeholder, value: &Value) -> String {
    let text = format_value(token.type_tag, value);
    let escaped = quick_xml::escape::escape(text.as_str());
    let properties = to_run_properties(&token.styles);
    if properties.is_empty() {
        escaped.into_owned()
    } else {
        format!(
            "</w:t></w:r><w:r><w:rPr>{}</w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r><w:r><w:t xml:space=\"preserve\">",
            properties, escaped
        )
    }
}

fn sniff_content_type(bytes: &[u8], path: &str) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }
    match path.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
    .to_string()
}

fn extension_for(content_type: &str) -> &str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpeg",
        "image/gif" => "gif",
        _ => "png",
    }
}
