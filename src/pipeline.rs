//! The document pipeline: detect the template kind, dispatch to the right
//! substitution backend, and hand back patched bytes plus the report.

use crate::error::PipelineError;
use stampa_docx::DocxPatcher;
use stampa_html::HtmlRenderer;
use stampa_traits::{InMemoryResourceProvider, ResourceProvider};
use stampa_types::{PatchReport, Value};
use std::collections::HashMap;

/// ZIP local-file-header magic; every word-processing package starts with it.
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// The two template families the pipeline handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Multi-part archive (body markup + relationships + media).
    Package,
    /// Flat HTML text, substituted in place.
    Html,
}

impl TemplateKind {
    /// Sniff the template family from its leading bytes.
    pub fn detect(template: &[u8]) -> TemplateKind {
        if template.starts_with(ZIP_MAGIC) {
            TemplateKind::Package
        } else {
            TemplateKind::Html
        }
    }
}

/// Output of one pipeline run: patched bytes ready for a downstream PDF
/// renderer, or the substituted HTML string as bytes on the flat path.
#[derive(Debug)]
pub struct PatchedDocument {
    pub kind: TemplateKind,
    pub bytes: Vec<u8>,
    pub report: PatchReport,
}

/// Builder for a [`DocumentPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    resources: Option<Box<dyn ResourceProvider>>,
    kind: Option<TemplateKind>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject the provider that resolves image placeholder paths to bytes.
    pub fn with_resource_provider(mut self, provider: Box<dyn ResourceProvider>) -> Self {
        self.resources = Some(provider);
        self
    }

    /// Force the template kind instead of sniffing the leading bytes.
    pub fn with_template_kind(mut self, kind: TemplateKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn build(self) -> DocumentPipeline {
        DocumentPipeline {
            resources: self
                .resources
                .unwrap_or_else(|| Box::new(InMemoryResourceProvider::new())),
            kind: self.kind,
        }
    }
}

/// Synchronous, single-threaded per invocation. Each `patch` call works on
/// its own copy of the template, so separate calls may run concurrently on
/// separate threads without synchronization.
pub struct DocumentPipeline {
    resources: Box<dyn ResourceProvider>,
    kind: Option<TemplateKind>,
}

impl DocumentPipeline {
    /// Substitute all placeholders in one template.
    pub fn patch(
        &self,
        template: &[u8],
        variables: &HashMap<String, Value>,
    ) -> Result<PatchedDocument, PipelineError> {
        let kind = self.kind.unwrap_or_else(|| TemplateKind::detect(template));
        log::debug!("patching template as {:?} ({} bytes)", kind, template.len());
        match kind {
            TemplateKind::Package => {
                let outcome =
                    DocxPatcher::new(self.resources.as_ref()).patch(template, variables)?;
                Ok(PatchedDocument {
                    kind,
                    bytes: outcome.bytes,
                    report: outcome.report,
                })
            }
            TemplateKind::Html => {
                let text = std::str::from_utf8(template).map_err(|_| {
                    PipelineError::Template("flat template is not valid UTF-8".to_string())
                })?;
                let rendered = HtmlRenderer::new(self.resources.as_ref()).render(text, variables);
                Ok(PatchedDocument {
                    kind,
                    bytes: rendered.html.into_bytes(),
                    report: rendered.report,
                })
            }
        }
    }
}

/// Parse a `{"name": value, ...}` JSON object into a variable map.
pub fn variables_from_json(json: &str) -> Result<HashMap<String, Value>, PipelineError> {
    Ok(serde_json::from_str(json)?)
}
