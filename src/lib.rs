//! # stampa
//!
//! Typed-placeholder substitution for office-document templates.
//!
//! Templates carry `{{name:type,opt:val,...}}` spans; callers supply a
//! name -> [`Value`] map and, for image placeholders, a resource provider.
//! The engine rewrites the underlying container — a word-processing package
//! or flat HTML — with substituted values while preserving the surrounding
//! structure, and returns bytes ready for a downstream PDF renderer.
//!
//! ```no_run
//! use stampa::{PipelineBuilder, Value};
//! use std::collections::HashMap;
//!
//! let pipeline = PipelineBuilder::new().build();
//! let mut vars = HashMap::new();
//! vars.insert("name".to_string(), Value::from("Ann"));
//! let template = std::fs::read("invoice.docx")?;
//! let patched = pipeline.patch(&template, &vars)?;
//! std::fs::write("invoice-filled.docx", patched.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export foundation crates
pub use stampa_style as style;
pub use stampa_traits as traits;
pub use stampa_types as types;

// Re-export algorithm crates
pub use stampa_grammar as grammar;
pub use stampa_repair as repair;

// Re-export substitution backends
pub use stampa_docx as docx;
pub use stampa_html as html;

// Re-export platform crates
pub use stampa_resource as resource;

pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use error::PipelineError;
pub use grammar::{parse, Placeholder};
pub use pipeline::{
    variables_from_json, DocumentPipeline, PatchedDocument, PipelineBuilder, TemplateKind,
};
pub use traits::{InMemoryResourceProvider, ResourceError, ResourceProvider};
pub use types::{ImageSource, PatchReport, TypeTag, Value};
