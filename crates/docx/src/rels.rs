//! Relationship and content-type bookkeeping for injected media.

use crate::error::PatchError;

const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const MINIMAL_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#;

/// The relationships part paired to the body, edited textually so every
/// untouched entry round-trips byte-for-byte.
#[derive(Debug)]
pub struct Relationships {
    xml: String,
}

impl Relationships {
    pub fn new(xml: String) -> Self {
        Self { xml }
    }

    /// Number of relationship entries currently present.
    pub fn count(&self) -> usize {
        self.xml.matches("<Relationship ").count()
    }

    /// A fresh identifier derived by counting existing entries, bumped past
    /// any collision with ids already in the part.
    pub fn next_free_id(&self) -> String {
        let mut n = self.count() + 1;
        while self.xml.contains(&format!("Id=\"rId{}\"", n)) {
            n += 1;
        }
        format!("rId{}", n)
    }

    /// Append one image relationship entry before the closing tag.
    pub fn append_image(&mut self, id: &str, target: &str) -> Result<(), PatchError> {
        let Some(close) = self.xml.rfind("</Relationships>") else {
            return Err(PatchError::RelationshipWrite(
                "relationships part has no closing </Relationships> tag".to_string(),
            ));
        };
        let entry = format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, IMAGE_REL_TYPE, target
        );
        self.xml.insert_str(close, &entry);
        Ok(())
    }

    pub fn into_xml(self) -> String {
        self.xml
    }
}

/// The `[Content_Types].xml` registry. Injected media needs a `<Default>`
/// entry for its extension or the package will not open.
#[derive(Debug)]
pub struct ContentTypes {
    xml: String,
}

impl ContentTypes {
    pub fn new(xml: Option<String>) -> Self {
        Self {
            xml: xml.unwrap_or_else(|| MINIMAL_CONTENT_TYPES.to_string()),
        }
    }

    /// Register a default content type for an extension if absent.
    pub fn ensure_default(&mut self, extension: &str, content_type: &str) {
        if self.xml.contains(&format!("Extension=\"{}\"", extension)) {
            return;
        }
        let Some(close) = self.xml.rfind("</Types>") else {
            return;
        };
        let entry = format!(
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            extension, content_type
        );
        self.xml.insert_str(close, &entry);
    }

    pub fn into_xml(self) -> String {
        self.xml
    }
}
