//! The multi-part archive backing a word-processing template.
//!
//! Parts are kept as an ordered list of `(name, bytes)` so the rewritten
//! package preserves the original entry order. Each patch operation owns its
//! container exclusively; nothing is shared across concurrent operations.

use crate::error::PatchError;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// The main body markup part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// The relationships part paired to the body part.
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
/// The package-wide content type registry.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
/// Prefix under which injected media lands.
pub const MEDIA_DIR: &str = "word/media/";

#[derive(Debug)]
pub struct Container {
    parts: Vec<(String, Vec<u8>)>,
}

impl Container {
    /// Read every entry of the archive into memory, preserving order.
    pub fn open(bytes: &[u8]) -> Result<Self, PatchError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| PatchError::ContainerOpen(e.to_string()))?;
        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| PatchError::ContainerOpen(e.to_string()))?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut data)
                .map_err(|e| PatchError::ContainerOpen(e.to_string()))?;
            parts.push((name, data));
        }
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// The body part decoded as UTF-8. A body that is not valid UTF-8 counts
    /// as a corrupt container.
    pub fn part_utf8(&self, name: &str) -> Result<Option<String>, PatchError> {
        match self.part(name) {
            None => Ok(None),
            Some(data) => String::from_utf8(data.to_vec())
                .map(Some)
                .map_err(|_| PatchError::ContainerOpen(format!("part '{}' is not valid UTF-8", name))),
        }
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts.iter().any(|(n, _)| n == name)
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(n, _)| n.as_str())
    }

    /// Replace an existing part or append a new one at the end.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = data,
            None => self.parts.push((name.to_string(), data)),
        }
    }

    /// Serialize back to archive bytes. Media entries are stored uncompressed
    /// (they are already compressed image formats); everything else deflates.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PatchError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in &self.parts {
            let options = if name.starts_with(MEDIA_DIR) {
                stored
            } else {
                deflated
            };
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| PatchError::Serialize(e.to_string()))?;
            writer
                .write_all(data)
                .map_err(|e| PatchError::Serialize(e.to_string()))?;
        }
        let cursor = writer
            .finish()
            .map_err(|e| PatchError::Serialize(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}
