//! Shared fixtures: minimal in-memory word-processing packages and images.

use stampa::docx::{Container, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART};
use stampa::Value;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#;

pub const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

pub fn document_xml(body_text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p></w:body></w:document>"#,
        body_text
    )
}

pub fn build_docx(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A minimal but complete package: content types, body rels, one paragraph.
pub fn minimal_docx(body_text: &str) -> Vec<u8> {
    build_docx(&[
        (CONTENT_TYPES_PART, CONTENT_TYPES_XML),
        (DOCUMENT_RELS_PART, RELS_XML),
        (DOCUMENT_PART, &document_xml(body_text)),
    ])
}

/// Valid PNG bytes with known natural dimensions.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// The body part of a patched package, decoded.
pub fn body_of(package: &[u8]) -> String {
    let container = Container::open(package).unwrap();
    container.part_utf8(DOCUMENT_PART).unwrap().unwrap()
}

pub fn vars(pairs: Vec<(&str, Value)>) -> HashMap<String, Value> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
