//! Inline drawing markup for injected images.

use stampa_types::ResolvedGeometry;

/// EMUs (English Metric Units) per pixel, the package's native length unit.
pub const EMU_PER_PIXEL: u64 = 9525;

/// An inline `<w:drawing>` referencing an image relationship, sized in EMUs.
///
/// `doc_pr_id` must be unique within one document; the patcher hands out a
/// fresh one per injected image.
pub fn inline_drawing(rel_id: &str, name: &str, geometry: &ResolvedGeometry, doc_pr_id: u32) -> String {
    let cx = geometry.width as u64 * EMU_PER_PIXEL;
    let cy = geometry.height as u64 * EMU_PER_PIXEL;
    format!(
        r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="{name}"/><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{rel_id}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        cx = cx,
        cy = cy,
        id = doc_pr_id,
        name = name,
        rel_id = rel_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_converts_to_emus() {
        let fragment = inline_drawing(
            "rId7",
            "photo",
            &ResolvedGeometry {
                width: 800,
                height: 450,
            },
            1,
        );
        assert!(fragment.contains(r#"cx="7620000""#)); // 800 * 9525
        assert!(fragment.contains(r#"cy="4286250""#)); // 450 * 9525
        assert!(fragment.contains(r#"r:embed="rId7""#));
        assert!(fragment.starts_with("<w:drawing>"));
        assert!(fragment.ends_with("</w:drawing>"));
    }
}
