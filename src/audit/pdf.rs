//! Best-effort structural scan of a PDF file
//!
//! Produces the [`SourceDocument`](super::SourceDocument) handle the
//! layout auditor consumes: per-page character x-origins and font names
//! from the content streams, image counts from page XObjects, and a
//! rectangle-grid heuristic for tables. Full text comes from
//! `pdf-extract`. Failures are recorded per facet, never propagated as a
//! scan abort; only failing to open the document at all is an error.

use crate::audit::{PageScan, SourceDocument, TextChar};
use crate::error::{CvSenseError, Result};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::Path;

/// A page whose content stream draws at least this many rectangles is
/// counted as carrying a table (3x3 cell grid).
const GRID_MIN_RECTS: usize = 9;

pub fn scan_pdf(path: &Path) -> Result<SourceDocument> {
    let doc = Document::load(path)
        .map_err(|e| CvSenseError::PdfExtraction(format!("{}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let pages = doc
        .get_pages()
        .into_values()
        .map(|page_id| scan_page(&doc, page_id))
        .collect();

    let text = pdf_extract::extract_text(path).map_err(|e| e.to_string());

    Ok(SourceDocument {
        file_name,
        pages,
        text,
    })
}

fn scan_page(doc: &Document, page_id: ObjectId) -> PageScan {
    let fonts = page_fonts(doc, page_id);
    let images = count_images(doc, page_id);

    let (chars, tables) = match page_operations(doc, page_id) {
        Ok(operations) => {
            let (chars, rects) = walk_text_operations(&operations, &fonts);
            let tables = if rects >= GRID_MIN_RECTS { 1 } else { 0 };
            (Ok(chars), Ok(tables))
        }
        Err(reason) => (Err(reason.clone()), Err(reason)),
    };

    PageScan {
        chars,
        tables,
        images,
    }
}

fn page_operations(
    doc: &Document,
    page_id: ObjectId,
) -> std::result::Result<Vec<lopdf::content::Operation>, String> {
    let data = doc
        .get_page_content(page_id)
        .map_err(|e| format!("content stream unavailable: {}", e))?;
    let content = Content::decode(&data).map_err(|e| format!("content decode failed: {}", e))?;
    Ok(content.operations)
}

/// Track the text cursor through the content stream, emitting one
/// positioned character per shown glyph. The x coordinate is the position
/// of the run the glyph belongs to, which is what column binning needs.
fn walk_text_operations(
    operations: &[lopdf::content::Operation],
    fonts: &HashMap<Vec<u8>, String>,
) -> (Vec<TextChar>, usize) {
    let mut chars = Vec::new();
    let mut rects = 0usize;
    let mut x = 0.0f32;
    let mut current_font: Option<String> = None;

    for op in operations {
        match op.operator.as_str() {
            "BT" => x = 0.0,
            "Tm" => {
                if op.operands.len() == 6 {
                    if let Some(tx) = operand_number(&op.operands[4]) {
                        x = tx;
                    }
                }
            }
            "Td" | "TD" => {
                if let Some(dx) = op.operands.first().and_then(operand_number) {
                    x += dx;
                }
            }
            "Tf" => {
                if let Some(Ok(name)) = op.operands.first().map(|o| o.as_name()) {
                    current_font = fonts.get(name).cloned();
                }
            }
            "Tj" | "'" | "\"" => {
                for operand in &op.operands {
                    if let Object::String(bytes, _) = operand {
                        emit_chars(bytes, x, &current_font, &mut chars);
                    }
                }
            }
            "TJ" => {
                for operand in &op.operands {
                    if let Object::Array(items) = operand {
                        for item in items {
                            if let Object::String(bytes, _) = item {
                                emit_chars(bytes, x, &current_font, &mut chars);
                            }
                        }
                    }
                }
            }
            "re" => rects += 1,
            _ => {}
        }
    }

    (chars, rects)
}

fn emit_chars(bytes: &[u8], x: f32, font: &Option<String>, out: &mut Vec<TextChar>) {
    for _ in bytes {
        out.push(TextChar {
            x,
            font_name: font.clone(),
        });
    }
}

fn operand_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Map font resource names (e.g. "F1") to their BaseFont family.
fn page_fonts(doc: &Document, page_id: ObjectId) -> HashMap<Vec<u8>, String> {
    let mut fonts = HashMap::new();
    for dict in resource_dicts(doc, page_id) {
        let Some(font_dict) = dict.get(b"Font").ok().and_then(|o| resolve_dict(doc, o)) else {
            continue;
        };
        for (name, value) in font_dict.iter() {
            if let Some(font) = resolve_dict(doc, value) {
                if let Ok(base) = font.get(b"BaseFont").and_then(|o| o.as_name()) {
                    fonts.insert(name.clone(), String::from_utf8_lossy(base).into_owned());
                }
            }
        }
    }
    fonts
}

fn count_images(doc: &Document, page_id: ObjectId) -> std::result::Result<usize, String> {
    let mut images = 0;
    for dict in resource_dicts(doc, page_id) {
        let xobjects = match dict.get(b"XObject") {
            Ok(obj) => resolve_dict(doc, obj)
                .ok_or_else(|| "XObject resource dictionary unresolvable".to_string())?,
            Err(_) => continue,
        };
        for (name, value) in xobjects.iter() {
            let subtype = match value {
                Object::Reference(id) => doc
                    .get_object(*id)
                    .map_err(|e| {
                        format!("XObject {} unresolvable: {}", String::from_utf8_lossy(name), e)
                    })?
                    .as_stream()
                    .ok()
                    .and_then(|s| s.dict.get(b"Subtype").ok())
                    .and_then(|o| o.as_name().ok()),
                Object::Stream(s) => s.dict.get(b"Subtype").ok().and_then(|o| o.as_name().ok()),
                _ => None,
            };
            if subtype == Some(b"Image".as_slice()) {
                images += 1;
            }
        }
    }
    Ok(images)
}

fn resource_dicts(doc: &Document, page_id: ObjectId) -> Vec<&Dictionary> {
    let (inline, referenced) = doc.get_page_resources(page_id);
    let mut dicts = Vec::new();
    if let Some(dict) = inline {
        dicts.push(dict);
    }
    for id in referenced {
        if let Some(dict) = doc.get_object(id).ok().and_then(|o| o.as_dict().ok()) {
            dicts.push(dict);
        }
    }
    dicts
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_object(*id).ok().and_then(|o| o.as_dict().ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::LayoutAuditor;
    use lopdf::content::Operation;
    use lopdf::{dictionary, Stream};

    fn write_single_page_pdf(path: &Path) {
        write_single_page_pdf_with_xobjects(path, None);
    }

    fn write_single_page_pdf_with_xobjects(path: &Path, xobjects: Option<Dictionary>) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let mut resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        };
        if let Some(xobjects) = xobjects {
            resources.set("XObject", Object::Dictionary(xobjects));
        }
        let resources_id = doc.add_object(resources);

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal("Hello")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", catalog_id);

        doc.save(path).unwrap();
    }

    #[test]
    fn test_scan_missing_file_errors() {
        let result = scan_pdf(Path::new("/nonexistent/cv.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_generated_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        write_single_page_pdf(&path);

        let source = scan_pdf(&path).unwrap();
        assert_eq!(source.file_name, "sample.pdf");
        assert_eq!(source.pages.len(), 1);

        let page = &source.pages[0];
        let chars = page.chars.as_ref().unwrap();
        assert_eq!(chars.len(), "Hello".len());
        assert_eq!(chars[0].x, 72.0);
        assert_eq!(chars[0].font_name.as_deref(), Some("Helvetica"));
        assert_eq!(page.tables, Ok(0));
        assert_eq!(page.images, Ok(0));
    }

    #[test]
    fn test_dangling_image_reference_degrades_image_facet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        write_single_page_pdf_with_xobjects(
            &path,
            Some(dictionary! { "Im1" => Object::Reference((9999, 0)) }),
        );

        let source = scan_pdf(&path).unwrap();
        let page = &source.pages[0];
        assert!(page.images.is_err());
        assert!(page.chars.is_ok());

        // the auditor keeps going: zero images counted, failure surfaced
        let report = LayoutAuditor::new().audit(&source);
        assert_eq!(report.images, 0);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Page 1") && w.contains("image scan failed")));
    }

    #[test]
    fn test_scan_feeds_auditor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        write_single_page_pdf(&path);

        let source = scan_pdf(&path).unwrap();
        let report = LayoutAuditor::new().audit(&source);

        assert_eq!(report.pages, 1);
        assert!(!report.multi_column);
        // a five-character page has no sections or contact info
        assert!(report.warnings.iter().any(|w| w.contains("Contact info")));
    }
}
