//! Smoke tests driving the real lopdf and pdf-extract backends over a
//! small generated document, so the per-page segmentation and the
//! estimated-page chunking are exercised against actual PDF bytes.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use pdfsieve_core::backends::{LopdfBackend, PdfExtractBackend};
use pdfsieve_core::progress::NullSink;
use pdfsieve_core::{
    ExtractionBackend, Extractor, Method, MethodSelector, PageLabel, PdfDocument, QualityPolicy,
};

/// Write a two-page PDF with one line of Courier text per page.
fn write_fixture(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for line in ["First page of the fixture", "Second page of the fixture"] {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn lopdf_backend_segments_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.pdf");
    write_fixture(&path);

    let doc = PdfDocument::open(&path).unwrap();
    let segments = LopdfBackend::new().extract(&doc, &NullSink).unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].label, PageLabel::Number(1));
    assert_eq!(segments[1].label, PageLabel::Number(2));
    assert!(segments[0].text.as_deref().unwrap().contains("First page"));
    assert!(segments[1].text.as_deref().unwrap().contains("Second page"));
}

#[test]
fn pdf_extract_backend_yields_estimated_segments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.pdf");
    write_fixture(&path);

    let doc = PdfDocument::open(&path).unwrap();
    let segments = PdfExtractBackend::new().extract(&doc, &NullSink).unwrap();

    assert!(!segments.is_empty());
    assert!(segments.iter().all(|s| s.label == PageLabel::Estimated));
    let joined: String = segments
        .iter()
        .filter_map(|s| s.text.clone())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(joined.contains("fixture"));
}

#[test]
fn extractor_runs_real_backends_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.pdf");
    write_fixture(&path);

    let doc = PdfDocument::open(&path).unwrap();
    // Two lines of real content; lower the threshold so the fixture passes
    let extractor = Extractor::new(vec![
        Box::new(LopdfBackend::new()),
        Box::new(PdfExtractBackend::new()),
    ])
    .with_policy(QualityPolicy::new().with_min_content_lines(0));

    let extraction = extractor
        .extract(&doc, MethodSelector::Auto, &NullSink)
        .unwrap();
    assert_eq!(extraction.method, Method::Lopdf);

    let text = extraction.to_text();
    assert!(text.starts_with("=== Page 1 ===\n"));
    assert!(text.contains("=== Page 2 ===\n"));
}
