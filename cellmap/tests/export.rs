use cellmap::config::{EXPORT_FILENAME, EXPORT_MIME};
use cellmap::surface::ExportSink;
use cellmap::svg::{standalone_document, XML_PROLOG};
use cellmap::Diagram;

#[derive(Default)]
struct Capture {
    offers: Vec<(String, String, String)>,
}

impl ExportSink for Capture {
    fn offer(&mut self, document: &str, filename: &str, mime: &str) {
        self.offers.push((document.to_string(), filename.to_string(), mime.to_string()));
    }
}

// Minimal well-formedness check: balanced tags, quoted attributes, single root.
fn assert_well_formed(doc: &str) {
    let body = doc.strip_prefix(XML_PROLOG).expect("xml declaration");
    let mut stack: Vec<String> = Vec::new();
    let mut roots = 0;
    let mut rest = body;
    while let Some(start) = rest.find('<') {
        assert!(rest[..start].trim().is_empty() || !stack.is_empty(), "text outside root");
        let end = rest[start..].find('>').expect("unterminated tag") + start;
        let tag = &rest[start + 1..end];
        assert_eq!(tag.matches('"').count() % 2, 0, "unbalanced quotes in <{}>", tag);
        if let Some(name) = tag.strip_prefix('/') {
            assert_eq!(stack.pop().as_deref(), Some(name.trim()), "mismatched close");
        } else {
            let name = tag.split_whitespace().next().unwrap_or("").trim_end_matches('/').to_string();
            if stack.is_empty() {
                roots += 1;
            }
            if !tag.ends_with('/') {
                stack.push(name);
            }
        }
        rest = &rest[end + 1..];
    }
    assert!(stack.is_empty(), "unclosed {:?}", stack);
    assert_eq!(roots, 1);
}

#[test]
fn export_is_standalone_svg() {
    let mut d = Diagram::new();
    d.add_point(100.0, 120.0);
    d.add_point(500.0, 300.0);
    let doc = d.export_svg();
    assert!(doc.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>"));
    assert_eq!(doc.matches("xmlns=\"http://www.w3.org/2000/svg\"").count(), 1);
    assert_eq!(doc.matches("xmlns:xlink=\"http://www.w3.org/1999/xlink\"").count(), 1);
    assert_eq!(doc.matches("<path ").count(), 2);
    assert_eq!(doc.matches("<circle ").count(), 2);
    assert_well_formed(&doc);
}

#[test]
fn empty_export_is_valid() {
    let d = Diagram::new();
    let doc = d.export_svg();
    assert_well_formed(&doc);
    assert!(!doc.contains("<path"));
}

#[test]
fn export_does_not_mutate() {
    let mut d = Diagram::new();
    d.add_point(10.0, 10.0);
    let ver = d.geom_version();
    let before = d.to_json_value();
    let _ = d.export_svg();
    assert_eq!(d.geom_version(), ver);
    assert_eq!(d.to_json_value(), before);
}

#[test]
fn sink_receives_filename_and_mime() {
    let mut d = Diagram::new();
    d.add_point(10.0, 10.0);
    let mut sink = Capture::default();
    d.export(&mut sink);
    assert_eq!(sink.offers.len(), 1);
    let (doc, name, mime) = &sink.offers[0];
    assert_eq!(name, EXPORT_FILENAME);
    assert_eq!(name, "voronoi_cells.svg");
    assert_eq!(mime, EXPORT_MIME);
    assert_eq!(doc, &d.export_svg());
}

#[test]
fn reexport_does_not_duplicate_namespaces() {
    let d = Diagram::new();
    let doc = d.export_svg();
    let again = standalone_document(doc.strip_prefix(XML_PROLOG).unwrap());
    assert_eq!(again, doc);
}
