//! Writer Output Tests
//!
//! Generate complete packages through the public API and inspect the parts.

use std::io::Cursor;

use mdfill_ast::{Block, Document, Inline, Table, TableCell, TableRow};
use mdfill_ooxml::{DocxWriter, OoxmlArchive, Relationships, Theme};
use quick_xml::events::Event;
use quick_xml::Reader;

fn generate(doc: &Document, theme: Theme) -> OoxmlArchive {
    let bytes = DocxWriter::with_theme(theme).generate(doc).unwrap();
    OoxmlArchive::from_reader(Cursor::new(bytes)).unwrap()
}

/// Paragraph style IDs of top-level body paragraphs, in document order
fn paragraph_styles(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut styles = Vec::new();
    let mut depth_in_table = 0usize;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.local_name().as_ref() == b"tbl" => {
                depth_in_table += 1;
                styles.push("<table>".to_string());
            }
            Event::End(e) if e.local_name().as_ref() == b"tbl" => depth_in_table -= 1,
            Event::Empty(e) if depth_in_table == 0 && e.local_name().as_ref() == b"pStyle" => {
                let value = e
                    .attributes()
                    .filter_map(|a| a.ok())
                    .find(|a| a.key.local_name().as_ref() == b"val")
                    .map(|a| String::from_utf8_lossy(&a.value).into_owned())
                    .unwrap();
                styles.push(value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    styles
}

fn report_document() -> Document {
    let mut doc = Document::new();
    doc.add_heading("Project Report", 1);
    doc.add_heading("Summary", 2);
    doc.add_paragraph(vec![Inline::bold("Status:"), Inline::text(" Green")]);
    doc.add_list(["Design done", "Build started"]);
    doc.add_table(Table {
        rows: vec![
            TableRow {
                cells: vec![TableCell::text("Risk"), TableCell::text("Owner")],
                is_header: true,
            },
            TableRow {
                cells: vec![TableCell::text("Scope creep"), TableCell::text("PM")],
                is_header: false,
            },
        ],
        columns: 2,
    });
    doc.add_heading("Appendix detail", 5);
    doc
}

#[test]
fn test_package_contains_all_parts() {
    let archive = generate(&report_document(), Theme::default());

    let parts: Vec<&str> = archive.file_list().collect();
    assert_eq!(
        parts,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "word/_rels/document.xml.rels",
            "word/document.xml",
            "word/numbering.xml",
            "word/styles.xml",
        ]
    );

    let content_types = archive.get_string("[Content_Types].xml").unwrap();
    assert!(content_types.contains("PartName=\"/word/document.xml\""));
    assert!(content_types.contains("PartName=\"/word/numbering.xml\""));
}

#[test]
fn test_relationships_resolve_to_parts() {
    let archive = generate(&report_document(), Theme::default());

    let package = Relationships::parse(archive.get("_rels/.rels").unwrap()).unwrap();
    let main = package
        .target_of_type(Relationships::TYPE_OFFICE_DOCUMENT)
        .unwrap();
    assert!(archive.contains(main));

    let document = Relationships::parse(archive.get("word/_rels/document.xml.rels").unwrap()).unwrap();
    for rel in document.iter() {
        assert!(archive.contains(&format!("word/{}", rel.target)), "{}", rel.target);
    }
}

#[test]
fn test_blocks_emitted_in_order() {
    let archive = generate(&report_document(), Theme::default());
    let xml = archive.get_string("word/document.xml").unwrap();

    assert_eq!(
        paragraph_styles(&xml),
        vec![
            "Heading1",
            "Heading2",
            "Normal",
            "ListBullet",
            "ListBullet",
            "<table>",
            "Heading3",
        ]
    );
}

#[test]
fn test_theme_drives_styles_part() {
    let theme = Theme::from_toml_str(
        r#"
accent_color = "1F6F43"
font_family = "Georgia"
heading_sizes = [30.0, 20.0, 15.0]
"#,
    )
    .unwrap();
    let archive = generate(&report_document(), theme);
    let styles = archive.get_string("word/styles.xml").unwrap();

    assert!(styles.contains("w:ascii=\"Georgia\""));
    assert!(styles.contains("<w:color w:val=\"1F6F43\"/>"));
    assert!(styles.contains("<w:sz w:val=\"60\"/>"));
    assert!(styles.contains("<w:sz w:val=\"30\"/>"));
    assert!(styles.contains("w:styleId=\"ListBullet\""));
}

#[test]
fn test_document_xml_is_well_formed() {
    let mut doc = report_document();
    doc.push(Block::Paragraph(mdfill_ast::Paragraph {
        inlines: vec![Inline::text("5 < 6 & \"quotes\"")],
        style_id: None,
    }));
    let archive = generate(&doc, Theme::default());

    for part in ["word/document.xml", "word/styles.xml", "word/numbering.xml", "docProps/core.xml"] {
        let xml = archive.get_string(part).unwrap();
        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("{} is not well-formed: {}", part, e),
            }
        }
    }
}
