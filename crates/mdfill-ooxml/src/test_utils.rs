//! Shared test utilities for mdfill-ooxml
//!
//! Helpers for reading generated packages back in unit tests.

use std::io::Cursor;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::OoxmlArchive;

/// Read a part out of generated DOCX bytes
pub fn extract_file(docx: &[u8], path: &str) -> Option<String> {
    let archive = OoxmlArchive::from_reader(Cursor::new(docx)).ok()?;
    archive.get_string(path)
}

/// Read `word/document.xml` out of generated DOCX bytes
pub fn extract_document_xml(docx: &[u8]) -> String {
    extract_file(docx, "word/document.xml").expect("package has word/document.xml")
}

/// Count elements with the given local name, ignoring namespace prefixes
pub fn count_elements(xml: &str, local_name: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == local_name.as_bytes() =>
            {
                count += 1
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed XML in test fixture: {}", e),
            _ => {}
        }
    }

    count
}

#[test]
fn test_count_elements_ignores_prefix_and_similar_names() {
    let xml = r#"<w:body xmlns:w="x"><w:p><w:pPr/></w:p><w:p/></w:body>"#;
    assert_eq!(count_elements(xml, "p"), 2);
    assert_eq!(count_elements(xml, "pPr"), 1);
}
