//! Relationship parts (`*.rels`)
//!
//! OOXML packages link parts to each other through relationship files
//! that map IDs to targets. The generator only needs to build them, but
//! parsing is kept so generated packages can be inspected.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    /// Main document relationship type
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Core properties relationship type
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    /// Extended properties relationship type
    pub const TYPE_EXTENDED_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Numbering relationship type
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
}

/// A single relationship entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g. `rId1`)
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target part path
    pub target: String,
}

/// Ordered relationship list, serialized in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty relationships list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its generated ID
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.into(),
            target: target.into(),
        });
        id
    }

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().filter_map(|a| a.ok()) {
                        let value = attr.unescape_value().ok().map(|s| s.to_string());
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Target" => target = value,
                            b"Type" => rel_type = value,
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target)) = (id, target) {
                        entries.push(Relationship {
                            id,
                            rel_type: rel_type.unwrap_or_default(),
                            target,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { entries })
    }

    /// Serialize to a `.rels` part
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for rel in &self.entries {
            xml.push_str(&format!(
                "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                escape(rel.id.as_str()),
                escape(rel.rel_type.as_str()),
                escape(rel.target.as_str())
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Find the target of the first relationship with the given type
    pub fn target_of_type(&self, rel_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|r| r.rel_type == rel_type)
            .map(|r| r.target.as_str())
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_sequential_ids() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add("styles.xml", Relationships::TYPE_STYLES), "rId1");
        assert_eq!(
            rels.add("numbering.xml", Relationships::TYPE_NUMBERING),
            "rId2"
        );
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_roundtrip() {
        let mut rels = Relationships::new();
        rels.add("word/document.xml", Relationships::TYPE_OFFICE_DOCUMENT);
        rels.add("docProps/core.xml", Relationships::TYPE_CORE_PROPERTIES);

        let parsed = Relationships::parse(rels.to_xml().as_bytes()).unwrap();
        assert_eq!(parsed, rels);
        assert_eq!(
            parsed.target_of_type(Relationships::TYPE_CORE_PROPERTIES),
            Some("docProps/core.xml")
        );
    }

    #[test]
    fn test_escaping_in_serialization() {
        let mut rels = Relationships::new();
        rels.add("a&b.xml", Relationships::TYPE_STYLES);
        let xml = rels.to_xml();
        assert!(xml.contains("a&amp;b.xml"));

        let parsed = Relationships::parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed.iter().next().unwrap().target, "a&b.xml");
    }

    #[test]
    fn test_empty() {
        let rels = Relationships::new();
        assert!(rels.is_empty());
        let parsed = Relationships::parse(rels.to_xml().as_bytes()).unwrap();
        assert!(parsed.is_empty());
    }
}
