//! Package scaffold
//!
//! Builds every fixed part of a fresh DOCX package: content types,
//! relationships, styles, bullet numbering and document properties.
//! Only `word/document.xml` is left for the writer to produce.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use mdfill_ast::DocumentMeta;
use quick_xml::escape::escape;

use crate::archive::OoxmlArchive;
use crate::relationships::Relationships;
use crate::theme::{half_points, Theme};

/// WordprocessingML main namespace
pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Style ID for body paragraphs
pub const NORMAL_STYLE: &str = "Normal";

/// Style ID for bulleted list paragraphs
pub const LIST_BULLET_STYLE: &str = "ListBullet";

/// Numbering instance referenced by bulleted paragraphs
pub const BULLET_NUM_ID: u32 = 1;

/// Application name recorded in `docProps/app.xml`
const APPLICATION: &str = "mdfill";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Whether `c` may appear in XML 1.0 character data
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape text for element content or attribute values.
///
/// Control characters that XML 1.0 cannot represent are dropped.
pub fn xml_escape(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return escape(text);
    }

    let cleaned: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    Cow::Owned(escape(cleaned.as_str()).into_owned())
}

/// Create an archive holding every part except `word/document.xml`
pub fn scaffold(theme: &Theme, meta: &DocumentMeta, created: DateTime<Utc>) -> OoxmlArchive {
    let mut archive = OoxmlArchive::new();

    archive.set_string("[Content_Types].xml", content_types_xml());
    archive.set_string("_rels/.rels", package_rels().to_xml());
    archive.set_string("word/_rels/document.xml.rels", document_rels().to_xml());
    archive.set_string("word/styles.xml", styles_xml(theme));
    archive.set_string("word/numbering.xml", numbering_xml());
    archive.set_string("docProps/core.xml", core_xml(meta, created));
    archive.set_string("docProps/app.xml", app_xml());

    archive
}

fn content_types_xml() -> String {
    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push('\n');
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
            part, content_type
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// Package-level relationships (`_rels/.rels`)
pub fn package_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add("word/document.xml", Relationships::TYPE_OFFICE_DOCUMENT);
    rels.add("docProps/core.xml", Relationships::TYPE_CORE_PROPERTIES);
    rels.add("docProps/app.xml", Relationships::TYPE_EXTENDED_PROPERTIES);
    rels
}

/// Main document relationships (`word/_rels/document.xml.rels`)
pub fn document_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add("styles.xml", Relationships::TYPE_STYLES);
    rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
    rels
}

/// Style ID for a native heading level
pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", level)
}

/// Build `word/styles.xml` from the theme
pub fn styles_xml(theme: &Theme) -> String {
    let accent = theme.accent_hex();
    let font = xml_escape(&theme.font_family).into_owned();
    let body_size = half_points(theme.body_size);

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<w:styles xmlns:w=\"{}\">\n", WORDPROCESSING_NS));

    // Document defaults
    xml.push_str("<w:docDefaults>\n<w:rPrDefault>\n<w:rPr>\n");
    xml.push_str(&format!(
        "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:cs=\"{0}\"/>\n",
        font
    ));
    xml.push_str(&format!(
        "<w:sz w:val=\"{0}\"/>\n<w:szCs w:val=\"{0}\"/>\n",
        body_size
    ));
    xml.push_str("</w:rPr>\n</w:rPrDefault>\n");
    xml.push_str("<w:pPrDefault>\n<w:pPr>\n<w:spacing w:after=\"160\" w:line=\"259\" w:lineRule=\"auto\"/>\n</w:pPr>\n</w:pPrDefault>\n");
    xml.push_str("</w:docDefaults>\n");

    xml.push_str(&format!(
        "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"{}\">\n<w:name w:val=\"Normal\"/>\n<w:qFormat/>\n</w:style>\n",
        NORMAL_STYLE
    ));

    for (index, size) in theme.heading_sizes.iter().enumerate() {
        let level = index + 1;
        let size = half_points(*size);
        xml.push_str(&format!(
            "<w:style w:type=\"paragraph\" w:styleId=\"Heading{level}\">\n\
             <w:name w:val=\"heading {level}\"/>\n\
             <w:basedOn w:val=\"{NORMAL_STYLE}\"/>\n\
             <w:next w:val=\"{NORMAL_STYLE}\"/>\n\
             <w:qFormat/>\n\
             <w:pPr>\n<w:keepNext/>\n<w:spacing w:before=\"240\" w:after=\"80\"/>\n<w:outlineLvl w:val=\"{outline}\"/>\n</w:pPr>\n\
             <w:rPr>\n<w:b/>\n<w:color w:val=\"{accent}\"/>\n<w:sz w:val=\"{size}\"/>\n<w:szCs w:val=\"{size}\"/>\n</w:rPr>\n\
             </w:style>\n",
            outline = index,
        ));
    }

    xml.push_str(&format!(
        "<w:style w:type=\"paragraph\" w:styleId=\"{LIST_BULLET_STYLE}\">\n\
         <w:name w:val=\"List Bullet\"/>\n\
         <w:basedOn w:val=\"{NORMAL_STYLE}\"/>\n\
         <w:pPr>\n<w:numPr>\n<w:numId w:val=\"{BULLET_NUM_ID}\"/>\n</w:numPr>\n<w:ind w:left=\"720\" w:hanging=\"360\"/>\n<w:contextualSpacing/>\n</w:pPr>\n\
         </w:style>\n"
    ));

    xml.push_str(&format!(
        "<w:style w:type=\"table\" w:styleId=\"{id}\">\n\
         <w:name w:val=\"{name}\"/>\n\
         <w:tblPr>\n<w:tblBorders>\n\
         <w:top w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"{accent}\"/>\n\
         <w:bottom w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"{accent}\"/>\n\
         </w:tblBorders>\n<w:tblCellMar>\n<w:left w:w=\"108\" w:type=\"dxa\"/>\n<w:right w:w=\"108\" w:type=\"dxa\"/>\n</w:tblCellMar>\n</w:tblPr>\n\
         <w:tblStylePr w:type=\"firstRow\">\n<w:rPr>\n<w:b/>\n</w:rPr>\n\
         <w:tcPr>\n<w:tcBorders>\n<w:bottom w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"{accent}\"/>\n</w:tcBorders>\n</w:tcPr>\n\
         </w:tblStylePr>\n\
         </w:style>\n",
        id = xml_escape(&theme.table_style_id),
        name = xml_escape(&theme.table_style_name),
    ));

    xml.push_str("</w:styles>");
    xml
}

/// Build `word/numbering.xml` with a single-level bullet definition
pub fn numbering_xml() -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<w:numbering xmlns:w=\"{}\">\n", WORDPROCESSING_NS));
    xml.push_str("<w:abstractNum w:abstractNumId=\"0\">\n");
    xml.push_str("<w:multiLevelType w:val=\"singleLevel\"/>\n");
    xml.push_str("<w:lvl w:ilvl=\"0\">\n");
    xml.push_str("<w:start w:val=\"1\"/>\n");
    xml.push_str("<w:numFmt w:val=\"bullet\"/>\n");
    xml.push_str("<w:lvlText w:val=\"\u{2022}\"/>\n");
    xml.push_str("<w:lvlJc w:val=\"left\"/>\n");
    xml.push_str("<w:pPr>\n<w:ind w:left=\"720\" w:hanging=\"360\"/>\n</w:pPr>\n");
    xml.push_str("</w:lvl>\n");
    xml.push_str("</w:abstractNum>\n");
    xml.push_str(&format!(
        "<w:num w:numId=\"{}\">\n<w:abstractNumId w:val=\"0\"/>\n</w:num>\n",
        BULLET_NUM_ID
    ));
    xml.push_str("</w:numbering>");
    xml
}

/// Build `docProps/core.xml` from document metadata
pub fn core_xml(meta: &DocumentMeta, created: DateTime<Utc>) -> String {
    let timestamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        "<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n",
    );
    if let Some(title) = &meta.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>\n", xml_escape(title)));
    }
    if let Some(author) = &meta.author {
        xml.push_str(&format!(
            "<dc:creator>{}</dc:creator>\n",
            xml_escape(author)
        ));
    }
    xml.push_str(&format!(
        "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{0}</dcterms:created>\n\
         <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{0}</dcterms:modified>\n",
        timestamp
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_xml() -> String {
    format!(
        "{}\n<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\n\
         <Application>{} {}</Application>\n\
         </Properties>",
        XML_DECLARATION,
        APPLICATION,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 31, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_scaffold_parts() {
        let archive = scaffold(&Theme::default(), &DocumentMeta::default(), created());
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(archive.contains(part), "missing part {}", part);
        }
        assert!(!archive.contains("word/document.xml"));
    }

    #[test]
    fn test_styles_use_theme_sizes_and_color() {
        let styles = styles_xml(&Theme::default());
        assert!(styles.contains("w:styleId=\"Heading1\""));
        assert!(styles.contains("w:styleId=\"Heading3\""));
        assert!(!styles.contains("w:styleId=\"Heading4\""));
        assert!(styles.contains("<w:sz w:val=\"48\"/>"));
        assert!(styles.contains("<w:sz w:val=\"36\"/>"));
        assert!(styles.contains("<w:sz w:val=\"28\"/>"));
        assert!(styles.contains("<w:color w:val=\"2E4C6B\"/>"));
        assert!(styles.contains("w:styleId=\"LightShading-Accent1\""));
        assert!(styles.contains("<w:name w:val=\"Light Shading Accent 1\"/>"));
        assert!(styles.contains("w:styleId=\"ListBullet\""));
    }

    #[test]
    fn test_styles_follow_custom_theme() {
        let theme = Theme {
            heading_sizes: [30.0, 20.0, 16.0],
            accent_color: "#112233".to_string(),
            table_style_id: "PlainTable".to_string(),
            ..Theme::default()
        };
        let styles = styles_xml(&theme);
        assert!(styles.contains("<w:sz w:val=\"60\"/>"));
        assert!(styles.contains("<w:color w:val=\"112233\"/>"));
        assert!(styles.contains("w:styleId=\"PlainTable\""));
    }

    #[test]
    fn test_numbering_defines_bullet() {
        let numbering = numbering_xml();
        assert!(numbering.contains("<w:numFmt w:val=\"bullet\"/>"));
        assert!(numbering.contains("w:numId=\"1\""));
    }

    #[test]
    fn test_core_xml_metadata() {
        let meta = DocumentMeta {
            title: Some("Q4 <Report>".to_string()),
            author: Some("AI Assistant".to_string()),
        };
        let core = core_xml(&meta, created());
        assert!(core.contains("<dc:title>Q4 &lt;Report&gt;</dc:title>"));
        assert!(core.contains("<dc:creator>AI Assistant</dc:creator>"));
        assert!(core.contains("2024-12-31T09:05:00Z"));
    }

    #[test]
    fn test_xml_escape_drops_control_characters() {
        assert_eq!(xml_escape("Bell\u{7}here"), "Bellhere");
        assert_eq!(xml_escape("a\u{0}b\u{B}c\u{1F}"), "abc");
        assert_eq!(xml_escape("tab\tand\nline"), "tab\tand\nline");
        assert_eq!(xml_escape("<\u{C}&>"), "&lt;&amp;&gt;");
        assert!(matches!(xml_escape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_core_xml_drops_control_characters() {
        let meta = DocumentMeta {
            title: Some("Q4\u{8} Report".to_string()),
            author: Some("Ops\u{1B}Team".to_string()),
        };
        let core = core_xml(&meta, created());
        assert!(core.contains("<dc:title>Q4 Report</dc:title>"));
        assert!(core.contains("<dc:creator>OpsTeam</dc:creator>"));
    }

    #[test]
    fn test_core_xml_without_metadata() {
        let core = core_xml(&DocumentMeta::default(), created());
        assert!(!core.contains("dc:title"));
        assert!(!core.contains("dc:creator"));
    }

    #[test]
    fn test_relationship_parts() {
        let rels = Relationships::parse(package_rels().to_xml().as_bytes()).unwrap();
        assert_eq!(
            rels.target_of_type(Relationships::TYPE_OFFICE_DOCUMENT),
            Some("word/document.xml")
        );

        let rels = document_rels();
        assert_eq!(
            rels.target_of_type(Relationships::TYPE_NUMBERING),
            Some("numbering.xml")
        );
    }

    #[test]
    fn test_heading_style_id() {
        assert_eq!(heading_style_id(2), "Heading2");
    }
}
