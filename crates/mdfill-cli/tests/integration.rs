//! Integration tests for mdfill CLI
//!
//! These drive the command functions end to end:
//! JSON data -> filled markup -> DOCX package on disk

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use mdfill_cli::{fill_command, load_record, placeholders_command, render_command, ReportPipeline};
use mdfill_core::TO_BE_FILLED;
use mdfill_ooxml::OoxmlArchive;
use tempfile::TempDir;

fn demo_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/project_report.json")
}

fn read_document_xml(path: &std::path::Path) -> String {
    let bytes = fs::read(path).expect("Failed to read output");
    let archive = OoxmlArchive::from_reader(Cursor::new(bytes)).expect("Output is not a zip");
    archive
        .get_string("word/document.xml")
        .expect("Missing word/document.xml")
}

#[test]
fn test_render_demo_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("project_report.docx");

    render_command(&demo_data(), None, None, None, &output).expect("Render failed");

    let xml = read_document_xml(&output);
    assert!(xml.contains("Q4 2024 Project Report"));
    assert!(xml.contains("Infrastructure Modernization"));
    assert!(xml.contains("Carol Davis"));
    assert!(xml.contains("Technical Debt"));
    assert!(xml.contains("<w:tbl>"));
    assert!(!xml.contains(TO_BE_FILLED));
    assert!(!xml.contains("{{"));
}

#[test]
fn test_render_with_custom_template_and_theme() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("brief.md");
    let theme = temp_dir.path().join("theme.toml");
    let data = temp_dir.path().join("data.json");
    let output = temp_dir.path().join("brief.docx");

    fs::write(&template, "# {{title}}\n\n{{notes}}\n\n| Item | Cost |\n|---|---|\n{{costs}}\n").unwrap();
    fs::write(&theme, "accent_color = \"AA3300\"\ntable_style_id = \"BriefTable\"\n").unwrap();
    fs::write(
        &data,
        r#"{"title": "Brief", "notes": ["one", "two"], "costs": "| Cloud | $10 |"}"#,
    )
    .unwrap();

    render_command(&data, Some(&template), Some(&theme), Some("Ops Team"), &output).unwrap();

    let archive = OoxmlArchive::from_reader(Cursor::new(fs::read(&output).unwrap())).unwrap();
    let xml = archive.get_string("word/document.xml").unwrap();
    assert!(xml.contains("<w:tblStyle w:val=\"BriefTable\"/>"));
    assert_eq!(xml.matches("<w:numPr>").count(), 2);

    let styles = archive.get_string("word/styles.xml").unwrap();
    assert!(styles.contains("<w:color w:val=\"AA3300\"/>"));

    let core = archive.get_string("docProps/core.xml").unwrap();
    assert!(core.contains("<dc:title>Brief</dc:title>"));
    assert!(core.contains("<dc:creator>Ops Team</dc:creator>"));
}

#[test]
fn test_render_missing_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.docx");

    let missing = temp_dir.path().join("nope.json");
    let err = render_command(&missing, None, None, None, &output).unwrap_err();
    assert!(err.to_string().contains("Failed to read data file"));
    assert!(!output.exists());
}

#[test]
fn test_render_invalid_theme() {
    let temp_dir = TempDir::new().unwrap();
    let theme = temp_dir.path().join("theme.toml");
    fs::write(&theme, "accent_color = \"blue\"\n").unwrap();

    let err = render_command(
        &demo_data(),
        None,
        Some(&theme),
        None,
        &temp_dir.path().join("o.docx"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to load theme"));
}

#[test]
fn test_fill_writes_markup() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("filled.md");

    let filled = fill_command(&demo_data(), None, Some(&output)).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), filled);
    assert!(filled.starts_with("# Q4 2024 Project Report\n"));
    assert!(filled.contains("- **Infrastructure:** $200,000\n- **Development:** $150,000"));
    assert!(filled.contains("*Prepared by: Project Office*"));
}

#[test]
fn test_placeholders_of_builtin_template() {
    let names = placeholders_command(None).unwrap();

    assert_eq!(names.len(), 22);
    assert!(names.contains(&"generation_date".to_string()));
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_placeholders_of_custom_template() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("t.md");
    fs::write(&template, "{{b}} {{a}} {{b}} {{not valid}}").unwrap();

    assert_eq!(placeholders_command(Some(&template)).unwrap(), vec!["a", "b"]);
}

#[test]
fn test_demo_record_covers_builtin_template() {
    let record = load_record(demo_data()).unwrap();
    let pipeline = ReportPipeline::new();

    for name in pipeline.store().placeholders() {
        if name != "generation_date" {
            assert!(record.contains_key(&name), "demo data lacks {}", name);
        }
    }
}
