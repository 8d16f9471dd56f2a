//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use mdfill_core::{TemplateStore, DEFAULT_TEMPLATE};
use mdfill_ooxml::{Theme, DEFAULT_OUTPUT};

use crate::pipeline::{load_record, ReportPipeline};

#[derive(Parser)]
#[command(name = "mdfill")]
#[command(author, version, about = "Fill a markup template and render it to DOCX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the placeholders a template expects
    Placeholders {
        /// Template file (defaults to the built-in project report)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Fill a template with JSON data and print or save the markup
    Fill {
        /// JSON file holding one data record
        #[arg(short, long)]
        data: PathBuf,

        /// Template file (defaults to the built-in project report)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output markup file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill a template with JSON data and render it to DOCX
    Render {
        /// JSON file holding one data record
        #[arg(short, long)]
        data: PathBuf,

        /// Template file (defaults to the built-in project report)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Theme TOML file
        #[arg(long)]
        theme: Option<PathBuf>,

        /// Output DOCX file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Author recorded in the document properties
        #[arg(long)]
        author: Option<String>,
    },

    /// Print the built-in template
    Template,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Placeholders { template } => {
            for name in placeholders_command(template.as_deref())? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Fill {
            data,
            template,
            output,
        } => {
            let filled = fill_command(&data, template.as_deref(), output.as_deref())?;
            if output.is_none() {
                print!("{}", filled);
            }
            Ok(())
        }
        Commands::Render {
            data,
            template,
            theme,
            output,
            author,
        } => render_command(
            &data,
            template.as_deref(),
            theme.as_deref(),
            author.as_deref(),
            &output,
        ),
        Commands::Template => {
            print!("{}", DEFAULT_TEMPLATE);
            Ok(())
        }
    }
}

/// Load a template store from a file, or the built-in template
pub fn load_store(template: Option<&Path>) -> Result<TemplateStore> {
    match template {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template: {}", path.display()))?;
            info!(path = %path.display(), "Loaded template");
            Ok(TemplateStore::with_template(text))
        }
        None => Ok(TemplateStore::new()),
    }
}

/// Placeholder names of the selected template, sorted
pub fn placeholders_command(template: Option<&Path>) -> Result<Vec<String>> {
    let store = load_store(template)?;
    Ok(store.placeholders().into_iter().collect())
}

/// Fill the selected template and optionally write the markup to `output`.
/// Returns the filled markup.
pub fn fill_command(data: &Path, template: Option<&Path>, output: Option<&Path>) -> Result<String> {
    let pipeline = ReportPipeline::new().with_store(load_store(template)?);
    let record = load_record(data)?;
    let filled = pipeline.fill(&record);

    if let Some(path) = output {
        fs::write(path, &filled)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        info!(path = %path.display(), "Wrote filled markup");
    }

    Ok(filled)
}

/// Fill the selected template, render it and save the DOCX to `output`
pub fn render_command(
    data: &Path,
    template: Option<&Path>,
    theme: Option<&Path>,
    author: Option<&str>,
    output: &Path,
) -> Result<()> {
    println!("mdfill v{}", mdfill_core::VERSION);
    println!("Rendering: {}", data.display());

    let theme = match theme {
        Some(path) => {
            println!("  Loading theme: {}", path.display());
            Theme::load(path)
                .with_context(|| format!("Failed to load theme: {}", path.display()))?
        }
        None => Theme::default(),
    };

    let mut pipeline = ReportPipeline::new()
        .with_store(load_store(template)?)
        .with_theme(theme);
    if let Some(author) = author {
        pipeline = pipeline.with_author(author);
    }

    println!("  Reading: {}", data.display());
    let record = load_record(data)?;
    println!("    {} fields supplied", record.len());

    println!("  Writing: {}", output.display());
    let bytes = pipeline.generate(&record, output)?;

    println!();
    println!("Render complete! ({} bytes)", bytes.len());
    Ok(())
}
