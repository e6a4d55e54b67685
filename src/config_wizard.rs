//! Interactive configuration wizard for creating `verse-book.toml`.
//!
//! The wizard collects document metadata, the source directory, which books use the
//! structured line format, and the EPUB and PDF output options through a series of
//! prompts.

use crate::sinks::{EPUB, PDF};
use crate::source::{default_format_rules, format_for, list_books, BookFormat, FormatRule, Source};
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "verse-book.toml";

/// Complete configuration for a verse-book project.
///
/// A missing `[epub]` or `[pdf]` table disables that output.
#[derive(Debug, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub epub: Option<EPUB>,
    #[serde(default)]
    pub pdf: Option<PDF>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            source: Source::default(),
            epub: Some(EPUB::default()),
            pdf: Some(PDF::default()),
        }
    }
}

impl Configuration {
    /// Load the configuration at `path`, or the defaults if there is no such file.
    pub fn load(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            log::info!(
                "{} not found, rendering with the default configuration",
                path.display()
            );
            return Ok(Configuration::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML in {}", path.display()))
    }
}

/// Replace the extension of `outfile` with `ext` unless it already has it.
fn ensure_extension(outfile: String, ext: &str) -> PathBuf {
    let mut outfile = PathBuf::from(outfile);
    let current = outfile
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if current != *ext {
        outfile.set_extension(ext);
    }
    outfile
}

/// Run the interactive configuration wizard.
///
/// Prompts the user for document metadata and output options, then writes
/// `verse-book.toml` to the current directory.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };
    let defaults = Source::default();

    let directory: String = Input::with_theme(&theme)
        .with_prompt("Directory holding the book files")
        .default(defaults.directory.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain source directory")?;
    let directory = PathBuf::from(directory);
    if !directory.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", directory.display()));
    }

    let title: String = Input::with_theme(&theme)
        .with_prompt("Document title")
        .default(defaults.title.clone())
        .allow_empty(false)
        .interact()
        .with_context(|| "Failed to obtain title")?;
    let identifier: String = Input::with_theme(&theme)
        .with_prompt("Document identifier")
        .default(defaults.identifier.clone())
        .allow_empty(false)
        .interact()?;
    let language: String = Input::with_theme(&theme)
        .with_prompt("Language tag")
        .default(defaults.language.clone())
        .interact()?;
    let author: String = Input::with_theme(&theme)
        .with_prompt("Author")
        .default(defaults.author.clone())
        .interact()?;

    let books = list_books(&directory, &[])
        .with_context(|| format!("Failed to list books in {}", directory.display()))?;
    if books.is_empty() {
        println!(
            "{}: no .txt books found in {}",
            console::style("Warning").yellow(),
            directory.display()
        );
    }
    let book_files: Vec<String> = books.iter().map(|b| b.file_name()).collect();

    // pre-select the books the shipped rules already mark as structured
    let shipped_rules = default_format_rules();
    let preselected: Vec<bool> = book_files
        .iter()
        .map(|f| format_for(&shipped_rules, f) == BookFormat::Structured)
        .collect();
    let structured = if book_files.is_empty() {
        Vec::default()
    } else {
        MultiSelect::with_theme(&theme)
            .with_prompt("Which books use (book, chapter, verse, 'text') records?")
            .items(&book_files)
            .defaults(&preselected)
            .interact()?
    };
    let formats: Vec<FormatRule> = structured
        .into_iter()
        .map(|i| FormatRule::new(&book_files[i], BookFormat::Structured))
        .collect();

    let source = Source {
        directory,
        title,
        identifier,
        language,
        author,
        formats,
    };

    let mut epub = None;
    if Confirm::with_theme(&theme)
        .with_prompt("Do you want to render to EPUB?")
        .default(true)
        .interact()?
    {
        let defaults = EPUB::default();
        let outfile: String = Input::with_theme(&theme)
            .with_prompt("Output epub file")
            .default(defaults.outfile.display().to_string())
            .allow_empty(false)
            .interact()?;
        epub = Some(EPUB {
            outfile: ensure_extension(outfile, "epub"),
            ..defaults
        });
    }

    let mut pdf = None;
    if Confirm::with_theme(&theme)
        .with_prompt("Do you want to render to PDF?")
        .default(true)
        .interact()?
    {
        let defaults = PDF::default();
        let outfile: String = Input::with_theme(&theme)
            .with_prompt("Output pdf file")
            .default(defaults.outfile.display().to_string())
            .allow_empty(false)
            .interact()?;

        let font: String = Input::with_theme(&theme)
            .with_prompt("TrueType font file")
            .default(defaults.font.display().to_string())
            .allow_empty(false)
            .interact()?;
        let font = PathBuf::from(font);
        if !font.exists() {
            println!(
                "{}: {} doesn't exist yet, it must be there before rendering",
                console::style("Warning").yellow(),
                font.display()
            );
        }
        let font_name = font
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or(defaults.font_name.clone());

        let table_of_contents = Confirm::with_theme(&theme)
            .with_prompt("Add a table of contents?")
            .default(false)
            .interact()?;

        pdf = Some(PDF {
            outfile: ensure_extension(outfile, "pdf"),
            font,
            font_name,
            table_of_contents,
            ..defaults
        });
    }

    let config = Configuration { source, epub, pdf };

    let config =
        toml::to_string_pretty(&config).with_context(|| "Failed to convert configuration to TOML")?;

    let config_path = PathBuf::from(CONFIG_FILE);
    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{CONFIG_FILE} already exists, do you want to override it?"
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write(&config_path, config)
            .with_context(|| "Failed to write configuration file")?;
        println!("{CONFIG_FILE} written!");
    }

    Ok(())
}
