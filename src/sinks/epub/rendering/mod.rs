//! EPUB rendering orchestration.
//!
//! Uses the `epub-builder` crate which handles the EPUB packaging requirements (OPF
//! manifest, navigation document, ZIP structure with proper MIME type). Each book becomes
//! a separate XHTML document; the table of contents is flat, one entry per book.
//!
//! Output is reproducible: the unique identifier is a name-based UUID derived from the
//! configured identifier, the modification date is pinned, and the archive entries carry
//! a fixed timestamp (see [`StableZip`]).
//!
//! `epub-builder` reports errors as `eyre::Report`, which are converted to `anyhow` at
//! every call.

mod book;

use super::archive::StableZip;
use super::config::{RenderStats, EPUB};
use super::styles;
use crate::sinks::{Book, Render};
use crate::source::Source;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use epub_builder::{EpubBuilder, EpubContent, EpubVersion};
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use uuid::Uuid;

/// 1980-01-01T00:00:00Z, the same instant the archive entries are stamped with.
const MODIFIED_TIMESTAMP: i64 = 315_532_800;

fn modified_date() -> DateTime<Utc> {
    DateTime::from_timestamp(MODIFIED_TIMESTAMP, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

fn from_eyre(e: eyre::Report) -> anyhow::Error {
    anyhow!("{e:#}")
}

impl EPUB {
    /// Write the EPUB for `books` into `writer`.
    pub fn write<W: Write>(
        &self,
        source: &Source,
        books: &[Book],
        progress: &ProgressBar,
        writer: W,
    ) -> Result<RenderStats> {
        progress.set_message("Generating EPUB...");

        let zip = StableZip::new()
            .map_err(from_eyre)
            .with_context(|| "Failed to create ZIP archive for EPUB")?;
        let mut builder = EpubBuilder::new(zip)
            .map_err(from_eyre)
            .with_context(|| "Failed to build builder")?;
        builder.epub_version(EpubVersion::V30);
        builder.set_uuid(Uuid::new_v5(
            &Uuid::NAMESPACE_URL,
            source.identifier.as_bytes(),
        ));
        builder.set_modified_date(modified_date());

        builder
            .metadata("title", &source.title)
            .map_err(from_eyre)
            .with_context(|| "Failed to set title metadata")?;
        builder
            .metadata("lang", &source.language)
            .map_err(from_eyre)
            .with_context(|| "Failed to set language metadata")?;
        builder
            .metadata("author", &source.author)
            .map_err(from_eyre)
            .with_context(|| format!("Failed to add author metadata for {}", source.author))?;
        builder
            .metadata("generator", "verse-book")
            .map_err(from_eyre)
            .with_context(|| "Failed to set generator metadata")?;
        builder
            .metadata("toc_name", &self.toc_name)
            .map_err(from_eyre)
            .with_context(|| "Failed to set table of contents name")?;

        builder
            .stylesheet(styles::generate_stylesheet().as_bytes())
            .map_err(from_eyre)
            .with_context(|| "Failed to add stylesheet")?;

        let mut used_names: HashSet<String> = HashSet::new();
        let mut document_count = 0;
        for entry in books {
            progress.set_message(entry.title.clone());
            let filename = book::document_name(&entry.title, &mut used_names);
            let html = book::render(entry, &source.language);
            builder
                .add_content(EpubContent::new(&filename, html.as_bytes()).title(&entry.title))
                .map_err(from_eyre)
                .with_context(|| format!("Failed to add book to EPUB: {}", entry.title))?;
            document_count += 1;
            progress.inc(1);
        }

        builder
            .generate(writer)
            .map_err(from_eyre)
            .with_context(|| "Failed to generate EPUB file")?;

        progress.finish_with_message("EPUB generated");

        Ok(RenderStats { document_count })
    }
}

impl Render for EPUB {
    type Stats = RenderStats;

    /// Render the books to the configured EPUB file.
    fn render(
        &self,
        source: &Source,
        books: &[Book],
        progress: &ProgressBar,
    ) -> Result<RenderStats> {
        let output_file = File::create(&self.outfile)
            .with_context(|| format!("Failed to create EPUB file: {}", self.outfile.display()))?;
        let mut writer = BufWriter::new(output_file);
        let stats = self.write(source, books, progress, &mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write EPUB file: {}", self.outfile.display()))?;
        log::info!("wrote {}", self.outfile.display());
        Ok(stats)
    }
}
