//! PDF rendering orchestration.
//!
//! Every book is turned into flowables and laid out on its own run of pages, starting on
//! a fresh page. The document outline gets one entry per book pointing at its first page.
//!
//! ## Table of Contents
//!
//! When enabled, the contents pages are laid out after the books, once every book's first
//! page is known, and then placed in front of them. Outline entries are shifted past the
//! contents pages.
//!
//! ## Document Metadata
//!
//! Title and author come from the source configuration; the creator field identifies
//! verse-book as the generating tool.

mod book;
mod table_of_contents;

use crate::sinks::pdf::config::{RenderStats, PDF};
use crate::sinks::pdf::document::{self, Info};
use crate::sinks::pdf::encoding;
use crate::sinks::pdf::fonts::LoadedFont;
use crate::sinks::pdf::layout::{self, DocumentLayout, Frame, Metrics, PageLayout};
use crate::sinks::{Book, Render};
use crate::source::Source;
use anyhow::{Context, Result};
use indicatif::ProgressBar;

impl PDF {
    /// Lay out `books` with `metrics`, including the table of contents when enabled.
    pub(crate) fn layout<M: Metrics + ?Sized>(
        &self,
        books: &[Book],
        metrics: &M,
        progress: &ProgressBar,
    ) -> DocumentLayout {
        let frame = Frame::with_margin(self.page_size(), self.margin());

        let mut body = DocumentLayout::default();
        for entry in books {
            progress.set_message(entry.title.clone());
            let flowables = book::flowables(self, entry);
            body.append(layout::layout(&flowables, self.page_size(), frame, metrics));
            progress.inc(1);
        }
        if body.pages.is_empty() {
            log::warn!("no books to render, the PDF will have a single blank page");
            body.pages.push(PageLayout::default());
        }

        if !self.table_of_contents {
            return body;
        }

        progress.set_message("Table of contents...");
        let mut document = table_of_contents::render(self, &body.bookmarks, frame, metrics);
        document.append(body);
        document
    }

    /// Render `books` to PDF bytes with the configured font.
    pub fn render_to_bytes(
        &self,
        source: &Source,
        books: &[Book],
        progress: &ProgressBar,
    ) -> Result<(Vec<u8>, RenderStats)> {
        let font = LoadedFont::load(&self.font, &self.font_name)
            .with_context(|| format!("Failed to load font '{}'", self.font_name))?;

        let unencodable_chars: usize = books
            .iter()
            .map(|book| {
                encoding::unencodable(&book.title) + encoding::unencodable(&book.text.plain_text())
            })
            .sum();
        if unencodable_chars > 0 {
            log::warn!(
                "{unencodable_chars} character(s) can't be encoded for the PDF font and will print as '?'"
            );
        }

        let layout = self.layout(books, &font, progress);

        progress.set_message("Writing PDF...");
        let info = Info {
            title: source.title.clone(),
            author: source.author.clone(),
            creator: concat!("verse-book v", env!("CARGO_PKG_VERSION")).to_string(),
        };
        let bytes = document::write(&layout, &font, &info, self.page_size());

        let stats = RenderStats {
            page_count: layout.pages.len(),
            book_count: books.len(),
            unencodable_chars,
        };
        Ok((bytes, stats))
    }
}

impl Render for PDF {
    type Stats = RenderStats;

    fn render(
        &self,
        source: &Source,
        books: &[Book],
        progress: &ProgressBar,
    ) -> Result<RenderStats> {
        let (bytes, stats) = self.render_to_bytes(source, books, progress)?;
        std::fs::write(&self.outfile, bytes)
            .with_context(|| format!("Failed to write PDF file: {}", self.outfile.display()))?;
        progress.finish_with_message("PDF generated");
        log::info!("wrote {}", self.outfile.display());
        Ok(stats)
    }
}
