//! Verse extraction from book files.
//!
//! Each line of a book file holds one verse record. Two layouts exist:
//!
//! - generic: `<verse> '<text>'`
//! - structured: `(<book>, <chapter>, <verse>, '<text>')`
//!
//! Both produce a [`BookText`]: verse text joined by single spaces, split into typed
//! segments at chapter boundaries. Lines that don't fit the layout are dropped without
//! aborting the run, but they are counted in [`ExtractionStats`] and logged so a change
//! in the input shape shows up as a number rather than as silently different text.

mod generic;
mod structured;

use crate::source::{BookFormat, SourceFile};
use anyhow::{Context, Result};

/// One parsed line of a book file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub verse: Option<u32>,
    /// Only known for the structured layout
    pub chapter: Option<u32>,
    pub text: String,
}

/// A piece of a book's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Verse text, verses joined by single spaces
    Text(String),
    /// The start of a new chapter
    Chapter(u32),
}

/// Counts describing how well a book file matched its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionStats {
    /// Lines read from the file
    pub lines: usize,
    /// Lines that produced a verse
    pub verses: usize,
    /// Non-blank lines that did not fit the layout
    pub skipped: usize,
}

/// The extracted body of one book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookText {
    pub segments: Vec<Segment>,
    pub stats: ExtractionStats,
}

impl BookText {
    /// Chapter numbers in the order they start.
    pub fn chapters(&self) -> impl Iterator<Item = u32> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Chapter(n) => Some(*n),
            Segment::Text(_) => None,
        })
    }

    /// All verse text with chapter boundaries removed.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Chapter(_) => None,
            })
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

/// Turn literal `\n` sequences into real line breaks.
pub(crate) fn expand_escapes(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Extract the text of `contents` using the given layout.
pub fn extract_str(contents: &str, format: BookFormat) -> BookText {
    match format {
        BookFormat::Generic => generic::extract(contents),
        BookFormat::Structured => structured::extract(contents),
    }
}

/// Read a book file and extract its text.
pub fn extract(book: &SourceFile) -> Result<BookText> {
    let contents = std::fs::read_to_string(book.path())
        .with_context(|| format!("Failed to read contents of {}", book.path().display()))?;

    let text = extract_str(&contents, book.format);

    log::info!(
        "{}: {} verses in {} chapter breaks from {} lines ({} format)",
        book.file_name(),
        text.stats.verses,
        text.chapters().count(),
        text.stats.lines,
        book.format
    );
    if text.stats.skipped > 0 {
        log::warn!(
            "{}: skipped {} line(s) that don't look like {} verse records",
            book.file_name(),
            text.stats.skipped,
            book.format
        );
    }

    Ok(text)
}
