use crate::extraction::{self, BookText};
use crate::source::Source;
use anyhow::{Context, Result};
use indicatif::ProgressBar;

pub mod epub;
pub mod pdf;

pub use epub::EPUB;
pub use pdf::PDF;

/// One book, ready to be rendered: its display title and its extracted body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub text: BookText,
}

/// Something that turns an ordered list of books into a document.
pub trait Render {
    type Stats;

    fn render(
        &self,
        source: &Source,
        books: &[Book],
        progress: &ProgressBar,
    ) -> Result<Self::Stats>;
}

/// Read and extract every book of the source directory, in reading order.
pub fn load_books(source: &Source, progress: &ProgressBar) -> Result<Vec<Book>> {
    let files = source.books().with_context(|| {
        format!(
            "Failed to list books in {}",
            source.directory.display()
        )
    })?;
    progress.set_length(files.len() as u64);
    progress.set_message("Reading books...");

    let mut books = Vec::with_capacity(files.len());
    for file in files.iter() {
        progress.set_message(file.file_name());
        let text = extraction::extract(file)
            .with_context(|| format!("Failed to extract text from {}", file.path().display()))?;
        books.push(Book {
            title: file.title.clone(),
            text,
        });
        progress.inc(1);
    }

    Ok(books)
}
