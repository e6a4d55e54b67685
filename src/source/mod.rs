//! The collection of books to render and the metadata describing them.

mod format;
pub use format::*;

mod source_file;
pub use source_file::*;

use crate::file_ordering::sort_books;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything we need to know to find the books and describe the resulting document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Directory holding one `<ordinal>-<name>.txt` file per book
    pub directory: PathBuf,

    /// The title of the whole document
    pub title: String,

    /// Stable identifier for the document, used to derive the EPUB unique identifier
    pub identifier: String,

    /// BCP 47 language tag of the text
    pub language: String,

    pub author: String,

    /// Books whose lines use a non-generic layout
    pub formats: Vec<FormatRule>,
}

impl Default for Source {
    fn default() -> Self {
        Source {
            directory: PathBuf::from("origin"),
            title: "Biblia Continua - Reina Valera 1960".to_string(),
            identifier: "biblia".to_string(),
            language: "es".to_string(),
            author: "God".to_string(),
            formats: default_format_rules(),
        }
    }
}

impl Source {
    /// List the book files of the source directory in reading order.
    ///
    /// Only regular files ending in `.txt` are books; everything else is skipped.
    pub fn books(&self) -> Result<Vec<SourceFile>> {
        list_books(&self.directory, &self.formats)
    }
}

pub fn list_books(directory: &Path, rules: &[FormatRule]) -> Result<Vec<SourceFile>> {
    if !directory.is_dir() {
        return Err(anyhow!(
            "Source path {} isn't a directory!",
            directory.display()
        ));
    }

    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to list directory {}", directory.display()))?;

    let mut books: Vec<SourceFile> = Vec::default();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry of {}", directory.display()))?;
        let path = entry.path();

        let is_txt = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".txt"));
        if !is_txt || !path.is_file() {
            log::debug!("skipping non-book entry {}", path.display());
            continue;
        }

        books.push(SourceFile::new(path, rules));
    }

    sort_books(&mut books);
    Ok(books)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_txt_files_are_books() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::write(dir.path().join("2-exodo.txt"), "").expect("can write");
        std::fs::write(dir.path().join("1-genesis.txt"), "").expect("can write");
        std::fs::write(dir.path().join("notes.md"), "").expect("can write");
        std::fs::write(dir.path().join("3-levitico.TXT"), "").expect("can write");
        std::fs::create_dir(dir.path().join("4-numeros.txt")).expect("can create dir");

        let books = list_books(dir.path(), &default_format_rules()).expect("can list books");
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Genesis", "Exodo"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let result = list_books(&dir.path().join("missing"), &[]);
        assert!(result.is_err());
    }

    #[test]
    fn default_source_matches_reina_valera_layout() {
        let source = Source::default();
        assert_eq!(source.directory, PathBuf::from("origin"));
        assert_eq!(source.language, "es");
        assert_eq!(source.identifier, "biblia");
        assert_eq!(
            format_for(&source.formats, "19-salmos.txt"),
            BookFormat::Structured
        );
    }
}
