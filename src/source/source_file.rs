use super::format::{format_for, BookFormat, FormatRule};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-").expect("valid ordinal prefix regex"));

/// A single book file in the source directory
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// The leading `<digits>-` of the file name, or 0 when there is none
    pub ordinal: u64,
    pub title: String,
    pub format: BookFormat,
}

impl SourceFile {
    pub fn new<P: Into<PathBuf>>(path: P, rules: &[FormatRule]) -> SourceFile {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        SourceFile {
            ordinal: book_ordinal(&file_name),
            title: book_title(&file_name),
            format: format_for(rules, &file_name),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// The numeric ordinal a book file name starts with, e.g. `41` for `41-juan.txt`.
///
/// Names without a prefix (or with one too large to represent) yield 0 so they sort first.
pub fn book_ordinal(file_name: &str) -> u64 {
    RE_ORDINAL_PREFIX
        .captures(file_name)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0)
}

/// Derive a display title from a book file name: `46-1_corintios.txt` becomes `1 Corintios`.
pub fn book_title(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    let stem = RE_ORDINAL_PREFIX.replace(&stem, "");
    title_case(&stem.replace('_', " "))
}

/// Upper-case every letter that follows a non-letter and lower-case the rest.
fn title_case(s: &str) -> String {
    let mut titled = String::with_capacity(s.len());
    let mut previous_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            titled.push(c);
            previous_is_letter = false;
        }
    }
    titled
}
