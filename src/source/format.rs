use serde::{Deserialize, Serialize};
use std::fmt;

/// How the lines of a book file are laid out.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    /// `<verse> '<text>'` records, one per line
    #[default]
    Generic,
    /// `(<book>, <chapter>, <verse>, '<text>')` tuple records, one per line
    Structured,
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl BookFormat {
    pub fn name(&self) -> &'static str {
        match self {
            BookFormat::Generic => "generic",
            BookFormat::Structured => "structured",
        }
    }
}

/// Assigns a non-default format to a single book file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRule {
    /// File name (not path) of the book, compared case-insensitively
    pub file: String,
    pub format: BookFormat,
}

impl FormatRule {
    pub fn new<S: ToString>(file: S, format: BookFormat) -> FormatRule {
        FormatRule {
            file: file.to_string(),
            format,
        }
    }
}

/// The rules shipped with the tool: the Psalms are stored as tuple records.
pub fn default_format_rules() -> Vec<FormatRule> {
    vec![FormatRule::new("19-salmos.txt", BookFormat::Structured)]
}

/// Look up the format of a book by its file name.
///
/// Files without a matching rule are [`BookFormat::Generic`].
pub fn format_for(rules: &[FormatRule], file_name: &str) -> BookFormat {
    let file_name = file_name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.file.to_lowercase() == file_name)
        .map(|rule| rule.format)
        .unwrap_or_default()
}
