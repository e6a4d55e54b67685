//! EPUB output configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// EPUB output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::upper_case_acronyms)]
pub struct EPUB {
    /// Output EPUB file path
    pub outfile: PathBuf,
    /// Heading of the navigation document
    pub toc_name: String,
}

impl Default for EPUB {
    fn default() -> Self {
        Self {
            outfile: PathBuf::from("biblia.epub"),
            toc_name: "Libros".to_string(),
        }
    }
}

/// Statistics from rendering an EPUB, used for user feedback.
pub struct RenderStats {
    /// Number of book documents in the EPUB
    pub document_count: usize,
}
