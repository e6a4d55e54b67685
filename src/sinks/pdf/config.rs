use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PDF output configuration.
///
/// The defaults describe a US Letter page with one-inch margins all round, set in a
/// single TrueType face.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::upper_case_acronyms)]
pub struct PDF {
    /// Output PDF file path
    pub outfile: PathBuf,
    /// Path to the TrueType font used for all text
    pub font: PathBuf,
    /// Name the font is registered under in the PDF
    pub font_name: String,
    /// Page width in inches
    pub page_width_in: f32,
    /// Page height in inches
    pub page_height_in: f32,
    /// Margin on every side, in inches
    pub margin_in: f32,
    pub font_size_title_pt: f32,
    pub font_size_heading_pt: f32,
    pub font_size_body_pt: f32,
    pub leading_body_pt: f32,
    /// Prepend a table of contents listing the first page of every book
    pub table_of_contents: bool,
}

impl Default for PDF {
    fn default() -> Self {
        PDF {
            outfile: PathBuf::from("biblia.pdf"),
            font: PathBuf::from("BookAntiqua.ttf"),
            font_name: "BookAntiqua".to_string(),
            page_width_in: 8.5,
            page_height_in: 11.0,
            margin_in: 1.0,
            font_size_title_pt: 24.0,
            font_size_heading_pt: 14.0,
            font_size_body_pt: 12.0,
            leading_body_pt: 16.0,
            table_of_contents: false,
        }
    }
}

impl PDF {
    /// Page size in points, `(width, height)`.
    pub fn page_size(&self) -> (f32, f32) {
        (self.page_width_in * 72.0, self.page_height_in * 72.0)
    }

    pub fn margin(&self) -> f32 {
        self.margin_in * 72.0
    }
}

/// Statistics from rendering a PDF, used for user feedback.
pub struct RenderStats {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Number of books in the PDF
    pub book_count: usize,
    /// Characters the font encoding couldn't represent, printed as `?`
    pub unencodable_chars: usize,
}
