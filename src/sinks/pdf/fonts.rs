use super::encoding;
use super::layout::Metrics;
use anyhow::{anyhow, Context, Result};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::path::Path;

/// A TrueType font read from disk, kept as raw bytes for embedding plus a parsed face for
/// metrics.
pub struct LoadedFont {
    /// Name the font is registered under in the PDF
    pub name: String,
    pub data: Vec<u8>,
    pub face: OwnedFace,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl LoadedFont {
    /// Load a `.ttf` file and register it under `name`.
    pub fn load(path: &Path, name: &str) -> Result<LoadedFont> {
        if !path.exists() {
            return Err(anyhow!(
                "Font file not found: {}\nHint: place the TrueType file there or set `font` in the [pdf] section of verse-book.toml",
                path.display()
            ));
        }
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        LoadedFont::from_bytes(data, name)
            .with_context(|| format!("Failed to parse font file: {}", path.display()))
    }

    pub fn from_bytes(data: Vec<u8>, name: &str) -> Result<LoadedFont> {
        let face = OwnedFace::from_vec(data.clone(), 0)
            .map_err(|e| anyhow!("Not a usable TrueType font: {e}"))?;
        Ok(LoadedFont {
            name: name.to_string(),
            data,
            face,
        })
    }

    fn units_per_em(&self) -> f32 {
        self.face.as_face_ref().units_per_em() as f32
    }

    /// Scale a value in font units to thousandths of an em, as PDF font dictionaries expect.
    pub fn to_glyph_space(&self, units: f32) -> f32 {
        units * 1000.0 / self.units_per_em()
    }

    /// Advance width of a character in font units. Characters without a glyph use the
    /// missing-glyph advance.
    fn advance(&self, c: char) -> f32 {
        let face = self.face.as_face_ref();
        let glyph = face
            .glyph_index(c)
            .unwrap_or(owned_ttf_parser::GlyphId(0));
        face.glyph_hor_advance(glyph).unwrap_or(0) as f32
    }

    /// Widths of the codes `FIRST_CHAR..=LAST_CHAR` in glyph space.
    pub fn code_widths(&self) -> Vec<f32> {
        (encoding::FIRST_CHAR..=encoding::LAST_CHAR)
            .map(|code| match encoding::decode(code) {
                Some(c) => self.to_glyph_space(self.advance(c)),
                None => 0.0,
            })
            .collect()
    }

    /// The PostScript-safe form of the registered name.
    pub fn base_font(&self) -> String {
        let name: String = self
            .name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if name.is_empty() {
            "VerseBookFont".to_string()
        } else {
            name
        }
    }
}

impl Metrics for LoadedFont {
    fn width_of_text(&self, text: &str, size: f32) -> f32 {
        let units: f32 = text
            .chars()
            .map(|c| self.advance(encoding::printable(c)))
            .sum();
        units * size / self.units_per_em()
    }

    fn ascent(&self, size: f32) -> f32 {
        self.face.as_face_ref().ascender() as f32 * size / self.units_per_em()
    }
}
