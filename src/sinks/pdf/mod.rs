//! PDF generation for scripture books.
//!
//! Text is laid out by a small flowable engine ([`layout`]) using the glyph advances of a
//! single embedded TrueType font, then serialised with `pdf-writer` ([`document`]). Each
//! book starts on a new page with a centred title; chapter numbers appear as
//! sub-headings between body paragraphs.

mod config;
mod document;
mod encoding;
mod fonts;
mod layout;
mod rendering;

pub use config::PDF;
