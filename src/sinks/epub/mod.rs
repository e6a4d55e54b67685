//! EPUB generation for scripture books.
//!
//! Every book becomes one XHTML document holding the book title and its verse text as a
//! single paragraph, with a line break and the chapter number at each chapter start. The
//! documents are listed in reading order in both the spine and a flat table of contents.

mod archive;
mod config;
mod rendering;
mod styles;

pub use config::EPUB;
