//! ZIP packaging for the EPUB with reproducible output.
//!
//! `epub_builder::ZipLibrary` stamps every entry with the current time, so two renders of
//! the same books differ. This writer stamps every entry with the ZIP epoch instead.

use epub_builder::Zip;
use eyre::{Result, WrapErr};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub struct StableZip {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl std::fmt::Debug for StableZip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StableZip")
    }
}

fn options() -> FileOptions {
    FileOptions::default().last_modified_time(DateTime::default())
}

impl StableZip {
    /// Start an archive holding the uncompressed `mimetype` entry EPUB readers expect first.
    pub fn new() -> Result<StableZip> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                "mimetype",
                options().compression_method(CompressionMethod::Stored),
            )
            .wrap_err("could not create mimetype in epub")?;
        writer
            .write_all(b"application/epub+zip")
            .wrap_err("could not write mimetype in epub")?;
        Ok(StableZip { writer })
    }
}

impl Zip for StableZip {
    fn write_file<P: AsRef<Path>, R: Read>(&mut self, path: P, mut content: R) -> Result<()> {
        // entry names always use forward slashes
        let file = path
            .as_ref()
            .iter()
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.writer
            .start_file(file.as_str(), options())
            .wrap_err_with(|| format!("could not create file '{file}' in epub"))?;
        std::io::copy(&mut content, &mut self.writer)
            .wrap_err_with(|| format!("could not write file '{file}' in epub"))?;
        Ok(())
    }

    fn generate<W: Write>(&mut self, mut to: W) -> Result<()> {
        let cursor = self.writer.finish().wrap_err("error writing zip file")?;
        to.write_all(cursor.get_ref())
            .wrap_err("error writing zip file")?;
        Ok(())
    }
}
