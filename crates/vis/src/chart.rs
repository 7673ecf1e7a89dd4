//! The rendered chart image.

use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tempfile::NamedTempFile;

use crate::format::ImageFormat;

/// A rendered chart image.
///
/// The image lives in a temporary file that is owned by the chart and
/// removed when the chart is dropped.
#[derive(Debug)]
pub struct Chart {
    file: NamedTempFile,
    format: ImageFormat,
}

impl Chart {
    const FILE_PREFIX: &str = "promplot-";

    /// Creates an empty temporary file with the extension of `format`,
    /// ready to be drawn into.
    pub(crate) fn temp_file(format: ImageFormat) -> io::Result<NamedTempFile> {
        Builder::new()
            .prefix(Self::FILE_PREFIX)
            .suffix(&format!(".{}", format.extension()))
            .tempfile()
    }

    pub(crate) fn new(file: NamedTempFile, format: ImageFormat) -> Chart {
        Self { file, format }
    }

    /// Wraps already encoded image bytes into a chart.
    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> io::Result<Chart> {
        let mut file = Self::temp_file(format)?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self::new(file, format))
    }

    /// The image format of the chart.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// The path of the temporary image file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copies the image into `writer` and returns the number of bytes written.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<u64> {
        let mut image = File::open(self.path())?;
        let bytes = io::copy(&mut image, writer)?;
        writer.flush()?;

        Ok(bytes)
    }

    /// Reads the whole image into memory.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(self.path())
    }
}
