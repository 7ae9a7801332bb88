//! Output file handling shared by the splitters.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};

/// A generated markdown file opened for writing.
///
/// Dropping the value flushes and closes the file; call [`OutputFile::finish`]
/// to observe flush errors.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    /// Create (or truncate) `path`, creating missing parent directories first.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SplitError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| SplitError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened output file");

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Write `line` followed by a newline.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|source| self.write_error(source))
    }

    /// Flush buffered content and close the file.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .map_err(|source| self.write_error(source))?;
        Ok(self.path)
    }

    fn write_error(&self, source: std::io::Error) -> SplitError {
        SplitError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
