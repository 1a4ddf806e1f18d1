//! Append-only text files for the raw and final logs.
//!
//! Each [`OutputLine`] is written as `sentence####variant\n`. Both files are
//! opened once per run in append mode and flushed after every line, so a
//! crash loses at most the line being written.

use atoss_application::SplitSink;
use atoss_domain::OutputLine;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Raw and final log writers. Flushes on `Drop`.
pub struct AppendFileSink {
    raw: LogFile,
    final_log: LogFile,
}

struct LogFile {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl LogFile {
    fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    fn append(&mut self, line: &OutputLine) -> io::Result<()> {
        self.writer.write_all(line.render().as_bytes())?;
        self.writer.flush()
    }
}

impl AppendFileSink {
    /// Open (or create) both logs in append mode.
    ///
    /// Parent directories are created as needed.
    pub fn open(raw_path: impl AsRef<Path>, final_path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            raw: LogFile::open(raw_path.as_ref())?,
            final_log: LogFile::open(final_path.as_ref())?,
        })
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw.path
    }

    pub fn final_path(&self) -> &Path {
        &self.final_log.path
    }
}

impl SplitSink for AppendFileSink {
    fn append_raw(&mut self, line: &OutputLine) -> io::Result<()> {
        self.raw.append(line)
    }

    fn append_final(&mut self, line: &OutputLine) -> io::Result<()> {
        self.final_log.append(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.raw.writer.flush()?;
        self.final_log.writer.flush()
    }
}

impl Drop for AppendFileSink {
    fn drop(&mut self) {
        for log in [&mut self.raw, &mut self.final_log] {
            if let Err(e) = log.writer.flush() {
                warn!("Could not flush {}: {}", log.path.display(), e);
            }
        }
    }
}
