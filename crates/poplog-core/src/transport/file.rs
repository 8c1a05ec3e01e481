//! File transport with a size cap

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};

use super::Transport;
use crate::config::MAX_LOG_FILE_SIZE;
use crate::error::TransportError;
use crate::format::Format;
use crate::level::Level;
use crate::record::LogRecord;

/// Append-only file that rotates once it would grow past `max_size`.
///
/// On rotation the current file becomes `<file>.1`, replacing any previous
/// backup, and writing continues in a fresh file. The directory and file are
/// created on first write.
pub struct SizeCappedFile {
    path: PathBuf,
    max_size: u64,
    file: Option<File>,
    current_size: u64,
}

impl SizeCappedFile {
    pub fn new(path: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            path: path.into(),
            max_size,
            file: None,
            current_size: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the rotated file goes
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".1");
        self.path.with_file_name(name)
    }

    fn open(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?;
                self.current_size = file.metadata()?.len();
                file
            }
        };
        Ok(self.file.insert(file))
    }

    fn rotate(&mut self) -> io::Result<()> {
        debug!("Rotating log file {:?}", self.path);

        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        fs::rename(&self.path, self.backup_path())?;
        self.current_size = 0;

        Ok(())
    }
}

impl Write for SizeCappedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?;

        let incoming = buf.len() as u64;
        if self.current_size > 0 && self.current_size + incoming > self.max_size {
            self.rotate()
                .inspect_err(|e| warn!("Failed to rotate log file {:?}: {}", self.path, e))?;
        }

        let result = self.open()?.write(buf);
        let written = result.inspect_err(|e| warn!("Failed to write log file {:?}: {}", self.path, e))?;
        self.current_size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Writes records at or above a severity floor to `<dir>/<id>.log` through a
/// background worker, so log calls never wait on disk.
pub struct FileTransport {
    name: String,
    path: PathBuf,
    format: Format,
    level: Level,
    writer: NonBlocking,
    /// Flushes pending lines when the transport is dropped
    _guard: WorkerGuard,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        Self::with_max_size(path, format, MAX_LOG_FILE_SIZE)
    }

    pub fn with_max_size(path: impl Into<PathBuf>, format: Format, max_size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        let (writer, guard) = NonBlockingBuilder::default()
            .thread_name("poplog-file")
            .finish(SizeCappedFile::new(path.clone(), max_size));

        Self {
            name,
            path,
            format,
            level: Level::Warn,
            writer,
            _guard: guard,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for FileTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Option<Level> {
        Some(self.level)
    }

    fn handles_exceptions(&self) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) -> Result<(), TransportError> {
        let mut line = self.format.render(record.clone())?;
        line.push('\n');

        self.writer
            .clone()
            .write_all(line.as_bytes())
            .map_err(|e| TransportError::io(&self.name, e))
    }
}
