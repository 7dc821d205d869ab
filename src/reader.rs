// WHY: plain-text collaborator feeding the core from files and persisting line lists
// Async buffered I/O; the core components themselves never touch the filesystem

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info};

use crate::error::Result;

/// Whether writes replace or extend an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
}

/// Configuration for text reading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
    /// Read only this many lines; `None` or `Some(0)` reads the whole file
    pub max_lines: Option<usize>,
    /// Trim surrounding whitespace from whole-file reads
    pub trim: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8192,
            max_lines: None,
            trim: true,
        }
    }
}

/// Statistics for one read
#[derive(Debug, Clone, Serialize)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async UTF-8 text reader
pub struct TextReader {
    config: ReaderConfig,
}

impl TextReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file. Whole-file reads are trimmed unless configured otherwise; line-limited reads
    /// join the lines with `\n`
    pub async fn read<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();
        debug!("Starting async read of file: {}", path.display());

        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);

        let (text, lines_read, bytes_read) = match self.config.max_lines.filter(|&n| n > 0) {
            None => {
                let mut content = String::new();
                let bytes = reader.read_to_string(&mut content).await?;
                let lines = content.lines().count() as u64;
                let text = if self.config.trim {
                    content.trim().to_string()
                } else {
                    content
                };
                (text, lines, bytes as u64)
            }
            Some(limit) => {
                let mut lines = reader.lines();
                let mut collected = Vec::with_capacity(limit);
                let mut bytes = 0u64;
                while collected.len() < limit {
                    match lines.next_line().await? {
                        Some(line) => {
                            bytes += line.len() as u64 + 1;
                            collected.push(line);
                        }
                        None => break,
                    }
                }
                let count = collected.len() as u64;
                (collected.join("\n"), count, bytes)
            }
        };

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read,
            bytes_read,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            stats.file_path, stats.lines_read, stats.bytes_read, stats.duration_ms
        );
        Ok((text, stats))
    }
}

/// Read a whole file (trimmed) or its first `max_lines` lines
pub async fn read_text<P: AsRef<Path>>(file_path: P, max_lines: Option<usize>) -> Result<String> {
    let reader = TextReader::new(ReaderConfig {
        max_lines,
        ..Default::default()
    });
    let (text, _stats) = reader.read(file_path).await?;
    Ok(text)
}

/// Write lines joined by `\n` with a trailing newline
pub async fn write_text<P, S>(lines: &[S], file_path: P, mode: WriteMode) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = file_path.as_ref();
    let file = match mode {
        WriteMode::Truncate => File::create(path).await?,
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path).await?,
    };
    let mut writer = BufWriter::new(file);

    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;

    debug!(lines = lines.len(), ?mode, "Wrote {}", path.display());
    Ok(())
}
