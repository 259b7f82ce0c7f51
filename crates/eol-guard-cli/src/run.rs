use anyhow::{Context, Result};
use eol_guard::{DocumentTable, LineEnding, LineEndingStats, NormalizeOptions, SaveInterceptor};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Whether normalized files are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Unchanged,
    Normalized,
    WouldNormalize,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub stats: LineEndingStats,
    pub line_ending: Option<LineEnding>,
}

impl FileReport {
    pub fn stats_line(&self) -> String {
        let canonical = self.line_ending.map_or("none", LineEnding::name);
        format!(
            "{}: CRLF={} LF={} CR={} canonical={}{}",
            self.path.display(),
            self.stats.crlf,
            self.stats.lf,
            self.stats.cr,
            canonical,
            if self.stats.is_mixed() { " (mixed)" } else { "" }
        )
    }
}

/// A document table with the save interceptor advised, reused for every file.
pub struct Session {
    table: DocumentTable,
    mode: Mode,
}

impl Session {
    pub fn new(options: NormalizeOptions, mode: Mode) -> Self {
        let mut table = DocumentTable::new();
        table.advise(SaveInterceptor::new(options));
        Self { table, mode }
    }

    pub fn process(&mut self, path: &Path) -> Result<FileReport> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let original = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

        let stats = LineEndingStats::scan(&original);
        let line_ending = LineEnding::detect_in_text(&original);

        let moniker = path.display().to_string();
        let doc = self
            .table
            .open(Some(moniker), original.as_str())
            .with_context(|| format!("failed to open {}", path.display()))?;
        let saved = self.table.save(doc);
        self.table.close(doc)?;
        let persisted = saved?;

        let status = if persisted == original {
            debug!(path = %path.display(), "already normalized");
            FileStatus::Unchanged
        } else if self.mode == Mode::Check {
            FileStatus::WouldNormalize
        } else {
            replace_file(path, &persisted)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "normalized");
            FileStatus::Normalized
        };

        Ok(FileReport {
            path: path.to_path_buf(),
            status,
            stats,
            line_ending,
        })
    }
}

/// Write `text` to a sibling temporary file and rename it over `path`.
///
/// The original file is either fully replaced or left as it was; its permissions are kept.
fn replace_file(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(path)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
