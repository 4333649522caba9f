use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fed_core::ResultTable;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot encoding error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("nothing to persist: no harvest has completed yet")]
    NoHarvest,
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Writes `table` as a pretty JSON snapshot to `{dir}/{filename}`.
pub fn write_snapshot(table: &ResultTable, dir: &Path, filename: &str) -> Result<PathBuf, PersistError> {
    let content = serde_json::to_vec_pretty(table)?;
    AtomicFileWriter::new(dir.to_path_buf()).write(filename, &content)
}

/// Reads a snapshot written by [`write_snapshot`].
///
/// Rows are re-assembled on load, so a hand-edited file still yields a
/// sorted table with unique dates.
pub fn load_snapshot(path: &Path) -> Result<ResultTable, PersistError> {
    let content = fs::read(path)?;
    let table: ResultTable = serde_json::from_slice(&content)?;
    if table.is_well_formed() {
        return Ok(table);
    }
    let column = table.column().to_string();
    Ok(ResultTable::assemble(column, table.rows().to_vec()).table)
}
