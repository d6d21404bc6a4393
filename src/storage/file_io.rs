//! File I/O utilities with atomic writes
//!
//! Every collection is a single JSON document. Writes go to a sibling temp
//! file which is synced and then renamed over the target, so a document on
//! disk is always either the old or the new version. Staging and renaming are
//! separate steps so several documents can be staged before any is replaced.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{HearthError, HearthResult};

/// Read a JSON document, returning `T::default()` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> HearthResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "document missing, using empty collection");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| HearthError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| HearthError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// A serialized document waiting in its temp file to replace the target
///
/// Dropping it without [`publish`](Self::publish) removes the temp file and
/// leaves the target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    path: PathBuf,
    published: bool,
}

impl StagedWrite {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the temp file over the target
    pub fn publish(mut self) -> HearthResult<()> {
        fs::rename(&self.temp_path, &self.path).map_err(|e| {
            HearthError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        self.published = true;
        tracing::trace!(path = %self.path.display(), "document written");
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.published {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Serialize a document into a synced sibling temp file without touching the target
pub fn stage_json<T, P>(path: P, data: &T) -> HearthResult<StagedWrite>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            HearthError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // A rename over a directory would fail only after other documents were replaced
    if path.is_dir() {
        return Err(HearthError::Storage(format!(
            "Cannot replace {}: it is a directory",
            path.display()
        )));
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| HearthError::Storage(format!("Failed to create temp file: {}", e)))?;
    let staged = StagedWrite {
        temp_path,
        path: path.to_path_buf(),
        published: false,
    };

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| HearthError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| HearthError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| HearthError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(staged)
}

/// Write a JSON document atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> HearthResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    stage_json(path, data)?.publish()
}
