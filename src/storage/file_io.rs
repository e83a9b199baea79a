//! JSON persistence helpers
//!
//! Every collection and the settings mapping go through these two functions.
//! A write lands in a sibling `.json.tmp` file first and is renamed over the
//! target, so readers only ever see a complete document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

/// Deserialize `path`, or `T::default()` when nothing has been saved yet
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| FinanceError::Storage(format!("Cannot open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| FinanceError::Storage(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Serialize `data` as pretty JSON and swap it in place of `path`
///
/// Missing parent directories are created. On error the previous file
/// content is still there.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Storage(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    // rename(2) is only atomic within one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinanceError::Storage(format!("Cannot create {}: {}", temp_path.display(), e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinanceError::Storage(format!("Cannot encode {}: {}", path.display(), e)))?;

    writer
        .flush()
        .map_err(|e| FinanceError::Storage(format!("Cannot write {}: {}", temp_path.display(), e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinanceError::Storage(format!("Cannot sync {}: {}", temp_path.display(), e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinanceError::Storage(format!("Cannot replace {}: {}", path.display(), e))
    })?;

    Ok(())
}
