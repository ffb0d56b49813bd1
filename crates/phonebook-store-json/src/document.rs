//! Reading and writing the phonebook document.
//!
//! These are free functions over a path; [`crate::JsonStore`] layers the
//! in-memory collection and its consistency rules on top.

use std::{
  fs,
  io::{self, Write as _},
  path::Path,
};

use phonebook_core::Contact;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// On-disk shape for writes. Reads go through [`decode`], which ignores
/// unknown top-level keys.
#[derive(Serialize)]
struct DocumentRef<'a> {
  contents: &'a [Contact],
}

// ─── Reads ───────────────────────────────────────────────────────────────────

/// Read and decode the document at `path`.
///
/// All or nothing: a single record with an unknown field fails the whole
/// load with [`Error::Corrupt`].
pub fn load(path: &Path) -> Result<Vec<Contact>> {
  let bytes = read(path)?;
  decode(path, &bytes)
}

fn read(path: &Path) -> Result<Vec<u8>> {
  fs::read(path).map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
    _ => Error::Io(e),
  })
}

fn decode(path: &Path, bytes: &[u8]) -> Result<Vec<Contact>> {
  let corrupt = |reason: String| Error::Corrupt {
    path: path.to_path_buf(),
    reason,
  };

  let mut root: Map<String, Value> =
    serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
  let contents = root
    .remove("contents")
    .ok_or_else(|| corrupt("missing `contents` key".to_owned()))?;
  serde_json::from_value(contents).map_err(|e| corrupt(e.to_string()))
}

// ─── Writes ──────────────────────────────────────────────────────────────────

/// Encode `contacts` and atomically replace the document at `path`.
pub fn save(path: &Path, contacts: &[Contact]) -> Result<()> {
  let bytes = serde_json::to_vec_pretty(&DocumentRef { contents: contacts })?;
  atomic_write(path, &bytes)
}

/// Copy the backup document at `backup` onto `path`, byte for byte, and
/// return the contacts it holds.
///
/// The backup is decoded first; an invalid backup fails with
/// [`Error::Corrupt`] and `path` is left untouched.
pub fn restore_from(backup: &Path, path: &Path) -> Result<Vec<Contact>> {
  let bytes = read(backup)?;
  let contacts = decode(backup, &bytes)?;
  atomic_write(path, &bytes)?;
  Ok(contacts)
}

/// Replace the document at `path` with an empty collection.
pub fn reset(path: &Path) -> Result<()> { save(path, &[]) }

/// Write `bytes` to a temporary file next to `path`, sync it, then rename
/// it over `path`. The target is either fully replaced or unchanged, and an
/// existing target keeps its permissions.
fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
  let dir = match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };

  let mut tmp = tempfile::Builder::new()
    .prefix(".phonebook")
    .suffix(".tmp")
    .tempfile_in(dir)?;
  tmp.write_all(bytes)?;
  if let Ok(meta) = fs::metadata(path) {
    tmp.as_file().set_permissions(meta.permissions())?;
  }
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
