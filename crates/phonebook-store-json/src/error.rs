//! Error type for `phonebook-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("document not found: {}", .0.display())]
  NotFound(PathBuf),

  /// The document exists but is not valid JSON, lacks a `contents` array,
  /// or holds a record that fails validation.
  #[error("corrupt document {}: {reason}", path.display())]
  Corrupt { path: PathBuf, reason: String },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json encode error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`] for callers that only branch on the
/// kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
  NotFound,
  Corrupt,
  IoFailure,
}

impl Error {
  pub fn kind(&self) -> PersistenceErrorKind {
    match self {
      Self::NotFound(_) => PersistenceErrorKind::NotFound,
      Self::Corrupt { .. } => PersistenceErrorKind::Corrupt,
      Self::Io(_) | Self::Json(_) => PersistenceErrorKind::IoFailure,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
