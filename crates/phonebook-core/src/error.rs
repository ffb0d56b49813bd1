//! Error types for `phonebook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A record was built from a key that is not part of the field schema.
  #[error("unknown contact field: {0:?}")]
  UnknownField(String),

  #[error("invalid search query: {0}")]
  QuerySyntax(#[from] regex::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
