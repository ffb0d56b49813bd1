//! JSON file backend for the phonebook contact store.
//!
//! The whole collection lives in one UTF-8 JSON document of the form
//! `{"contents": [{"<field key>": "<value>", ...}, ...]}`. Every write
//! replaces the document atomically (temp file + rename).

pub mod document;
mod store;

pub mod error;

pub use error::{Error, PersistenceErrorKind, Result};
pub use store::JsonStore;
