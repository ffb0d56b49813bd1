//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `phonebook-store-json`). Callers
//! that only list, search and add can be written against this trait rather
//! than a concrete backend.

use std::path::Path;

use crate::{Contact, query};

/// An ordered, persisted collection of contacts.
///
/// The in-memory sequence always equals the most recently persisted
/// document. A mutation that fails to persist must leave the in-memory
/// sequence exactly as it was before the call.
pub trait ContactStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append `contact` and persist the whole collection.
  ///
  /// Duplicates are allowed.
  fn add(&mut self, contact: Contact) -> Result<(), Self::Error>;

  /// Every contact, in insertion order.
  fn all(&self) -> &[Contact];

  /// Replace the collection with the contents of the backup document at
  /// `backup`.
  fn restore(&mut self, backup: &Path) -> Result<(), Self::Error>;

  /// Replace the collection with an empty one.
  fn clear(&mut self) -> Result<(), Self::Error>;

  /// Contacts matching `query`; see [`query::search`].
  fn search(&self, query: &str) -> crate::Result<Vec<&Contact>> {
    query::search(self.all(), query)
  }

  fn len(&self) -> usize { self.all().len() }

  fn is_empty(&self) -> bool { self.all().is_empty() }
}
