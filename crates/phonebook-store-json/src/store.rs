//! [`JsonStore`], the JSON-file implementation of [`ContactStore`].

use std::{
  fs,
  path::{Path, PathBuf},
};

use phonebook_core::{Contact, ContactStore};
use tracing::{debug, info, warn};

use crate::{Error, Result, document};

/// A phonebook backed by a single JSON document.
///
/// Each instance owns its own in-memory sequence, loaded from `path` when
/// opened. Every mutation is written through before it returns.
#[derive(Debug)]
pub struct JsonStore {
  path:     PathBuf,
  contacts: Vec<Contact>,
}

impl JsonStore {
  /// Load the document at `path`.
  ///
  /// If no document exists yet, an empty one is written (creating missing
  /// parent directories) and the store starts empty. Any other load failure,
  /// including a corrupt document, is returned and the file is left alone.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();

    let contacts = match document::load(&path) {
      Ok(contacts) => {
        info!(path = %path.display(), count = contacts.len(), "opened phonebook");
        contacts
      }
      Err(Error::NotFound(_)) => {
        info!(path = %path.display(), "no phonebook found; creating an empty one");
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
          fs::create_dir_all(parent)?;
        }
        document::reset(&path)?;
        Vec::new()
      }
      Err(e) => return Err(e),
    };

    Ok(Self { path, contacts })
  }

  /// Path of the backing document.
  pub fn path(&self) -> &Path { &self.path }

  /// Write the current collection to `dest` as a standalone document,
  /// suitable for a later [`ContactStore::restore`].
  pub fn backup_to(&self, dest: impl AsRef<Path>) -> Result<()> {
    let dest = dest.as_ref();
    document::save(dest, &self.contacts)?;
    info!(dest = %dest.display(), count = self.contacts.len(), "wrote backup");
    Ok(())
  }

  fn persist(&self) -> Result<()> {
    document::save(&self.path, &self.contacts)?;
    debug!(path = %self.path.display(), count = self.contacts.len(), "saved phonebook");
    Ok(())
  }
}

impl ContactStore for JsonStore {
  type Error = Error;

  fn add(&mut self, contact: Contact) -> Result<()> {
    self.contacts.push(contact);
    if let Err(e) = self.persist() {
      self.contacts.pop();
      warn!(path = %self.path.display(), error = %e, "save failed; add rolled back");
      return Err(e);
    }
    Ok(())
  }

  fn all(&self) -> &[Contact] { &self.contacts }

  fn restore(&mut self, backup: &Path) -> Result<()> {
    self.contacts = document::restore_from(backup, &self.path)?;
    info!(
      backup = %backup.display(),
      count = self.contacts.len(),
      "restored phonebook from backup"
    );
    Ok(())
  }

  fn clear(&mut self) -> Result<()> {
    document::reset(&self.path)?;
    self.contacts.clear();
    info!(path = %self.path.display(), "cleared phonebook");
    Ok(())
  }
}
