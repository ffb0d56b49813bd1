//! The contact record and its fixed field schema.
//!
//! A [`Contact`] holds at most one string value per [`Field`]. Fields that
//! were never supplied are *unset*, which is distinct from being set to the
//! empty string: unset fields are omitted from the document projection and
//! contribute nothing to the searchable text.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

// ─── Field schema ────────────────────────────────────────────────────────────

/// One of the recognised contact fields.
///
/// Declaration order is schema order: it drives display order, the
/// searchable-text projection, and the `Ord` impl.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  EnumCount,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum Field {
  #[strum(serialize = "first_name")]
  FirstName,
  #[strum(serialize = "last_name")]
  LastName,
  #[strum(serialize = "addr1")]
  AddressLine1,
  #[strum(serialize = "addr2")]
  AddressLine2,
  #[strum(serialize = "homePh")]
  HomePhone,
  #[strum(serialize = "workPh")]
  WorkPhone,
  #[strum(serialize = "cellPh")]
  CellPhone,
  #[strum(serialize = "fax")]
  Fax,
  #[strum(serialize = "email")]
  Email,
}

impl Field {
  /// The key used in the persisted document, e.g. `"first_name"`.
  pub fn as_str(&self) -> &'static str { (*self).into() }

  /// Human-readable label, e.g. `"First Name"`.
  pub fn label(&self) -> &'static str {
    match self {
      Self::FirstName => "First Name",
      Self::LastName => "Last Name",
      Self::AddressLine1 => "Address Line 1",
      Self::AddressLine2 => "Address Line 2",
      Self::HomePhone => "Home Phone",
      Self::WorkPhone => "Work Phone",
      Self::CellPhone => "Cell Phone",
      Self::Fax => "Fax",
      Self::Email => "Email",
    }
  }

  /// Look up a field by its document key.
  pub fn from_key(key: &str) -> Result<Self> {
    Self::from_str(key).map_err(|_| Error::UnknownField(key.to_owned()))
  }

  /// Every field in schema order.
  pub fn schema() -> impl Iterator<Item = Field> { Self::iter() }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A single phonebook entry.
///
/// Contacts are immutable once built; the only constructor is
/// [`Contact::create`], which rejects keys outside the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
  try_from = "BTreeMap<String, String>",
  into = "BTreeMap<String, String>"
)]
pub struct Contact {
  values: BTreeMap<Field, String>,
}

impl Contact {
  /// Build a contact from `(key, value)` pairs.
  ///
  /// Every key must name a schema [`Field`]; the first key that does not
  /// fails the whole call with [`Error::UnknownField`]. Values are taken
  /// verbatim. If a key repeats, the last value wins.
  pub fn create<I, K, V>(fields: I) -> Result<Self>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
  {
    let mut values = BTreeMap::new();
    for (key, value) in fields {
      let field = Field::from_key(key.as_ref())?;
      values.insert(field, value.into());
    }
    Ok(Self { values })
  }

  /// The value of `field`, or `None` if it is unset.
  pub fn get(&self, field: Field) -> Option<&str> {
    self.values.get(&field).map(String::as_str)
  }

  /// Set fields in schema order.
  pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
    self.values.iter().map(|(f, v)| (*f, v.as_str()))
  }

  /// `true` if no field is set.
  pub fn is_empty(&self) -> bool { self.values.is_empty() }

  /// The persisted projection: only set fields, keyed by document key.
  pub fn to_document(&self) -> BTreeMap<String, String> {
    self
      .fields()
      .map(|(f, v)| (f.as_str().to_owned(), v.to_owned()))
      .collect()
  }

  /// Fixed list rendering: `"<first> <last> , <addr2>"`.
  ///
  /// Unset components render as empty strings.
  pub fn display_label(&self) -> String {
    format!(
      "{} {} , {}",
      self.get(Field::FirstName).unwrap_or_default(),
      self.get(Field::LastName).unwrap_or_default(),
      self.get(Field::AddressLine2).unwrap_or_default(),
    )
  }

  /// Every set value, each preceded by a single space, in schema order.
  /// Queries run against this projection only.
  pub fn searchable_text(&self) -> String {
    let mut text = String::new();
    for value in self.values.values() {
      text.push(' ');
      text.push_str(value);
    }
    text
  }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.display_label())
  }
}

impl TryFrom<BTreeMap<String, String>> for Contact {
  type Error = Error;

  fn try_from(doc: BTreeMap<String, String>) -> Result<Self> {
    Self::create(doc)
  }
}

impl From<Contact> for BTreeMap<String, String> {
  fn from(contact: Contact) -> Self { contact.to_document() }
}
