//! Free-text filtering over contacts.
//!
//! A query is a case-insensitive regular expression matched anywhere in a
//! contact's [`Contact::searchable_text`]. Matching is existence-only: no
//! ranking, no field scoping. The empty query matches every contact.

use regex::{Regex, RegexBuilder};

use crate::{Contact, Result};

/// A compiled query, reusable across contact lists.
#[derive(Debug, Clone)]
pub struct ContactQuery {
  /// `None` for the empty query.
  pattern: Option<Regex>,
}

impl ContactQuery {
  /// Compile `query`. Fails with [`crate::Error::QuerySyntax`] if it is not
  /// a valid regular expression.
  pub fn parse(query: &str) -> Result<Self> {
    if query.is_empty() {
      return Ok(Self::all());
    }
    let pattern = RegexBuilder::new(query).case_insensitive(true).build()?;
    Ok(Self { pattern: Some(pattern) })
  }

  /// The query that matches everything.
  pub fn all() -> Self { Self { pattern: None } }

  pub fn is_all(&self) -> bool { self.pattern.is_none() }

  pub fn matches(&self, contact: &Contact) -> bool {
    match &self.pattern {
      Some(re) => re.is_match(&contact.searchable_text()),
      None => true,
    }
  }

  /// The matching contacts, in their original relative order.
  pub fn filter<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
    contacts.iter().filter(|c| self.matches(c)).collect()
  }
}

/// Compile `query` and filter `contacts` with it.
pub fn search<'a>(contacts: &'a [Contact], query: &str) -> Result<Vec<&'a Contact>> {
  Ok(ContactQuery::parse(query)?.filter(contacts))
}
