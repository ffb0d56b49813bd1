//! Command handlers.
//!
//! [`App`] is the presentation side of the phonebook: it builds contacts
//! from user input, hands them to the store, and renders whatever the store
//! or the query engine returns, in the order returned.

use std::{io::Write, path::Path};

use anyhow::{Context, Result, anyhow};
use phonebook_core::{Contact, ContactQuery, ContactStore, Error as CoreError, Field};
use phonebook_store_json::JsonStore;
use tracing::warn;

/// Split a `key=value` argument at the first `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
  raw
    .split_once('=')
    .map(|(k, v)| (k.trim().to_owned(), v.to_owned()))
    .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

/// Top-level application state: the open store and the output sink.
pub struct App<W: Write> {
  store: JsonStore,
  out:   W,
}

impl<W: Write> App<W> {
  pub fn new(store: JsonStore, out: W) -> Self { Self { store, out } }

  // ── Listing ───────────────────────────────────────────────────────────────

  pub fn list(&mut self, json: bool) -> Result<()> {
    let contacts: Vec<&Contact> = self.store.all().iter().collect();
    render(&mut self.out, &contacts, json)
  }

  /// Filter by `query`. An invalid pattern is reported and treated as no
  /// refinement: every contact is listed.
  pub fn search(&mut self, query: &str, json: bool) -> Result<()> {
    let query = compile_or_all(query);
    let hits = query.filter(self.store.all());
    render(&mut self.out, &hits, json)
  }

  /// Field-by-field view of every contact matching `query`.
  pub fn show(&mut self, query: &str) -> Result<()> {
    let query = compile_or_all(query);
    for (i, contact) in query.filter(self.store.all()).into_iter().enumerate() {
      if i > 0 {
        writeln!(self.out)?;
      }
      for (field, value) in contact.fields() {
        writeln!(self.out, "{:>14}: {value}", field.label())?;
      }
    }
    Ok(())
  }

  pub fn fields(&mut self) -> Result<()> {
    for field in Field::schema() {
      writeln!(self.out, "{:<10} {}", field.as_str(), field.label())?;
    }
    Ok(())
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  pub fn add(&mut self, fields: Vec<(String, String)>) -> Result<()> {
    let contact = Contact::create(fields).map_err(|e| match e {
      CoreError::UnknownField(key) => anyhow!(
        "unknown field {key:?}; run `phonebook fields` to list valid keys"
      ),
      other => other.into(),
    })?;
    let label = contact.display_label();
    self.store.add(contact).context("saving contact")?;
    writeln!(self.out, "added: {label}")?;
    Ok(())
  }

  pub fn backup(&mut self, dest: &Path) -> Result<()> {
    self
      .store
      .backup_to(dest)
      .with_context(|| format!("writing backup to {}", dest.display()))?;
    writeln!(self.out, "backed up {} contact(s)", self.store.len())?;
    Ok(())
  }

  pub fn restore(&mut self, backup: &Path) -> Result<()> {
    self
      .store
      .restore(backup)
      .with_context(|| format!("restoring from {}", backup.display()))?;
    writeln!(self.out, "restored {} contact(s)", self.store.len())?;
    Ok(())
  }

  pub fn clear(&mut self) -> Result<()> {
    self.store.clear().context("clearing phonebook")?;
    writeln!(self.out, "cleared")?;
    Ok(())
  }
}

fn compile_or_all(query: &str) -> ContactQuery {
  ContactQuery::parse(query).unwrap_or_else(|e| {
    warn!(query, error = %e, "ignoring invalid search query");
    ContactQuery::all()
  })
}

fn render<W: Write>(out: &mut W, contacts: &[&Contact], json: bool) -> Result<()> {
  if json {
    serde_json::to_writer_pretty(&mut *out, contacts)?;
    writeln!(out)?;
  } else {
    for contact in contacts {
      writeln!(out, "{contact}")?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn app() -> (TempDir, App<Vec<u8>>) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path().join("phonebook.json")).unwrap();
    (dir, App::new(store, Vec::new()))
  }

  fn pairs(raw: &[&str]) -> Vec<(String, String)> {
    raw.iter().map(|r| parse_assignment(r).unwrap()).collect()
  }

  fn take_output(app: &mut App<Vec<u8>>) -> String {
    String::from_utf8(std::mem::take(&mut app.out)).unwrap()
  }

  fn seeded() -> (TempDir, App<Vec<u8>>) {
    let (dir, mut app) = app();
    app
      .add(pairs(&["first_name=Ann", "last_name=Lee", "addr2=Leeds"]))
      .unwrap();
    app.add(pairs(&["first_name=Bob", "last_name=Ann"])).unwrap();
    take_output(&mut app);
    (dir, app)
  }

  #[test]
  fn parse_assignment_splits_on_first_equals() {
    assert_eq!(
      parse_assignment("email=a=b").unwrap(),
      ("email".to_owned(), "a=b".to_owned())
    );
    assert_eq!(
      parse_assignment("fax=").unwrap(),
      ("fax".to_owned(), String::new())
    );
    assert!(parse_assignment("fax").is_err());
  }

  #[test]
  fn add_reports_label() {
    let (_dir, mut app) = app();
    app.add(pairs(&["first_name=Ann", "last_name=Lee"])).unwrap();
    assert_eq!(take_output(&mut app), "added: Ann Lee , \n");
  }

  #[test]
  fn add_rejects_unknown_field_without_mutation() {
    let (_dir, mut app) = app();
    let err = app.add(pairs(&["nickname=Bob"])).unwrap_err();
    assert!(err.to_string().contains("nickname"));
    assert!(app.store.is_empty());
  }

  #[test]
  fn list_renders_display_labels_in_order() {
    let (_dir, mut app) = seeded();
    app.list(false).unwrap();
    assert_eq!(take_output(&mut app), "Ann Lee , Leeds\nBob Ann , \n");
  }

  #[test]
  fn list_json_renders_documents() {
    let (_dir, mut app) = seeded();
    app.list(true).unwrap();
    let value: serde_json::Value =
      serde_json::from_str(&take_output(&mut app)).unwrap();
    assert_eq!(value[1], serde_json::json!({ "first_name": "Bob", "last_name": "Ann" }));
  }

  #[test]
  fn search_filters_and_invalid_query_lists_all() {
    let (_dir, mut app) = seeded();

    app.search("^ bob", false).unwrap();
    assert_eq!(take_output(&mut app), "Bob Ann , \n");

    app.search("(", false).unwrap();
    assert_eq!(take_output(&mut app), "Ann Lee , Leeds\nBob Ann , \n");
  }

  #[test]
  fn show_prints_labels() {
    let (_dir, mut app) = seeded();
    app.show("leeds").unwrap();
    assert_eq!(
      take_output(&mut app),
      "    First Name: Ann\n     Last Name: Lee\nAddress Line 2: Leeds\n"
    );
  }

  #[test]
  fn backup_clear_restore() {
    let (dir, mut app) = seeded();
    let backup = dir.path().join("backup.json");

    app.backup(&backup).unwrap();
    app.clear().unwrap();
    assert!(app.store.is_empty());

    app.restore(&backup).unwrap();
    assert_eq!(app.store.len(), 2);
    assert_eq!(
      take_output(&mut app),
      "backed up 2 contact(s)\ncleared\nrestored 2 contact(s)\n"
    );
  }

  #[test]
  fn fields_lists_schema() {
    let (_dir, mut app) = app();
    app.fields().unwrap();
    let out = take_output(&mut app);
    assert_eq!(out.lines().count(), 9);
    assert!(out.starts_with("first_name First Name\n"));
  }
}
