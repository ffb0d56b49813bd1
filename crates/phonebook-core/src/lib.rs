//! Core types for the phonebook contact store.
//!
//! This crate is deliberately free of I/O. It defines the contact record and
//! its field schema, the query engine, and the [`store::ContactStore`] trait
//! that storage backends implement.

pub mod contact;
pub mod error;
pub mod query;
pub mod store;

pub use contact::{Contact, Field};
pub use error::{Error, Result};
pub use query::{ContactQuery, search};
pub use store::ContactStore;
