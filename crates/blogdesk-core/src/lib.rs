//! # Blogdesk Core
//!
//! The domain layer of the blogdesk client.
//! This crate holds the blog record, query keys and the store port, with
//! no network or runtime dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, StoreError};
