//! toolshelf - a categorized tool catalog page
//!
//! Fetches the tool catalog and icon documents, renders them as cards into a
//! headless document, applies a persisted light/dark/auto theme and binds the
//! pointer ripple effect to the rendered buttons.

pub mod catalog;
pub mod dom;
pub mod error;
pub mod page;
pub mod ripple;
pub mod theme;

pub use error::{CatalogLoadError, Result, ToolshelfError};
