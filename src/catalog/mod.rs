//! Tool catalog: data model, fetching, rendering and data management.

pub mod links;
pub mod loader;
pub mod manager;
pub mod model;
pub mod render;
pub mod source;

pub use links::{BaseUrlMode, LinkPolicy};
pub use loader::{CatalogLoader, CatalogSettings, LoadOutcome};
pub use manager::{CatalogManager, NewTool};
pub use model::{IconMap, IconMapExt, ToolCatalog, ToolCatalogExt, ToolEntry};
pub use source::{FileFetcher, Fetcher, HttpFetcher, fetcher_for};
