//! # bkb-site
//!
//! Presentation layer for the generated knowledge base.
//!
//! - [`Catalog`] groups records by category and filters them by name
//! - [`DocumentStore`] reads a generated document back through the codec
//! - [`unwrap_fenced`] strips a markdown fence wrapping a whole document
//! - [`document_url`] builds the fetch URL for a document
//! - [`write_site`] emits the static browsing page and its `index.json`
//! - [`StaticServer`] serves the page and documents locally

mod catalog;
mod error;
mod fence;
mod page;
pub mod serve;
mod store;
pub mod url;

pub use catalog::{Catalog, CatalogEntry, CategoryGroup, SiteIndex};
pub use error::{FetchError, SiteError};
pub use fence::unwrap_fenced;
pub use page::{INDEX_HTML, INDEX_HTML_FILE, INDEX_JSON_FILE, SiteFiles, write_site};
pub use serve::{ServeOptions, StaticServer};
pub use store::DocumentStore;
pub use url::{document_url, encode_component};
