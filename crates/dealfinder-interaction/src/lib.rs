//! HTTP adapters for the remote Catalog and User APIs.
//!
//! Both collaborators are black boxes behind the core port traits; this
//! crate owns the wire formats and the mapping from transport and status
//! failures onto the shared error taxonomy.

pub mod catalog_client;
mod dto;
mod http;
pub mod user_client;

pub use catalog_client::HttpCatalogApi;
pub use user_client::HttpUserApi;
