//! Confluence REST API access.
//!
//! The [`ConfluenceApi`] trait is the seam between the exporter and the
//! network. [`ConfluenceClient`] is the real HTTP implementation; tests
//! substitute an in-memory fake.

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use api::ConfluenceApi;
pub use client::ConfluenceClient;
pub use error::ApiError;
pub use models::{ChildPage, ChildPagesResponse, Page, PageBody, StorageFormat};
