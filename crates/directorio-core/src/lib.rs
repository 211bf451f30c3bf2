//! Directorio Core Library
//!
//! This crate provides the core functionality for the municipal staff
//! directory: the record model, search and ordering, and the rules for
//! combining built-in records with an externally published list.
//!
//! # Architecture
//!
//! - **Directory**: owns the record set and the filter/sort state
//! - **Query engine**: pure filtering and sorting over the record set
//!
//! The visible list is recomputed from (records, filter) on demand.
//!
//! # Quick Start
//!
//! ```text
//! let mut directory = Directory::new();
//!
//! // Merge in the published list (silently skipped on failure)
//! if let Some(source) = source_for(&config)? {
//!     directory.load_from(source.as_ref()).await;
//! }
//!
//! // Narrow down and sort
//! directory.set_category("Alta Dirección");
//! directory.set_sort(SortKey::Name);
//! let visible = directory.visible();
//! ```
//!
//! # Modules
//!
//! - `store`: The `Directory` state holder (main entry point)
//! - `models`: The `Official` record
//! - `query`: Filtering, sorting and category enumeration
//! - `merge`: Identity-key based merging
//! - `normalize`: Case/accent-insensitive text canonicalization
//! - `source`: Loading the published directory (HTTP or file)
//! - `snapshot`: Import/export of the directory file
//! - `links`: Phone, chat and mail links
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod links;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod query;
pub mod seed;
pub mod snapshot;
pub mod source;
pub mod store;

pub use config::{Config, SourceLocation};
pub use error::{FetchError, ImportError, UnknownValue};
pub use models::{Field, Official};
pub use query::{CategoryFilter, Filter, SortKey};
pub use source::{source_for, FileSource, HttpSource, RecordSource};
pub use store::{Directory, Lookup};
