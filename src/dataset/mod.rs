// Dataset loading — source references, fetching, CSV parsing, caching.

pub mod cache;
pub mod fetch;
pub mod loader;
pub mod models;
pub mod source;

pub use cache::DatasetCache;
pub use loader::{LoadOptions, MissingText};
pub use models::{Dataset, Label, Record};
pub use source::DataSource;
