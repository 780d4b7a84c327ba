//! Table catalog: declared tables plus join-step aliases

mod registry;

pub use registry::TableCatalog;
