//! Error types for the index gateway repository.

mod index_error;

pub use index_error::IndexError;
