//! The data source boundary of the system.
//!
//! The metrics engine is agnostic to where records come from; anything that
//! can produce the five typed collections behind [`DataSource::load`] works.
//! `SyntheticSource` is the current implementation and is intended to be
//! replaced by a spreadsheet/CSV reader without touching anything downstream.

use core_types::DataSnapshot;

pub mod error;
pub mod fx;
pub mod synthetic;

pub use error::SourceError;
pub use synthetic::SyntheticSource;

/// A producer of one fully-materialized, validated record snapshot.
pub trait DataSource {
    fn load(&self) -> Result<DataSnapshot, SourceError>;
}
