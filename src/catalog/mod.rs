//! Course catalog records and the sources they are loaded from.
//!
//! The list-view engine works on an already-materialized snapshot of the
//! catalog. This module defines the record type, the [`CourseSource`] seam
//! used to obtain the snapshot, and a file-backed source.

pub mod types;
pub mod source;
pub mod errors;

pub use types::*;
pub use source::*;
pub use errors::*;
