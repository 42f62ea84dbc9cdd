//! List-view engine for the course catalog.
//!
//! This module narrows a catalog snapshot with range and toggle filters,
//! orders it with a null-last comparator and pages through the result with
//! an abbreviated page navigator. All operations are synchronous and
//! infallible: malformed input degrades to "no constraint".
//!
//! Data flows courses → [`filter::admit`] → [`sort::compare`] → page slice →
//! [`pagination::window`]; [`view_state::ViewStateController`] ties the
//! steps together and keeps the current page valid.

pub mod filter;
pub mod collation;
pub mod sort;
pub mod pagination;
pub mod view_state;

pub use filter::*;
pub use collation::*;
pub use sort::*;
pub use pagination::*;
pub use view_state::*;
