//! courselens: browse a catalog of course review aggregates.
//!
//! The [`lists`] module is the list-view engine (filtering, null-last
//! sorting, pagination with an abbreviated page navigator). [`catalog`]
//! defines the course record and where snapshots come from; [`config`]
//! holds application settings.

pub mod catalog;
pub mod config;
pub mod lists;
pub mod version;
