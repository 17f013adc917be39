//! Embedded transit schema and integrity model
//!
//! Viaduct holds a small relational transit schema — lines, stops, ordered
//! line memberships, trips and stop events — in memory, enforcing every
//! uniqueness, bounds and referential constraint at write time and
//! cascading deletes through the ownership graph. On top of the store sits
//! a fixed catalog of ten analytical queries over routes, schedules,
//! ridership and delays.
//!
//! Datasets are loaded from CSV files with [`loading::load_dataset`];
//! queries run through [`query::run_query`] and return JSON-serializable
//! reports.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod query;
pub mod store;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;
pub use store::TransitStore;
