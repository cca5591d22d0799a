//! Catalog domain.
//!
//! Typed read access to the NUSMods catalog API:
//!
//! - `models` - module, semester, lesson, venue and prerequisite entities
//! - `client` - the `CatalogApi` trait, its HTTP implementation and the
//!   client-side search and department filters
//! - `error` - catalog error taxonomy

mod client;
mod error;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    CatalogApi, CatalogClient, CatalogResult, filter_by_department, search_modules,
};
pub use error::CatalogError;
pub use models::{
    Lesson, ModuleDetail, ModuleSummary, PrereqTree, SemesterRecord, VenueInformation,
    VenueLesson, VenueRecord, WeekRange, Weeks, Workload,
};
