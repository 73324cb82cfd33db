// Service exports
pub mod catalog;
pub mod scorecard;

pub use catalog::{CatalogError, CatalogSnapshot, CollegeCatalog, RefreshHandle};
pub use scorecard::{map_school, CancelFlag, FetchOptions, ScorecardClient, ScorecardError};
