//! Core entities and interfaces for corp-lens
//!
//! This crate defines the typed snapshots the report engine consumes, the validation
//! applied at the data-access boundary, and the interfaces of the collaborators the
//! engine depends on (data store, collector, persona analysis).

pub mod error;
pub mod memory;
pub mod model;
pub mod repository;

pub use error::{Error, Result};
pub use memory::{CompanyBundle, InMemoryRepository, Snapshot};
pub use model::{
    Company, Disclosure, FinancialRecord, MarketBar, Narrative, SectionType, Segment,
    SupportResistanceLevel, validate_bars,
};
pub use repository::{CollectorService, CompanyRepository, PersonaAnalysisService};
