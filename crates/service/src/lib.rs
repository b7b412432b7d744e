//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access: every entity has a repository
//!   trait, an in-memory mock and a SeaORM implementation.
//! - Reuses validation and entity definitions in `models` crate.
//! - Cross-record rules (shift overlaps, delete guards, references) live here.

pub mod errors;
pub mod query;
pub mod worker;
pub mod location;
pub mod shift;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use location::LocationService;
pub use shift::ShiftService;
pub use worker::WorkerService;
