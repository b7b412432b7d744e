//! Location module: repository abstraction, SeaORM persistence and service.

pub mod repository;
pub mod service;
pub mod repo;

pub use service::LocationService;
