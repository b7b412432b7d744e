//! Shift module. Besides CRUD the service enforces the scheduling rules:
//! referenced worker and location must exist, and shifts of one worker at
//! one location may not overlap (touching intervals are fine).

pub mod repository;
pub mod service;
pub mod repo;

pub use service::ShiftService;
