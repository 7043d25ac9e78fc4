//! Teachers domain module.
//!
//! This crate contains the teacher document model and its input validation,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod payload;
pub mod teacher;

pub use payload::{TeacherPayload, ValidationErrors, Violation};
pub use teacher::{DocumentNumber, Teacher};
