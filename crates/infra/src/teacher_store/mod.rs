//! Teacher document storage boundary.
//!
//! This module defines the storage capability the teacher service consumes,
//! plus an in-memory backend (dev/tests) and a Postgres JSONB backend.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryTeacherStore;
pub use postgres::PostgresTeacherStore;
pub use r#trait::{TeacherStore, TeacherStoreError, TeacherStream};
