//! Infrastructure layer: teacher storage backends, the teacher service, config.

pub mod config;
pub mod teacher_service;
pub mod teacher_store;

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use teacher_service::TeacherService;
pub use teacher_store::{
    InMemoryTeacherStore, PostgresTeacherStore, TeacherStore, TeacherStoreError, TeacherStream,
};
