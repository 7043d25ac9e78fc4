use std::sync::Arc;

use faculty_infra::{
    InMemoryTeacherStore, StoreConfig, TeacherService, TeacherStore, TeacherStoreError,
};

/// Store handle shared by the service; either backend erases to this.
pub type SharedTeacherStore = Arc<dyn TeacherStore>;

/// Services reachable from request handlers.
#[derive(Clone)]
pub struct AppServices {
    teachers: Arc<TeacherService<SharedTeacherStore>>,
    backend: &'static str,
}

impl AppServices {
    pub fn new(store: SharedTeacherStore, backend: &'static str) -> Self {
        Self {
            teachers: Arc::new(TeacherService::new(store)),
            backend,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTeacherStore::new()), "in_memory")
    }

    pub fn teachers(&self) -> &TeacherService<SharedTeacherStore> {
        &self.teachers
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

/// Build services for `config`, connecting and migrating Postgres if configured.
pub async fn build_services(config: &StoreConfig) -> Result<AppServices, TeacherStoreError> {
    match config.connect_postgres().await? {
        Some(store) => {
            tracing::info!("using postgres teacher store");
            Ok(AppServices::new(Arc::new(store), "postgres"))
        }
        None => {
            tracing::warn!("USE_PERSISTENT_STORES not enabled; teachers are kept in memory");
            Ok(AppServices::in_memory())
        }
    }
}
