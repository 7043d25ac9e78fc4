//! Teacher CRUD orchestration (application-level service).
//!
//! The service owns the find-then-act pattern for update and delete so the
//! storage capability only needs single-document get/save/delete. A missing
//! teacher is reported as `Ok(None)` throughout; storage failures pass
//! through unchanged.
//!
//! Update and delete are two separate storage calls and are not atomic:
//! concurrent updates to one id are last-write-wins, and a delete returns the
//! value its lookup saw even if another request removed it in between.

use tracing::{debug, instrument};

use faculty_core::TeacherId;
use faculty_teachers::{DocumentNumber, Teacher};

use crate::teacher_store::{TeacherStore, TeacherStoreError, TeacherStream};

pub struct TeacherService<S> {
    store: S,
}

impl<S> TeacherService<S>
where
    S: TeacherStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `teacher` as given and return it with its storage-assigned id.
    #[instrument(skip(self, teacher), err)]
    pub async fn create(&self, teacher: Teacher) -> Result<Teacher, TeacherStoreError> {
        let created = self.store.save(teacher).await?;
        debug!(teacher_id = ?created.id, "teacher created");
        Ok(created)
    }

    #[instrument(skip(self), fields(teacher_id = %id), err)]
    pub async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
        self.store.get(id).await
    }

    pub fn find_all(&self) -> TeacherStream {
        self.store.get_all()
    }

    /// Replace every business field of teacher `id` with `new_values`.
    ///
    /// Returns `Ok(None)` when `id` does not exist; never creates.
    #[instrument(skip(self, new_values), fields(teacher_id = %id), err)]
    pub async fn update(
        &self,
        id: &TeacherId,
        new_values: Teacher,
    ) -> Result<Option<Teacher>, TeacherStoreError> {
        let Some(existing) = self.store.get(id).await? else {
            debug!("update target not found");
            return Ok(None);
        };

        let saved = self.store.save(existing.replace_fields(new_values)).await?;
        debug!("teacher updated");
        Ok(Some(saved))
    }

    /// Delete teacher `id`, returning the value it had before deletion.
    #[instrument(skip(self), fields(teacher_id = %id), err)]
    pub async fn delete_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
        let Some(existing) = self.store.get(id).await? else {
            debug!("delete target not found");
            return Ok(None);
        };

        self.store.delete(&existing).await?;
        debug!("teacher deleted");
        Ok(Some(existing))
    }

    pub fn find_by_name(&self, name: &str) -> TeacherStream {
        self.store.query_by_name(name)
    }

    pub fn find_by_number_document(&self, number: DocumentNumber) -> TeacherStream {
        self.store.query_by_number_document(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use futures::TryStreamExt;
    use proptest::prelude::*;

    use crate::teacher_store::InMemoryTeacherStore;

    fn number(n: i32) -> DocumentNumber {
        DocumentNumber::new(n).unwrap()
    }

    fn juan() -> Teacher {
        Teacher::new("Juan", "Masculino", NaiveDate::from_ymd_opt(1980, 5, 17), "dni", number(109999), "Suarez")
    }

    fn mariana() -> Teacher {
        Teacher::new("Mariana", "Femenino", NaiveDate::from_ymd_opt(1991, 2, 3), "dni", number(259999), "Suarez")
    }

    fn adrian() -> Teacher {
        Teacher::new("Adrian", "Masculino", None, "Carnet", number(79999), "Suarez")
    }

    fn service() -> TeacherService<InMemoryTeacherStore> {
        TeacherService::new(InMemoryTeacherStore::new())
    }

    fn missing_id() -> TeacherId {
        "NOT_EXIST_ID".parse().unwrap()
    }

    /// Store whose every operation fails, to check error propagation.
    struct BrokenStore;

    #[async_trait::async_trait]
    impl TeacherStore for BrokenStore {
        async fn get(&self, _id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
            Err(TeacherStoreError::Database("connection refused".to_string()))
        }

        async fn save(&self, _teacher: Teacher) -> Result<Teacher, TeacherStoreError> {
            Err(TeacherStoreError::Database("connection refused".to_string()))
        }

        async fn delete(&self, _teacher: &Teacher) -> Result<(), TeacherStoreError> {
            Err(TeacherStoreError::Database("connection refused".to_string()))
        }

        fn get_all(&self) -> TeacherStream {
            crate::teacher_store::r#trait::deferred(async {
                Err::<Vec<Teacher>, _>(TeacherStoreError::Database("connection refused".to_string()))
            })
        }

        fn query_by_name(&self, _name: &str) -> TeacherStream {
            self.get_all()
        }

        fn query_by_number_document(&self, _number: DocumentNumber) -> TeacherStream {
            self.get_all()
        }
    }

    /// In-memory store that records which documents were handed to `delete`.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryTeacherStore,
        deleted: Mutex<Vec<Teacher>>,
    }

    #[async_trait::async_trait]
    impl TeacherStore for RecordingStore {
        async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
            self.inner.get(id).await
        }

        async fn save(&self, teacher: Teacher) -> Result<Teacher, TeacherStoreError> {
            self.inner.save(teacher).await
        }

        async fn delete(&self, teacher: &Teacher) -> Result<(), TeacherStoreError> {
            self.deleted.lock().unwrap().push(teacher.clone());
            self.inner.delete(teacher).await
        }

        fn get_all(&self) -> TeacherStream {
            self.inner.get_all()
        }

        fn query_by_name(&self, name: &str) -> TeacherStream {
            self.inner.query_by_name(name)
        }

        fn query_by_number_document(&self, number: DocumentNumber) -> TeacherStream {
            self.inner.query_by_number_document(number)
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_keeps_business_fields() {
        let svc = service();
        let created = svc.create(juan()).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created, juan());
    }

    #[tokio::test]
    async fn find_all_returns_everything_in_storage_order() {
        let svc = service();
        for t in [juan(), mariana(), adrian()] {
            svc.create(t).await.unwrap();
        }

        let all: Vec<Teacher> = svc.find_all().try_collect().await.unwrap();
        assert_eq!(all, vec![juan(), mariana(), adrian()]);
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let all: Vec<Teacher> = service().find_all().try_collect().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn find_by_id_hit_and_miss() {
        let svc = service();
        let created = svc.create(juan()).await.unwrap();

        let found = svc.find_by_id(created.id.as_ref().unwrap()).await.unwrap();
        assert_eq!(found, Some(juan()));
        assert!(svc.find_by_id(&missing_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_business_fields_and_keeps_id() {
        let svc = service();
        let created = svc.create(juan()).await.unwrap();
        let id = created.id.clone().unwrap();

        let incoming = adrian().with_id("client-side".parse().unwrap());
        let updated = svc.update(&id, incoming).await.unwrap().unwrap();

        assert_eq!(updated.id, Some(id.clone()));
        assert_eq!(updated, adrian());
        // Omitted date of birth overwrote the stored one.
        assert_eq!(updated.date_of_birth, None);

        let reloaded = svc.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(reloaded, adrian());

        let all: Vec<Teacher> = svc.find_all().try_collect().await.unwrap();
        assert_eq!(all.len(), 1, "update must not create a second document");
    }

    #[tokio::test]
    async fn update_missing_id_is_empty_and_does_not_upsert() {
        let svc = service();
        assert!(svc.update(&missing_id(), juan()).await.unwrap().is_none());

        let all: Vec<Teacher> = svc.find_all().try_collect().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn delete_returns_prior_value_and_removes_it() {
        let svc = TeacherService::new(RecordingStore::default());
        let created = svc.create(mariana()).await.unwrap();
        let id = created.id.clone().unwrap();

        let deleted = svc.delete_by_id(&id).await.unwrap().unwrap();
        assert_eq!(deleted, mariana());
        assert_eq!(deleted.id, Some(id.clone()));
        assert_eq!(svc.store().deleted.lock().unwrap().len(), 1);

        assert!(svc.find_by_id(&id).await.unwrap().is_none());
        assert!(svc.delete_by_id(&id).await.unwrap().is_none());
        assert_eq!(svc.store().deleted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_id_is_empty() {
        assert!(service().delete_by_id(&missing_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_name_returns_exact_subset() {
        let svc = service();
        for t in [juan(), mariana(), adrian(), mariana()] {
            svc.create(t).await.unwrap();
        }

        let hits: Vec<Teacher> = svc.find_by_name("Mariana").try_collect().await.unwrap();
        assert_eq!(hits, vec![mariana(), mariana()]);

        let none: Vec<Teacher> = svc.find_by_name("Nadie").try_collect().await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_by_number_document_returns_exact_subset() {
        let svc = service();
        for t in [juan(), mariana(), adrian()] {
            svc.create(t).await.unwrap();
        }

        let hits: Vec<Teacher> = svc
            .find_by_number_document(number(109999))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(hits, vec![juan()]);

        let none: Vec<Teacher> = svc
            .find_by_number_document(number(1))
            .try_collect()
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let svc = TeacherService::new(BrokenStore);

        assert!(matches!(svc.create(juan()).await, Err(TeacherStoreError::Database(_))));
        assert!(matches!(svc.find_by_id(&missing_id()).await, Err(TeacherStoreError::Database(_))));
        assert!(matches!(svc.update(&missing_id(), juan()).await, Err(TeacherStoreError::Database(_))));
        assert!(matches!(svc.delete_by_id(&missing_id()).await, Err(TeacherStoreError::Database(_))));

        let listed: Result<Vec<Teacher>, _> = svc.find_all().try_collect().await;
        assert!(matches!(listed, Err(TeacherStoreError::Database(_))));
    }

    fn arb_teacher() -> impl Strategy<Value = Teacher> {
        (
            "[A-Za-z]{1,12}",
            prop_oneof![Just("Masculino"), Just("Femenino")],
            proptest::option::of((1950i32..2005, 1u32..=12, 1u32..=28)),
            prop_oneof![Just("dni"), Just("Carnet")],
            1i32..=i32::MAX,
            "[A-Za-z]{1,12}",
        )
            .prop_map(|(name, gender, dob, kind, n, family)| {
                Teacher::new(
                    name,
                    gender,
                    dob.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
                    kind,
                    number(n),
                    family,
                )
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: update is a full replace of business fields, keeps the id,
        /// and applying the same values twice gives the same result.
        #[test]
        fn update_is_full_replace_and_idempotent(original in arb_teacher(), values in arb_teacher()) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let svc = service();
                let id = svc.create(original).await.unwrap().id.unwrap();

                let first = svc.update(&id, values.clone()).await.unwrap().unwrap();
                let second = svc.update(&id, values.clone()).await.unwrap().unwrap();
                let reloaded = svc.find_by_id(&id).await.unwrap().unwrap();

                assert_eq!(first.id.as_ref(), Some(&id));
                assert_eq!(&first, &values);
                assert_eq!(&second, &first);
                assert_eq!(second.id, first.id);
                assert_eq!(reloaded, values);
            });
        }
    }
}
