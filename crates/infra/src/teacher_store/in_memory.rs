use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use faculty_core::TeacherId;
use faculty_teachers::{DocumentNumber, Teacher};

use super::r#trait::{deferred, TeacherStore, TeacherStoreError, TeacherStream};

#[derive(Debug, Clone)]
struct StoredTeacher {
    /// Insertion position; preserved across overwrites.
    seq: u64,
    teacher: Teacher,
}

#[derive(Debug, Default)]
struct Documents {
    next_seq: u64,
    by_id: HashMap<TeacherId, StoredTeacher>,
}

/// In-memory teacher document store.
///
/// Intended for tests/dev. Listing and queries return documents in insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeacherStore {
    docs: Arc<RwLock<Documents>>,
}

impl InMemoryTeacherStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn select<P>(docs: &RwLock<Documents>, predicate: P) -> Result<Vec<Teacher>, TeacherStoreError>
    where
        P: Fn(&Teacher) -> bool,
    {
        let docs = docs.read().map_err(|_| TeacherStoreError::LockPoisoned)?;
        let mut hits: Vec<&StoredTeacher> = docs
            .by_id
            .values()
            .filter(|s| predicate(&s.teacher))
            .collect();
        hits.sort_by_key(|s| s.seq);
        Ok(hits.into_iter().map(|s| s.teacher.clone()).collect())
    }

    fn query<P>(&self, predicate: P) -> TeacherStream
    where
        P: Fn(&Teacher) -> bool + Send + 'static,
    {
        let docs = self.docs.clone();
        deferred(async move { Self::select(&docs, predicate) })
    }
}

#[async_trait::async_trait]
impl TeacherStore for InMemoryTeacherStore {
    async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
        let docs = self.docs.read().map_err(|_| TeacherStoreError::LockPoisoned)?;
        Ok(docs.by_id.get(id).map(|s| s.teacher.clone()))
    }

    async fn save(&self, teacher: Teacher) -> Result<Teacher, TeacherStoreError> {
        let id = teacher.id.clone().unwrap_or_else(TeacherId::generate);
        let teacher = teacher.with_id(id.clone());

        let mut docs = self.docs.write().map_err(|_| TeacherStoreError::LockPoisoned)?;
        let seq = match docs.by_id.get(&id) {
            Some(existing) => existing.seq,
            None => {
                docs.next_seq += 1;
                docs.next_seq
            }
        };
        docs.by_id.insert(
            id,
            StoredTeacher {
                seq,
                teacher: teacher.clone(),
            },
        );

        Ok(teacher)
    }

    async fn delete(&self, teacher: &Teacher) -> Result<(), TeacherStoreError> {
        let id = teacher.id.as_ref().ok_or(TeacherStoreError::MissingId)?;
        let mut docs = self.docs.write().map_err(|_| TeacherStoreError::LockPoisoned)?;
        docs.by_id.remove(id);
        Ok(())
    }

    fn get_all(&self) -> TeacherStream {
        self.query(|_| true)
    }

    fn query_by_name(&self, name: &str) -> TeacherStream {
        let name = name.to_string();
        self.query(move |t| t.name == name)
    }

    fn query_by_number_document(&self, number: DocumentNumber) -> TeacherStream {
        self.query(move |t| t.number_document == number)
    }
}
