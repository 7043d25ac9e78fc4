use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use thiserror::Error;

use faculty_core::TeacherId;
use faculty_teachers::{DocumentNumber, Teacher};

/// A cold, finite sequence of teachers.
///
/// Nothing is read from storage until the stream is first polled, and every
/// call that returns one starts an independent read.
pub type TeacherStream = BoxStream<'static, Result<Teacher, TeacherStoreError>>;

/// Teacher store operation error.
///
/// These are **infrastructure errors** (connectivity, serialization). A
/// missing record is never an error here: `get` returns `None` and queries
/// return an empty stream.
#[derive(Debug, Error)]
pub enum TeacherStoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("document serialization failed: {0}")]
    Serialization(String),

    #[error("cannot delete a teacher that has no id")]
    MissingId,

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Document-store capability for teachers.
///
/// Consistency expectations: a completed `save` is visible to a following
/// `get`, and reads reflect the latest completed `save`/`delete`. Nothing
/// beyond single-document operations is required.
#[async_trait::async_trait]
pub trait TeacherStore: Send + Sync {
    async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError>;

    /// Persist the full document.
    ///
    /// Assigns a fresh id when `teacher.id` is `None`; otherwise overwrites
    /// (or creates) the record with that id.
    async fn save(&self, teacher: Teacher) -> Result<Teacher, TeacherStoreError>;

    async fn delete(&self, teacher: &Teacher) -> Result<(), TeacherStoreError>;

    /// All teachers, in storage order.
    fn get_all(&self) -> TeacherStream;

    /// Exact match on `name`.
    fn query_by_name(&self, name: &str) -> TeacherStream;

    /// Exact match on `numberDocument`.
    fn query_by_number_document(&self, number: DocumentNumber) -> TeacherStream;
}

#[async_trait::async_trait]
impl<S> TeacherStore for Arc<S>
where
    S: TeacherStore + ?Sized,
{
    async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
        (**self).get(id).await
    }

    async fn save(&self, teacher: Teacher) -> Result<Teacher, TeacherStoreError> {
        (**self).save(teacher).await
    }

    async fn delete(&self, teacher: &Teacher) -> Result<(), TeacherStoreError> {
        (**self).delete(teacher).await
    }

    fn get_all(&self) -> TeacherStream {
        (**self).get_all()
    }

    fn query_by_name(&self, name: &str) -> TeacherStream {
        (**self).query_by_name(name)
    }

    fn query_by_number_document(&self, number: DocumentNumber) -> TeacherStream {
        (**self).query_by_number_document(number)
    }
}

/// Turn a deferred batch read into a [`TeacherStream`].
///
/// `read` is only polled once the stream is, so building the stream costs no IO.
pub(crate) fn deferred<F>(read: F) -> TeacherStream
where
    F: Future<Output = Result<Vec<Teacher>, TeacherStoreError>> + Send + 'static,
{
    stream::once(read)
        .map_ok(|teachers| stream::iter(teachers.into_iter().map(Ok::<Teacher, TeacherStoreError>)))
        .try_flatten()
        .boxed()
}
