//! Postgres-backed teacher document store.
//!
//! Teachers are kept as JSONB documents in a single `teachers` table keyed by
//! `id`. The `name` and `numberDocument` predicates are served by expression
//! indexes over the document.
//!
//! ## Error Mapping
//!
//! | SQLx Error | TeacherStoreError |
//! |------------|-------------------|
//! | Database (any code) | `Database` |
//! | PoolClosed | `Database` |
//! | ColumnDecode / Decode | `Serialization` |
//! | Other | `Database` |

use std::sync::Arc;

use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{Postgres, Row};
use tracing::instrument;

use faculty_core::TeacherId;
use faculty_teachers::{DocumentNumber, Teacher};

use super::r#trait::{deferred, TeacherStore, TeacherStoreError, TeacherStream};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teachers (
        seq BIGSERIAL NOT NULL,
        id TEXT PRIMARY KEY,
        doc JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS teachers_name_idx ON teachers ((doc->>'name'))",
    "CREATE INDEX IF NOT EXISTS teachers_number_document_idx ON teachers (((doc->>'numberDocument')::int))",
];

/// Postgres-backed teacher document store.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync` and cheap to share.
///
/// ## Consistency
///
/// Every operation is a single statement, so a completed `save` or `delete`
/// is visible to any later read. No multi-statement transactions are used.
#[derive(Debug, Clone)]
pub struct PostgresTeacherStore {
    pool: Arc<PgPool>,
}

impl PostgresTeacherStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect a pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, TeacherStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `teachers` table and its lookup indexes if missing.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), TeacherStoreError> {
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TeacherStore for PostgresTeacherStore {
    #[instrument(skip(self), fields(operation = "get_teacher", teacher_id = %id), err)]
    async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherStoreError> {
        let row = sqlx::query("SELECT id, doc FROM teachers WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_teacher", e))?;

        row.as_ref().map(teacher_from_row).transpose()
    }

    #[instrument(skip(self, teacher), fields(operation = "save_teacher"), err)]
    async fn save(&self, teacher: Teacher) -> Result<Teacher, TeacherStoreError> {
        let id = teacher.id.clone().unwrap_or_else(TeacherId::generate);
        let teacher = teacher.with_id(id.clone());

        sqlx::query(
            r#"
            INSERT INTO teachers (id, doc)
            VALUES ($1, $2)
            ON CONFLICT (id)
            DO UPDATE SET
                doc = EXCLUDED.doc,
                updated_at = NOW()
            "#,
        )
        .bind(id.as_str())
        .bind(Json(&teacher))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_teacher", e))?;

        Ok(teacher)
    }

    #[instrument(skip(self, teacher), fields(operation = "delete_teacher"), err)]
    async fn delete(&self, teacher: &Teacher) -> Result<(), TeacherStoreError> {
        let id = teacher.id.as_ref().ok_or(TeacherStoreError::MissingId)?;
        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_teacher", e))?;
        Ok(())
    }

    fn get_all(&self) -> TeacherStream {
        let query = sqlx::query("SELECT id, doc FROM teachers ORDER BY seq ASC");
        deferred(fetch_teachers(self.pool.clone(), "list_teachers", query))
    }

    fn query_by_name(&self, name: &str) -> TeacherStream {
        let query = sqlx::query("SELECT id, doc FROM teachers WHERE doc->>'name' = $1 ORDER BY seq ASC")
            .bind(name.to_string());
        deferred(fetch_teachers(self.pool.clone(), "query_teachers_by_name", query))
    }

    fn query_by_number_document(&self, number: DocumentNumber) -> TeacherStream {
        let query = sqlx::query(
            "SELECT id, doc FROM teachers WHERE (doc->>'numberDocument')::int = $1 ORDER BY seq ASC",
        )
        .bind(number.get());
        deferred(fetch_teachers(
            self.pool.clone(),
            "query_teachers_by_number_document",
            query,
        ))
    }
}

#[instrument(skip(pool, query), err)]
async fn fetch_teachers(
    pool: Arc<PgPool>,
    operation: &'static str,
    query: Query<'static, Postgres, PgArguments>,
) -> Result<Vec<Teacher>, TeacherStoreError> {
    let rows = query
        .fetch_all(&*pool)
        .await
        .map_err(|e| map_sqlx_error(operation, e))?;
    rows.iter().map(teacher_from_row).collect()
}

/// The `id` column is authoritative; the document copy is overwritten with it.
fn teacher_from_row(row: &PgRow) -> Result<Teacher, TeacherStoreError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| TeacherStoreError::Serialization(format!("failed to read id: {e}")))?;
    let Json(teacher): Json<Teacher> = row
        .try_get("doc")
        .map_err(|e| TeacherStoreError::Serialization(format!("failed to decode document {id}: {e}")))?;

    let id = id
        .parse::<TeacherId>()
        .map_err(|e| TeacherStoreError::Serialization(e.to_string()))?;
    Ok(teacher.with_id(id))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> TeacherStoreError {
    match err {
        sqlx::Error::Database(db_err) => TeacherStoreError::Database(format!(
            "database error in {}: {} (code {})",
            operation,
            db_err.message(),
            db_err.code().as_deref().unwrap_or("unknown"),
        )),
        sqlx::Error::PoolClosed => {
            TeacherStoreError::Database(format!("connection pool closed in {}", operation))
        }
        other @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) => {
            TeacherStoreError::Serialization(format!("decode error in {}: {}", operation, other))
        }
        other => TeacherStoreError::Database(format!("sqlx error in {}: {}", operation, other)),
    }
}
