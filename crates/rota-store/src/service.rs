//! Business-logic facade over the todo repository.
//!
//! [`TodoService`] owns the connection pool. Each call acquires a connection
//! for its own duration only and runs the blocking SQL on the blocking
//! thread pool; nothing is cached across calls. Mutating operations run
//! inside a transaction that rolls back on any failure, so a failed write
//! never leaves a partial row behind.
//!
//! Absence is a value here: `get`/`update`/`delete` return `Ok(None)` for a
//! missing id rather than an error. The HTTP layer turns that into a 404.

use tracing::{debug, info};

use crate::errors::{Result, StoreError};
use crate::sqlite::connection::ConnectionPool;
use crate::sqlite::repository::TodoRepo;
use crate::types::{Priority, Todo, TodoCreate, TodoPatch};

/// Fixed sample data inserted by [`TodoService::seed`].
const SEED_TODOS: &[(&str, &str, Priority)] = &[
    ("sports", "badminton game", Priority::Low),
    ("work", "complete project proposal", Priority::High),
    ("health", "morning yoga session", Priority::Medium),
    ("learning", "read 30 pages of JavaScript book", Priority::Medium),
    ("personal", "call mom for weekend plans", Priority::Low),
    ("finance", "review monthly budget", Priority::High),
    ("home", "organize desk workspace", Priority::Low),
    ("social", "dinner with college friends", Priority::Low),
    ("hobby", "practice guitar chords", Priority::Low),
    ("shopping", "buy groceries for the week", Priority::Medium),
];

/// Todo service: async facade over the SQL repository.
#[derive(Clone)]
pub struct TodoService {
    pool: ConnectionPool,
}

impl TodoService {
    /// Create a service over the given pool.
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Run a blocking storage closure on the blocking thread pool.
    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(ConnectionPool) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || f(pool))
            .await
            .map_err(|e| StoreError::Internal(format!("storage task failed: {e}")))?
    }

    /// List todos, most urgent first, newest first within a priority level.
    /// `limit` truncates the result when positive.
    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<Todo>> {
        self.run(move |pool| {
            let conn = pool.get()?;
            TodoRepo::list(&conn, limit)
        })
        .await
    }

    /// Get a todo by id; `Ok(None)` when absent.
    pub async fn get(&self, id: i64) -> Result<Option<Todo>> {
        self.run(move |pool| {
            let conn = pool.get()?;
            TodoRepo::get(&conn, id)
        })
        .await
    }

    /// Create a todo. Expects already-validated input; the id and both
    /// timestamps are assigned here.
    pub async fn create(&self, input: TodoCreate) -> Result<Todo> {
        let todo = self
            .run(move |pool| {
                let mut conn = pool.get()?;
                let tx = conn.transaction()?;
                let todo = TodoRepo::insert(&tx, &input)?;
                tx.commit()?;
                Ok(todo)
            })
            .await?;
        info!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// Apply a partial update; `Ok(None)` when absent. Only fields present
    /// in the patch are overwritten.
    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Option<Todo>> {
        let updated = self
            .run(move |pool| {
                let mut conn = pool.get()?;
                let tx = conn.transaction()?;
                let updated = TodoRepo::update(&tx, id, &patch)?;
                tx.commit()?;
                Ok(updated)
            })
            .await?;
        if updated.is_some() {
            info!(id, "todo updated");
        }
        Ok(updated)
    }

    /// Delete a todo, returning its pre-deletion snapshot; `Ok(None)` when
    /// absent.
    pub async fn delete(&self, id: i64) -> Result<Option<Todo>> {
        let deleted = self
            .run(move |pool| {
                let mut conn = pool.get()?;
                let tx = conn.transaction()?;
                let deleted = TodoRepo::delete(&tx, id)?;
                tx.commit()?;
                Ok(deleted)
            })
            .await?;
        if deleted.is_some() {
            info!(id, "todo deleted");
        }
        Ok(deleted)
    }

    /// All todos at the given priority, newest first.
    pub async fn filter_by_priority(&self, priority: Priority) -> Result<Vec<Todo>> {
        self.run(move |pool| {
            let conn = pool.get()?;
            TodoRepo::by_priority(&conn, priority)
        })
        .await
    }

    /// Case-insensitive substring search over name and description.
    pub async fn search(&self, term: String) -> Result<Vec<Todo>> {
        self.run(move |pool| {
            let conn = pool.get()?;
            TodoRepo::search(&conn, &term)
        })
        .await
    }

    /// Count total todos.
    pub async fn count(&self) -> Result<i64> {
        self.run(|pool| {
            let conn = pool.get()?;
            TodoRepo::count(&conn)
        })
        .await
    }

    /// Seed the fixed sample set. Idempotent: a no-op when any record
    /// already exists. Returns the number of todos inserted.
    pub async fn seed(&self) -> Result<usize> {
        let inserted = self
            .run(|pool| {
                let mut conn = pool.get()?;
                let tx = conn.transaction()?;
                if TodoRepo::count(&tx)? > 0 {
                    debug!("seed skipped, data already exists");
                    return Ok(0);
                }
                for (name, description, priority) in SEED_TODOS {
                    let _ = TodoRepo::insert(
                        &tx,
                        &TodoCreate {
                            name: (*name).to_string(),
                            description: (*description).to_string(),
                            priority: *priority,
                        },
                    )?;
                }
                tx.commit()?;
                Ok(SEED_TODOS.len())
            })
            .await?;
        if inserted > 0 {
            info!(inserted, "seeded sample todos");
        }
        Ok(inserted)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
