//! Todo repository — CRUD for the `todos` table.
//!
//! Stateless, every method takes `&Connection`: pure translation between
//! Rust types and SQL. Ordering lives in the SQL so every caller gets the
//! same contract: lists and searches order by priority ascending (HIGH
//! first), then creation time descending; `id DESC` breaks ties between
//! rows created within the same timestamp instant.

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::errors::Result;
use crate::types::{Priority, Todo, TodoCreate, TodoPatch};

const SELECT_COLS: &str = "id, name, description, priority, created_at, updated_at";

/// Get current UTC timestamp as an RFC 3339 string.
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let priority_raw: i64 = row.get(3)?;
    let priority = Priority::try_from(priority_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Integer, Box::new(e))
    })?;
    Ok(Todo {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        priority,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Todo repository — stateless, every method takes `&Connection`.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo. The id is assigned by the database and never
    /// reused after deletion.
    pub fn insert(conn: &Connection, input: &TodoCreate) -> Result<Todo> {
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO todos (name, description, priority, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.name,
                input.description,
                input.priority.as_i64(),
                now,
                now
            ],
        )?;
        Ok(Todo {
            id: conn.last_insert_rowid(),
            name: input.name.clone(),
            description: input.description.clone(),
            priority: input.priority,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a todo by id.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Todo>> {
        let row = conn
            .query_row(
                &format!("SELECT {SELECT_COLS} FROM todos WHERE id = ?1"),
                params![id],
                map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// List todos, most urgent first, newest first within a priority level.
    /// `limit` truncates the result when positive.
    pub fn list(conn: &Connection, limit: Option<i64>) -> Result<Vec<Todo>> {
        let base = format!(
            "SELECT {SELECT_COLS} FROM todos
             ORDER BY priority ASC, created_at DESC, id DESC"
        );
        match limit.filter(|n| *n > 0) {
            Some(n) => {
                let mut stmt = conn.prepare(&format!("{base} LIMIT ?1"))?;
                let rows = stmt
                    .query_map(params![n], map_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            }
            None => {
                let mut stmt = conn.prepare(&base)?;
                let rows = stmt
                    .query_map([], map_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            }
        }
    }

    /// Apply a partial update. Only fields present in the patch are
    /// overwritten; `updated_at` is refreshed, `created_at` never changes.
    /// Returns `None` when no row matches.
    pub fn update(conn: &Connection, id: i64, patch: &TodoPatch) -> Result<Option<Todo>> {
        let Some(current) = Self::get(conn, id)? else {
            return Ok(None);
        };

        let name = patch.name.as_deref().unwrap_or(&current.name);
        let description = patch
            .description
            .as_deref()
            .unwrap_or(&current.description);
        let priority = patch.priority.unwrap_or(current.priority);
        let now = now_iso();

        let _ = conn.execute(
            "UPDATE todos SET name = ?1, description = ?2, priority = ?3, updated_at = ?4
             WHERE id = ?5",
            params![name, description, priority.as_i64(), now, id],
        )?;

        Ok(Some(Todo {
            id,
            name: name.to_string(),
            description: description.to_string(),
            priority,
            created_at: current.created_at,
            updated_at: now,
        }))
    }

    /// Delete a todo, returning its pre-deletion snapshot, or `None` when
    /// no row matches.
    pub fn delete(conn: &Connection, id: i64) -> Result<Option<Todo>> {
        let Some(snapshot) = Self::get(conn, id)? else {
            return Ok(None);
        };
        let _ = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(Some(snapshot))
    }

    /// All todos at the given priority, newest first.
    pub fn by_priority(conn: &Connection, priority: Priority) -> Result<Vec<Todo>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLS} FROM todos WHERE priority = ?1
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map(params![priority.as_i64()], map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Case-insensitive substring search over name and description,
    /// ordered like [`TodoRepo::list`].
    pub fn search(conn: &Connection, term: &str) -> Result<Vec<Todo>> {
        let needle = term.to_lowercase();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLS} FROM todos
             WHERE instr(lower(name), ?1) > 0 OR instr(lower(description), ?1) > 0
             ORDER BY priority ASC, created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map(params![needle], map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count total todos.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        Ok(count)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
