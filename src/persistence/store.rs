//! SQLite-backed task store.
//!
//! Two tables, `tasks` and `finished_tasks`, with the active row identity
//! being SQLite's implicit rowid. All statements are parameterized; user
//! text never reaches the SQL string. The finish transition runs inside a
//! single transaction so a reader can never observe the task absent from
//! both tables.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::domain::{
    format_timestamp, parse_timestamp, FinishedTask, Task, TaskFields, TaskId,
};
use crate::error::{Error, Result, ValidationError};
use crate::persistence::files::db_path;

/// Persistent store for active and finished tasks.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open or create the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open or create the store in the default data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(db_path()?)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                title TEXT NOT NULL,
                text_content TEXT NOT NULL,
                time_limit TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS finished_tasks (
                title TEXT NOT NULL,
                text_content TEXT NOT NULL,
                time_done TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Active tasks ordered by deadline, soonest first. The stored
    /// fixed-width timestamp format makes lexicographic order chronological.
    pub fn list_active(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT rowid, title, text_content, time_limit FROM tasks ORDER BY time_limit",
        )?;
        let rows = stmt.query_map([], task_from_row)?;
        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Finished tasks in insertion order.
    pub fn list_finished(&self) -> Result<Vec<FinishedTask>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, text_content, time_done FROM finished_tasks")?;
        let rows = stmt.query_map([], finished_from_row)?;
        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Insert a new task and return its row id. Title and description must
    /// be non-empty.
    pub fn insert(&self, fields: &TaskFields) -> Result<TaskId> {
        check_text_fields(fields)?;
        self.conn.execute(
            "INSERT INTO tasks (title, text_content, time_limit) VALUES (?1, ?2, ?3)",
            params![
                fields.title,
                fields.description,
                format_timestamp(fields.deadline)
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, title = %fields.title, "inserted task");
        Ok(id)
    }

    /// Overwrite all user-editable fields of a task.
    pub fn update(&self, id: TaskId, fields: &TaskFields) -> Result<()> {
        check_text_fields(fields)?;
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?1, text_content = ?2, time_limit = ?3 WHERE rowid = ?4",
            params![
                fields.title,
                fields.description,
                format_timestamp(fields.deadline),
                id
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        debug!(id, "updated task");
        Ok(())
    }

    /// Remove a task. Deleting an absent id is a no-op, not an error.
    pub fn delete(&self, id: TaskId) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE rowid = ?1", params![id])?;
        debug!(id, deleted = changed > 0, "delete task");
        Ok(())
    }

    /// Move a task to the archive, stamping it with `now`. The remove and
    /// the archive insert commit together or not at all.
    pub fn finish(&mut self, id: TaskId, now: NaiveDateTime) -> Result<()> {
        let tx = self.conn.transaction()?;

        let task: Option<(String, String)> = tx
            .query_row(
                "SELECT title, text_content FROM tasks WHERE rowid = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (title, description) = task.ok_or(Error::NotFound(id))?;

        tx.execute("DELETE FROM tasks WHERE rowid = ?1", params![id])?;
        tx.execute(
            "INSERT INTO finished_tasks (title, text_content, time_done) VALUES (?1, ?2, ?3)",
            params![title, description, format_timestamp(now)],
        )?;

        tx.commit()?;
        debug!(id, "finished task");
        Ok(())
    }

    /// Number of active tasks, without materializing rows.
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Whether an active task with this id exists.
    pub fn contains(&self, id: TaskId) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM tasks WHERE rowid = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

fn check_text_fields(fields: &TaskFields) -> Result<()> {
    if fields.title.is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }
    if fields.description.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    Ok(())
}

/// Parse a stored timestamp inside a row-mapping closure, surfacing bad
/// data as a conversion failure rather than a panic.
fn column_timestamp(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        deadline: column_timestamp(row, 3)?,
    })
}

fn finished_from_row(row: &Row) -> rusqlite::Result<FinishedTask> {
    Ok(FinishedTask {
        title: row.get(0)?,
        description: row.get(1)?,
        completed_at: column_timestamp(row, 2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn fields(title: &str, desc: &str, deadline: &str) -> TaskFields {
        TaskFields::new(title, desc, ts(deadline))
    }

    #[test]
    fn test_insert_and_list_round_trip() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store
            .insert(&fields("groceries", "milk and eggs", "2024-06-01 18:00:00"))
            .unwrap();

        let tasks = store.list_active().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].title, "groceries");
        assert_eq!(tasks[0].description, "milk and eggs");
        assert_eq!(tasks[0].deadline, ts("2024-06-01 18:00:00"));
    }

    #[test]
    fn test_list_active_ordered_by_deadline() {
        let store = TaskStore::open_in_memory().unwrap();
        store
            .insert(&fields("later", "d", "2024-06-03 09:00:00"))
            .unwrap();
        store
            .insert(&fields("soonest", "d", "2024-06-01 09:00:00"))
            .unwrap();
        store
            .insert(&fields("middle", "d", "2024-06-02 09:00:00"))
            .unwrap();

        let titles: Vec<String> = store
            .list_active()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["soonest", "middle", "later"]);
    }

    #[test]
    fn test_insert_rejects_empty_title() {
        let store = TaskStore::open_in_memory().unwrap();
        let err = store
            .insert(&fields("", "desc", "2024-06-01 09:00:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyTitle)
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_rejects_empty_description() {
        let store = TaskStore::open_in_memory().unwrap();
        let err = store
            .insert(&fields("title", "", "2024-06-01 09:00:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyDescription)
        ));
    }

    #[test]
    fn test_insert_hostile_text_stays_data() {
        // Quotes and statement fragments in user text must be stored
        // verbatim, never interpreted.
        let store = TaskStore::open_in_memory().unwrap();
        let title = "Robert'); DROP TABLE tasks;--";
        store
            .insert(&fields(title, "d", "2024-06-01 09:00:00"))
            .unwrap();

        let tasks = store.list_active().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, title);
    }

    #[test]
    fn test_update() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store
            .insert(&fields("old", "old desc", "2024-06-01 09:00:00"))
            .unwrap();

        store
            .update(id, &fields("new", "new desc", "2024-07-01 10:30:00"))
            .unwrap();

        let tasks = store.list_active().unwrap();
        assert_eq!(tasks[0].title, "new");
        assert_eq!(tasks[0].description, "new desc");
        assert_eq!(tasks[0].deadline, ts("2024-07-01 10:30:00"));
    }

    #[test]
    fn test_update_missing_row() {
        let store = TaskStore::open_in_memory().unwrap();
        let err = store
            .update(99, &fields("t", "d", "2024-06-01 09:00:00"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(99)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store
            .insert(&fields("t", "d", "2024-06-01 09:00:00"))
            .unwrap();

        store.delete(id).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        // Second delete of the same id is a no-op.
        store.delete(id).unwrap();
    }

    #[test]
    fn test_finish_moves_task() {
        let mut store = TaskStore::open_in_memory().unwrap();
        let id = store
            .insert(&fields("ship", "release v2", "2024-06-01 09:00:00"))
            .unwrap();

        let now = ts("2024-05-30 15:45:10");
        store.finish(id, now).unwrap();

        assert_eq!(store.list_active().unwrap().len(), 0);
        let finished = store.list_finished().unwrap();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].title, "ship");
        assert_eq!(finished[0].description, "release v2");
        assert_eq!(finished[0].completed_at, now);
    }

    #[test]
    fn test_finish_twice_is_not_found_without_duplicate() {
        let mut store = TaskStore::open_in_memory().unwrap();
        let id = store
            .insert(&fields("once", "d", "2024-06-01 09:00:00"))
            .unwrap();

        let now = ts("2024-05-30 15:45:10");
        store.finish(id, now).unwrap();
        let err = store.finish(id, now).unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.list_finished().unwrap().len(), 1);
    }

    #[test]
    fn test_finish_missing_row_leaves_archive_untouched() {
        let mut store = TaskStore::open_in_memory().unwrap();
        let err = store.finish(42, ts("2024-05-30 15:45:10")).unwrap_err();
        assert!(matches!(err, Error::NotFound(42)));
        assert_eq!(store.list_finished().unwrap().len(), 0);
    }

    #[test]
    fn test_count() {
        let store = TaskStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        store
            .insert(&fields("a", "d", "2024-06-01 09:00:00"))
            .unwrap();
        store
            .insert(&fields("b", "d", "2024-06-02 09:00:00"))
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_contains() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store
            .insert(&fields("a", "d", "2024-06-01 09:00:00"))
            .unwrap();
        assert!(store.contains(id).unwrap());
        assert!(!store.contains(id + 1).unwrap());
    }

    #[test]
    fn test_reads_legacy_timestamp_suffix() {
        // Older databases carry fractional-second suffixes; only the first
        // 19 characters count.
        let store = TaskStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO tasks (title, text_content, time_limit) VALUES (?1, ?2, ?3)",
                params!["legacy", "d", "2023-11-05 08:15:00.123456"],
            )
            .unwrap();

        let tasks = store.list_active().unwrap();
        assert_eq!(tasks[0].deadline, ts("2023-11-05 08:15:00"));
    }

    #[test]
    fn test_list_finished_insertion_order() {
        let mut store = TaskStore::open_in_memory().unwrap();
        let a = store
            .insert(&fields("first", "d", "2024-06-01 09:00:00"))
            .unwrap();
        let b = store
            .insert(&fields("second", "d", "2024-06-02 09:00:00"))
            .unwrap();

        store.finish(a, ts("2024-05-30 10:00:00")).unwrap();
        store.finish(b, ts("2024-05-30 11:00:00")).unwrap();

        let titles: Vec<String> = store
            .list_finished()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        {
            let store = TaskStore::open(&path).unwrap();
            store
                .insert(&fields("persist", "d", "2024-06-01 09:00:00"))
                .unwrap();
        }

        // Reopen and observe the same data.
        let store = TaskStore::open(&path).unwrap();
        let tasks = store.list_active().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "persist");
    }
}
