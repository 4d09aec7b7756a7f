//! Generic record rows and identifier counters.

use rusqlite::{params, ErrorCode, OptionalExtension};

use super::{Database, DbError, DbResult};

/// Map a primary-key clash to [`DbError::Constraint`].
fn constraint_or(e: rusqlite::Error, kind: &str, id: &str) -> DbError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            DbError::Constraint(format!("{kind}/{id} already exists"))
        }
        _ => DbError::Sqlite(e),
    }
}

impl Database {
    /// Append a record body at the end of its kind.
    pub fn insert_record(&self, kind: &str, id: &str, body: &str) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO records (kind, id, position, body)
                VALUES (
                    ?1, ?2,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM records WHERE kind = ?1),
                    ?3
                )
                "#,
                params![kind, id, body],
            )
            .map_err(|e| constraint_or(e, kind, id))?;
        Ok(())
    }

    /// Replace a record body in place (position kept).
    pub fn update_record(&self, kind: &str, id: &str, body: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE records SET
                body = ?3,
                updated_at = datetime('now')
            WHERE kind = ?1 AND id = ?2
            "#,
            params![kind, id, body],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a record body.
    pub fn get_record(&self, kind: &str, id: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT body FROM records WHERE kind = ? AND id = ?",
                [kind, id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// All record bodies of a kind, in insertion order.
    pub fn list_records(&self, kind: &str) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT body
            FROM records
            WHERE kind = ?
            ORDER BY position
            "#,
        )?;

        let rows = stmt.query_map([kind], |row| row.get(0))?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a record.
    pub fn delete_record(&self, kind: &str, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM records WHERE kind = ? AND id = ?", [kind, id])?;
        Ok(rows_affected > 0)
    }

    pub fn count_records(&self, kind: &str) -> DbResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE kind = ?",
            [kind],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Insert many `(id, body)` rows of one kind atomically.
    pub fn insert_records(&mut self, kind: &str, rows: &[(String, String)]) -> DbResult<usize> {
        let tx = self.transaction()?;
        for (id, body) in rows {
            tx.execute(
                r#"
                INSERT INTO records (kind, id, position, body)
                VALUES (
                    ?1, ?2,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM records WHERE kind = ?1),
                    ?3
                )
                "#,
                params![kind, id, body],
            )
            .map_err(|e| constraint_or(e, kind, id))?;
        }
        tx.commit()?;
        Ok(rows.len())
    }

    /// Take the next sequential counter value for a kind.
    pub fn next_sequence(&self, kind: &str) -> DbResult<u64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO id_counters (kind, next) VALUES (?, 1)",
            [kind],
        )?;
        let next: i64 = self.conn.query_row(
            "SELECT next FROM id_counters WHERE kind = ?",
            [kind],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "UPDATE id_counters SET next = next + 1 WHERE kind = ?",
            [kind],
        )?;
        Ok(next as u64)
    }

    /// Raise a kind's counter to at least `next` (never lowers it).
    pub fn ensure_sequence_at_least(&self, kind: &str, next: u64) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO id_counters (kind, next) VALUES (?1, ?2)
            ON CONFLICT(kind) DO UPDATE SET next = MAX(next, excluded.next)
            "#,
            params![kind, next as i64],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_list_in_order() {
        let db = setup_db();

        db.insert_record("beds", "B002", r#"{"id":"B002"}"#).unwrap();
        db.insert_record("beds", "B001", r#"{"id":"B001"}"#).unwrap();
        db.insert_record("reports", "R001", r#"{"id":"R001"}"#).unwrap();

        let bodies = db.list_records("beds").unwrap();
        assert_eq!(bodies, vec![r#"{"id":"B002"}"#, r#"{"id":"B001"}"#]);
        assert_eq!(db.count_records("reports").unwrap(), 1);
    }

    #[test]
    fn test_update_keeps_position() {
        let db = setup_db();

        db.insert_record("beds", "B001", r#"{"id":"B001","ward":"A"}"#).unwrap();
        db.insert_record("beds", "B002", r#"{"id":"B002","ward":"A"}"#).unwrap();

        assert!(db.update_record("beds", "B001", r#"{"id":"B001","ward":"C"}"#).unwrap());
        assert!(!db.update_record("beds", "B404", "{}").unwrap());

        let bodies = db.list_records("beds").unwrap();
        assert!(bodies[0].contains("\"ward\":\"C\""));
    }

    #[test]
    fn test_duplicate_is_constraint_error() {
        let db = setup_db();

        db.insert_record("beds", "B001", "{}").unwrap();
        let result = db.insert_record("beds", "B001", "{}");
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_delete() {
        let db = setup_db();

        db.insert_record("beds", "B001", "{}").unwrap();
        assert!(db.delete_record("beds", "B001").unwrap());
        assert!(!db.delete_record("beds", "B001").unwrap());
        assert!(db.get_record("beds", "B001").unwrap().is_none());
    }

    #[test]
    fn test_sequence_counters() {
        let db = setup_db();

        assert_eq!(db.next_sequence("beds").unwrap(), 1);
        assert_eq!(db.next_sequence("beds").unwrap(), 2);
        assert_eq!(db.next_sequence("reports").unwrap(), 1);

        db.ensure_sequence_at_least("beds", 10).unwrap();
        assert_eq!(db.next_sequence("beds").unwrap(), 10);

        // Never lowered
        db.ensure_sequence_at_least("beds", 3).unwrap();
        assert_eq!(db.next_sequence("beds").unwrap(), 11);
    }

    #[test]
    fn test_insert_records_is_atomic() {
        let mut db = setup_db();

        let rows = vec![
            ("B001".to_string(), "{}".to_string()),
            ("B001".to_string(), "{}".to_string()),
        ];
        assert!(db.insert_records("beds", &rows).is_err());
        assert_eq!(db.count_records("beds").unwrap(), 0);

        let rows = vec![
            ("B001".to_string(), "{}".to_string()),
            ("B002".to_string(), "{}".to_string()),
        ];
        assert_eq!(db.insert_records("beds", &rows).unwrap(), 2);
    }
}
