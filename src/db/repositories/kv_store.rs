use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::connection::Database;

impl Database {
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("failed to read slot '{key}'"))
        })
    }

    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write slot '{key}'"))?;
            Ok(())
        })
    }

    pub fn delete_value(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
                .with_context(|| format!("failed to delete slot '{key}'"))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::new(dir.path().join("kv.sqlite3")).expect("open db");
        (dir, db)
    }

    #[test]
    fn set_get_delete() {
        let (_dir, db) = open();

        assert_eq!(db.get_value("history").unwrap(), None);

        db.set_value("history", "[]").unwrap();
        assert_eq!(db.get_value("history").unwrap().as_deref(), Some("[]"));

        db.set_value("history", "[1]").unwrap();
        assert_eq!(db.get_value("history").unwrap().as_deref(), Some("[1]"));

        db.delete_value("history").unwrap();
        assert_eq!(db.get_value("history").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kv.sqlite3");

        {
            let db = Database::new(path.clone()).unwrap();
            db.set_value("history", "[]").unwrap();
        }

        let db = Database::new(path).unwrap();
        assert_eq!(db.get_value("history").unwrap().as_deref(), Some("[]"));
    }
}
