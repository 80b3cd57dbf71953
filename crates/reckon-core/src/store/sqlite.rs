use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{params, Connection, Row};

use crate::error::{ReckonError, Result};
use crate::map_db_err;
use crate::rating::Rating;

use super::RatingStore;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    item_id INTEGER NOT NULL,
    rating REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_ratings_user ON ratings(user_id);
CREATE INDEX IF NOT EXISTS idx_ratings_item ON ratings(item_id);
"#;

/// Rating store backed by a SQLite database
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            ReckonError::Other(format!(
                "failed to open database at {}: {}",
                path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| map_db_err!("enable WAL mode", e))?;

        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| map_db_err!("open database", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| map_db_err!("create database schema", e))?;
        Ok(Self { conn })
    }

    /// Append ratings in a single transaction, returning how many were written
    #[tracing::instrument(skip(self, ratings), fields(count = ratings.len()))]
    pub fn insert_ratings(&mut self, ratings: &[Rating]) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| map_db_err!("begin insert transaction", e))?;

        {
            let mut stmt = tx
                .prepare("INSERT INTO ratings (user_id, item_id, rating) VALUES (?1, ?2, ?3)")
                .map_err(|e| map_db_err!("prepare insert", e))?;
            for r in ratings {
                stmt.execute(params![r.user, r.item, r.value])
                    .map_err(|e| map_db_err!("insert rating", e))?;
            }
        }

        tx.commit()
            .map_err(|e| map_db_err!("commit insert transaction", e))?;

        tracing::debug!(inserted = ratings.len(), "inserted ratings");
        Ok(ratings.len())
    }

    pub fn rating_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM ratings", [], |r| r.get(0))
            .map_err(|e| map_db_err!("count ratings", e))
    }

    fn query_ids(&self, sql: &str) -> Result<BTreeSet<i64>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| map_db_err!("prepare id query", e))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))
            .map_err(|e| map_db_err!("execute id query", e))?
            .collect::<rusqlite::Result<BTreeSet<i64>>>()
            .map_err(|e| map_db_err!("read id", e))?;
        Ok(ids)
    }
}

fn read_rating(row: &Row) -> rusqlite::Result<Rating> {
    Ok(Rating {
        user: row.get(0)?,
        item: row.get(1)?,
        value: row.get(2)?,
    })
}

impl RatingStore for SqliteStore {
    fn scan(&self, visit: &mut dyn FnMut(&Rating) -> Result<()>) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id, item_id, rating FROM ratings ORDER BY id")
            .map_err(|e| map_db_err!("prepare rating scan", e))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| map_db_err!("execute rating scan", e))?;

        while let Some(row) = rows.next().map_err(|e| map_db_err!("read rating", e))? {
            let rating = read_rating(row).map_err(|e| map_db_err!("decode rating", e))?;
            visit(&rating)?;
        }

        Ok(())
    }

    fn user_ratings(&self, user: i64) -> Result<Vec<Rating>> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id, item_id, rating FROM ratings WHERE user_id = ?1 ORDER BY id")
            .map_err(|e| map_db_err!("prepare user query", e))?;

        let ratings = stmt
            .query_map(params![user], read_rating)
            .map_err(|e| map_db_err!("execute user query", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read user rating", e))?;
        Ok(ratings)
    }

    fn user_ids(&self) -> Result<BTreeSet<i64>> {
        self.query_ids("SELECT DISTINCT user_id FROM ratings")
    }

    fn item_ids(&self) -> Result<BTreeSet<i64>> {
        self.query_ids("SELECT DISTINCT item_id FROM ratings")
    }
}
