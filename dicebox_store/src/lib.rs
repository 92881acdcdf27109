//! Durable record of roll batches: one row per batch, summed on demand.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use dicebox_core::{FaceCounts, RollBatch};

/// One persisted batch as stored, keyed by autoincrement id. Row order is
/// insertion order; there is no timestamp column.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredBatch {
    pub id: i64,
    pub roll_count: i64,
    pub face1: i64,
    pub face2: i64,
    pub face3: i64,
    pub face4: i64,
    pub face5: i64,
    pub face6: i64,
}

impl StoredBatch {
    pub fn faces(&self) -> [i64; 6] {
        [
            self.face1, self.face2, self.face3, self.face4, self.face5, self.face6,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RollStore {
    pool: SqlitePool,
}

impl RollStore {
    /// Open a pooled connection to the given SQLite URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the rolls table if missing. No migrations, no versioning.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS rolls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                roll_count INTEGER NOT NULL,
                face1 INTEGER NOT NULL,
                face2 INTEGER NOT NULL,
                face3 INTEGER NOT NULL,
                face4 INTEGER NOT NULL,
                face5 INTEGER NOT NULL,
                face6 INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Append one batch. No dedup, no merging; every call adds a row.
    pub async fn append(&self, batch: &RollBatch) -> Result<()> {
        let f = batch.faces.as_array();
        sqlx::query(
            "INSERT INTO rolls (roll_count, face1, face2, face3, face4, face5, face6)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(batch.count as i64)
        .bind(f[0] as i64)
        .bind(f[1] as i64)
        .bind(f[2] as i64)
        .bind(f[3] as i64)
        .bind(f[4] as i64)
        .bind(f[5] as i64)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Summed per-face counts across all stored batches. All six faces are
    /// present in the result, zero when the table is empty.
    pub async fn totals(&self) -> Result<FaceCounts> {
        let row: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(face1), 0), COALESCE(SUM(face2), 0),
                    COALESCE(SUM(face3), 0), COALESCE(SUM(face4), 0),
                    COALESCE(SUM(face5), 0), COALESCE(SUM(face6), 0)
             FROM rolls",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(FaceCounts::from_array([
            row.0 as u64,
            row.1 as u64,
            row.2 as u64,
            row.3 as u64,
            row.4 as u64,
            row.5 as u64,
        ]))
    }

    /// Last `n` batches, newest first.
    pub async fn recent(&self, n: i64) -> Result<Vec<StoredBatch>> {
        let rows = sqlx::query_as::<_, StoredBatch>(
            "SELECT id, roll_count, face1, face2, face3, face4, face5, face6
             FROM rolls ORDER BY id DESC LIMIT ?",
        )
        .bind(n)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All batches in insertion order.
    pub async fn all(&self) -> Result<Vec<StoredBatch>> {
        let rows = sqlx::query_as::<_, StoredBatch>(
            "SELECT id, roll_count, face1, face2, face3, face4, face5, face6
             FROM rolls ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
