use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use crate::error::TableError;
use crate::gateway::AnalysisStore;
use crate::model::{AnalysisRecord, NewAnalysis};
use crate::schema;

const SELECT_COLUMNS: &str = "id, algorithm, items, steps, start_time, end_time, total_time, \
                              time_complexity, graph_image_path";

/// An [`AnalysisStore`] backed by a single SQLite connection.
///
/// The connection is serialized behind a mutex; SQLite's own transactions
/// are the only consistency guarantee. Concurrent duplicate submissions
/// produce duplicate rows.
pub struct SqliteAnalysisStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteAnalysisStore {
    /// Opens (or creates) a SQLite database at the given file path and
    /// creates the results table if missing.
    #[instrument(skip_all, fields(path = %path))]
    pub fn open(path: &str) -> Result<Self, TableError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
        schema::init_schema(&conn)?;
        debug!("Opened analysis store at {}", path);
        Ok(Self { conn: Mutex::new(conn), path: path.to_string() })
    }

    /// Opens an in-memory SQLite database (useful for testing).
    pub fn open_memory() -> Result<Self, TableError> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        debug!("Opened in-memory analysis store");
        Ok(Self { conn: Mutex::new(conn), path: ":memory:".to_string() })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AnalysisRecord> {
        Ok(AnalysisRecord {
            id:               row.get(0)?,
            algorithm:        row.get(1)?,
            items:            row.get(2)?,
            steps:            row.get(3)?,
            start_time:       row.get(4)?,
            end_time:         row.get(5)?,
            total_time_ms:    row.get(6)?,
            time_complexity:  row.get(7)?,
            graph_image_path: row.get(8)?,
        })
    }
}

impl AnalysisStore for SqliteAnalysisStore {
    /// The insert runs in its own transaction; on any failure the
    /// transaction is dropped uncommitted, which rolls it back.
    #[instrument(skip_all, fields(algorithm = %new.algorithm))]
    fn insert(&self, new: &NewAnalysis) -> Result<i64, TableError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO analysis_results \
             (algorithm, items, steps, start_time, end_time, total_time, time_complexity, graph_image_path) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                new.algorithm,
                new.items,
                new.steps,
                new.start_time,
                new.end_time,
                new.total_time_ms,
                new.time_complexity,
                new.graph_image_path,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!("Inserted analysis with id {}", id);
        Ok(id)
    }

    #[instrument(skip(self))]
    fn get(&self, id: i64) -> Result<Option<AnalysisRecord>, TableError> {
        let conn = self.conn.lock();
        let sql = format!("SELECT {} FROM analysis_results WHERE id = ?1", SELECT_COLUMNS);
        let record = conn
            .query_row(&sql, params![id], Self::row_to_record)
            .optional()?;
        debug!(found = record.is_some(), "lookup");
        Ok(record)
    }

    #[instrument(skip_all)]
    fn list(&self) -> Result<Vec<AnalysisRecord>, TableError> {
        let conn = self.conn.lock();
        let sql = format!("SELECT {} FROM analysis_results ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Listed {} analyses", records.len());
        Ok(records)
    }

    fn count(&self) -> Result<usize, TableError> {
        let conn = self.conn.lock();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM analysis_results", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
