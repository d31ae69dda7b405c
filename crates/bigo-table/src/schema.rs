//! Table layout for analysis results.
//!
//! Column names match the `analysis_results` table created by earlier
//! deployments so an existing `analysis.db` can be reopened as-is. The
//! `total_time` column holds milliseconds.

use rusqlite::Connection;

use crate::error::TableError;

pub const TABLE: &str = "analysis_results";

/// Columns every existing table must provide.
pub const COLUMNS: [&str; 9] = [
    "id",
    "algorithm",
    "items",
    "steps",
    "start_time",
    "end_time",
    "total_time",
    "time_complexity",
    "graph_image_path",
];

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS analysis_results (
    id               INTEGER PRIMARY KEY,
    algorithm        VARCHAR(50) NOT NULL,
    items            INTEGER NOT NULL,
    steps            INTEGER NOT NULL,
    start_time       FLOAT NOT NULL,
    end_time         FLOAT NOT NULL,
    total_time       FLOAT NOT NULL,
    time_complexity  VARCHAR(20) NOT NULL,
    graph_image_path TEXT NOT NULL
);
";

/// Creates the table if it does not exist, then checks its columns.
pub fn init_schema(conn: &Connection) -> Result<(), TableError> {
    conn.execute_batch(SCHEMA_SQL)?;
    verify_schema(conn)
}

/// Fails with [`TableError::InvalidSchema`] if any expected column is missing.
pub fn verify_schema(conn: &Connection) -> Result<(), TableError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let present = stmt
        .query_map([TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(missing) = COLUMNS.iter().find(|c| !present.iter().any(|p| p == *c)) {
        return Err(TableError::InvalidSchema(format!(
            "table '{}' has no column '{}'",
            TABLE, missing
        )));
    }
    Ok(())
}
