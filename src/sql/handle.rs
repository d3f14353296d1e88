use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::{debug, info, warn};

use crate::error::{LabError, Result};

/// One result row, columns in `SELECT` order.
pub type Row = Vec<Value>;

/// Owns the single SQLite connection shared by every SQL command.
///
/// The connection runs in autocommit mode, so each `execute` commits on its
/// own. Access is serialized through one mutex.
#[derive(Debug)]
pub struct DatabaseHandle {
    path: String,
    conn: Mutex<Option<Connection>>,
    executed: AtomicUsize,
}

impl DatabaseHandle {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "database opened");
        Ok(Self::from_connection(path.display().to_string(), conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(":memory:".to_string(), conn))
    }

    fn from_connection(path: String, conn: Connection) -> Self {
        Self {
            path,
            conn: Mutex::new(Some(conn)),
            executed: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run one statement with positional `?` parameters and return its rows.
    ///
    /// Statements without result columns (DDL, INSERT, UPDATE, DELETE) return
    /// an empty vector. Driver errors come back as `LabError::Driver`.
    pub fn execute(&self, statement: &str, params: &[Value]) -> Result<Vec<Row>> {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or_else(|| LabError::HandleClosed {
            path: self.path.clone(),
        })?;

        debug!(sql = statement, params = params.len(), "executing statement");
        self.executed.fetch_add(1, Ordering::Relaxed);

        let mut stmt = conn.prepare(statement)?;
        let column_count = stmt.column_count();
        if column_count == 0 {
            let changed = stmt.execute(params_from_iter(params.iter()))?;
            debug!(changed, "statement committed");
            return Ok(Vec::new());
        }

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(row.get::<_, Value>(idx)?);
            }
            out.push(values);
        }
        Ok(out)
    }

    /// Number of statements handed to the driver so far.
    pub fn statements_executed(&self) -> usize {
        self.executed.load(Ordering::Relaxed)
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Release the connection. Later `execute` calls fail with `HandleClosed`.
    pub fn close(&self) -> Result<()> {
        let conn = self.lock().take();
        match conn {
            Some(conn) => {
                conn.close().map_err(|(_, err)| LabError::Driver(err))?;
                info!(path = %self.path, "database closed");
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        // A panic mid-statement leaves nothing half-written on the Rust side.
        self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("database mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Render a row as a tuple literal, e.g. `(1, 'Atik')`.
pub fn format_row(row: &[Value]) -> String {
    let cells: Vec<String> = row.iter().map(format_value).collect();
    if cells.len() == 1 {
        format!("({},)", cells[0])
    } else {
        format!("({})", cells.join(", "))
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => format!("{r:?}"),
        Value::Text(s) => quote_text(s),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

/// Single quotes unless the text holds a `'` and no `"`, then double quotes.
fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        if c == '\\' || c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_execute_returns_rows() {
        let db = DatabaseHandle::open_in_memory().unwrap();
        db.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", &[])
            .unwrap();
        db.execute(
            "INSERT INTO t (name) VALUES (?)",
            &[Value::Text("Atik".into())],
        )
        .unwrap();

        let rows = db.execute("SELECT * FROM t", &[]).unwrap();
        assert_eq!(
            rows,
            vec![vec![Value::Integer(1), Value::Text("Atik".into())]]
        );
        assert_eq!(db.statements_executed(), 3);
    }

    #[test]
    fn test_each_statement_commits_immediately() {
        let file = NamedTempFile::new().unwrap();
        let db = DatabaseHandle::open(file.path()).unwrap();
        db.execute("CREATE TABLE users (name TEXT)", &[]).unwrap();
        db.execute(
            "INSERT INTO users (name) VALUES (?)",
            &[Value::Text("Suman".into())],
        )
        .unwrap();

        // A second connection sees the row without any explicit commit.
        let other = Connection::open(file.path()).unwrap();
        let count: i64 = other
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_driver_error_propagates() {
        let db = DatabaseHandle::open_in_memory().unwrap();
        let err = db.execute("SELECT * FROM missing", &[]).unwrap_err();
        assert!(err.is_driver());

        let err = db.execute("NOT EVEN SQL", &[]).unwrap_err();
        assert!(err.is_driver());
    }

    #[test]
    fn test_execute_after_close_fails() {
        let db = DatabaseHandle::open_in_memory().unwrap();
        db.close().unwrap();
        assert!(!db.is_open());

        let err = db.execute("SELECT 1", &[]).unwrap_err();
        assert!(matches!(err, LabError::HandleClosed { .. }));
        // Closing twice is harmless.
        db.close().unwrap();
    }

    #[test]
    fn test_format_row_like_a_tuple() {
        let row = vec![Value::Integer(3), Value::Text("Suman Das".into())];
        assert_eq!(format_row(&row), "(3, 'Suman Das')");
        assert_eq!(format_row(&[Value::Null]), "(None,)");
    }

    #[test]
    fn test_format_text_with_quotes() {
        let row = [Value::Text("O'Brien".into())];
        assert_eq!(format_row(&row), r#"("O'Brien",)"#);

        let both = [Value::Text(r#"say "it's""#.into())];
        assert_eq!(format_row(&both), r#"('say "it\'s"',)"#);

        let slash = [Value::Text(r"C:\tmp".into())];
        assert_eq!(format_row(&slash), r"('C:\\tmp',)");
    }
}
