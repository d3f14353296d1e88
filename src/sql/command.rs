use std::fmt;
use std::sync::Arc;

use rusqlite::types::Value;
use tracing::debug;

use super::handle::{format_row, format_value, DatabaseHandle, Row};
use crate::command::Command;
use crate::error::{LabError, Result};

/// Values a `Record` column accepts.
pub trait IntoSqlValue {
    fn into_sql_value(self) -> Value;
}

impl IntoSqlValue for Value {
    fn into_sql_value(self) -> Value {
        self
    }
}

impl IntoSqlValue for &str {
    fn into_sql_value(self) -> Value {
        Value::Text(self.to_owned())
    }
}

macro_rules! into_sql_value_via_from {
    ($($ty:ty),*) => {
        $(
            impl IntoSqlValue for $ty {
                fn into_sql_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

into_sql_value_via_from!(String, i32, i64, f64, bool, Vec<u8>);

/// Ordered column→value mapping for one row. Insertion order is the column
/// order used in generated SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column. A repeated column name replaces the earlier value in place.
    pub fn with(mut self, column: impl Into<String>, value: impl IntoSqlValue) -> Self {
        let column = column.into();
        let value = value.into_sql_value();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> Vec<Value> {
        self.fields.iter().map(|(_, value)| value.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("'{name}': {}", format_value(value)))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// A SQL string plus the positional parameters bound to its `?` markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn bare(sql: String) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum SqlOp {
    CreateTable { columns: Vec<(String, String)> },
    DropTableIfExists,
    Insert { rows: Vec<Record> },
    Select { filter: String },
    Update { updates: Vec<Record>, filter: String },
    Delete { filter: String },
}

/// One deferred SQL operation bound to a table on a shared handle.
///
/// Filter clauses are caller-supplied SQL and are pasted into the statement
/// as is. Only row values are parameterized.
#[derive(Debug, Clone)]
pub struct SqlCommand {
    db: Arc<DatabaseHandle>,
    table: String,
    op: SqlOp,
}

impl SqlCommand {
    /// `CREATE TABLE <table> (<col> <type>, ...)`; fails if the table exists.
    pub fn create_table<I, K, V>(
        db: &Arc<DatabaseHandle>,
        table: impl Into<String>,
        columns: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, ty)| (name.into(), ty.into()))
            .collect();
        Self::new(db, table, SqlOp::CreateTable { columns })
    }

    /// `DROP TABLE IF EXISTS <table>`, used to reset the demo between runs.
    pub fn drop_table_if_exists(db: &Arc<DatabaseHandle>, table: impl Into<String>) -> Self {
        Self::new(db, table, SqlOp::DropTableIfExists)
    }

    pub fn insert(db: &Arc<DatabaseHandle>, table: impl Into<String>, rows: Vec<Record>) -> Self {
        Self::new(db, table, SqlOp::Insert { rows })
    }

    /// An empty filter selects every row.
    pub fn select(
        db: &Arc<DatabaseHandle>,
        table: impl Into<String>,
        filter: impl Into<String>,
    ) -> Self {
        Self::new(
            db,
            table,
            SqlOp::Select {
                filter: filter.into(),
            },
        )
    }

    /// Every record in `updates` is applied with the same `filter`.
    pub fn update(
        db: &Arc<DatabaseHandle>,
        table: impl Into<String>,
        updates: Vec<Record>,
        filter: impl Into<String>,
    ) -> Self {
        Self::new(
            db,
            table,
            SqlOp::Update {
                updates,
                filter: filter.into(),
            },
        )
    }

    pub fn delete(
        db: &Arc<DatabaseHandle>,
        table: impl Into<String>,
        filter: impl Into<String>,
    ) -> Self {
        Self::new(
            db,
            table,
            SqlOp::Delete {
                filter: filter.into(),
            },
        )
    }

    fn new(db: &Arc<DatabaseHandle>, table: impl Into<String>, op: SqlOp) -> Self {
        Self {
            db: Arc::clone(db),
            table: table.into(),
            op,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether running the command twice leaves the database unchanged.
    pub fn is_read_only(&self) -> bool {
        matches!(self.op, SqlOp::Select { .. })
    }

    /// The statements `execute` will issue, in order.
    pub fn statements(&self) -> Vec<Statement> {
        let table = &self.table;
        match &self.op {
            SqlOp::CreateTable { columns } => {
                let defs: Vec<String> = columns
                    .iter()
                    .map(|(name, ty)| format!("{name} {ty}"))
                    .collect();
                vec![Statement::bare(format!(
                    "CREATE TABLE {table} ({})",
                    defs.join(", ")
                ))]
            }
            SqlOp::DropTableIfExists => {
                vec![Statement::bare(format!("DROP TABLE IF EXISTS {table}"))]
            }
            SqlOp::Insert { rows } => rows
                .iter()
                .map(|row| {
                    let columns: Vec<&str> = row.columns().collect();
                    let placeholders = vec!["?"; row.len()].join(", ");
                    Statement {
                        sql: format!(
                            "INSERT INTO {table} ({}) VALUES ({placeholders})",
                            columns.join(", ")
                        ),
                        params: row.values(),
                    }
                })
                .collect(),
            SqlOp::Select { filter } => {
                let mut sql = format!("SELECT * FROM {table}");
                if !filter.is_empty() {
                    sql.push_str(" WHERE ");
                    sql.push_str(filter);
                }
                vec![Statement::bare(sql)]
            }
            SqlOp::Update { updates, filter } => updates
                .iter()
                .map(|row| {
                    let assignments: Vec<String> =
                        row.columns().map(|col| format!("{col} = ?")).collect();
                    Statement {
                        sql: format!(
                            "UPDATE {table} SET {} WHERE {filter}",
                            assignments.join(", ")
                        ),
                        params: row.values(),
                    }
                })
                .collect(),
            SqlOp::Delete { filter } => {
                vec![Statement::bare(format!("DELETE FROM {table} WHERE {filter}"))]
            }
        }
    }
}

impl Command for SqlCommand {
    type Output = Vec<Row>;
    type Error = LabError;

    /// Runs each statement in turn. Only `Select` yields rows; they are also
    /// printed one per line.
    fn execute(&self) -> Result<Vec<Row>> {
        debug!(command = %self.describe(), "executing sql command");
        let mut rows = Vec::new();
        for statement in self.statements() {
            rows = self.db.execute(&statement.sql, &statement.params)?;
        }

        match &self.op {
            SqlOp::Select { .. } => {
                for row in &rows {
                    println!("{}", format_row(row));
                }
            }
            SqlOp::Delete { filter } => {
                println!("Deleted from {} where {}", self.table, filter);
            }
            _ => {}
        }
        Ok(rows)
    }

    fn describe(&self) -> String {
        let kind = match self.op {
            SqlOp::CreateTable { .. } => "CreateTable",
            SqlOp::DropTableIfExists => "DropTableIfExists",
            SqlOp::Insert { .. } => "Insert",
            SqlOp::Select { .. } => "Select",
            SqlOp::Update { .. } => "Update",
            SqlOp::Delete { .. } => "Delete",
        };
        format!("{kind}({})", self.table)
    }
}
