//! Command pattern over a single SQLite connection.

mod command;
mod handle;

pub use command::{IntoSqlValue, Record, SqlCommand, Statement};
pub use handle::{format_row, DatabaseHandle, Row};
pub use rusqlite::types::Value;
