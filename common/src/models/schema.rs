//! Introspected table schema models.
//!
//! A schema description is assembled fresh for every request from
//! `DESCRIBE` output and rendered into the compact text form embedded in
//! the SQL-synthesis prompt. Nothing here outlives the request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One column of an introspected table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Column type as reported by the database (e.g. `varchar(50)`).
    pub data_type: String,
}

/// An introspected table: its name plus ordered columns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableSchema {
    /// Table name as resolved from the prompt.
    pub table: String,

    /// Columns in the order the database reports them.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Renders the table as `name(col type, col type, ...)`.
    pub fn render(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.table, columns)
    }
}

/// The full per-request schema: one entry per resolved table.
#[derive(Debug, Clone, Default)]
pub struct SchemaDescription {
    /// Tables in resolution order.
    pub tables: Vec<TableSchema>,
}

impl SchemaDescription {
    /// Wraps a list of introspected tables.
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    /// Renders all tables, one per line, for the synthesis prompt.
    pub fn render(&self) -> String {
        self.tables
            .iter()
            .map(TableSchema::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
