//! The discovered shape of one database: its dialect, its name, and
//! the tables the catalog reader found.

use crate::sql::dialect::Dialect;

use super::table::Table;

/// A database's discovered tables. Built once at discovery time and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Database {
    dialect: Dialect,
    name: String,
    tables: Vec<Table>,
}

impl Database {
    pub fn new(dialect: Dialect, name: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            dialect,
            name: name.into(),
            tables,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn use_statement(&self) -> String {
        format!("USE {};", self.name)
    }

    /// Qualified names of every discovered table.
    pub fn table_names(&self) -> Vec<String> {
        self.tables
            .iter()
            .map(|table| table.qualified_name(&self.name, None))
            .collect()
    }

    /// The subset of tables whose qualified name appears in `names`.
    pub fn select_tables(&self, names: &[String]) -> Vec<&Table> {
        self.tables
            .iter()
            .filter(|table| names.contains(&table.qualified_name(&self.name, None)))
            .collect()
    }

    /// Selected tables converted to the target dialect, in the same
    /// order as [`Database::select_tables`].
    pub fn convert_tables(&self, names: &[String], target: Dialect) -> Vec<Table> {
        self.select_tables(names)
            .into_iter()
            .map(|table| table.convert_to(target))
            .collect()
    }
}
