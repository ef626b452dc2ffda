//! Columns and the catalog records that describe them.

use serde::{Deserialize, Serialize};

use crate::sql::datatype::{Datatype, DatatypeError, RawColumnType, TypeParameters};
use crate::sql::dialect::Dialect;

/// Column nullability as INFORMATION_SCHEMA spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Nullable {
    Yes,
    No,
}

impl Default for Nullable {
    fn default() -> Self {
        Nullable::Yes
    }
}

impl Nullable {
    /// Anything that is not exactly `"NO"` reads as nullable.
    pub fn parse(s: &str) -> Self {
        if s == "NO" {
            Nullable::No
        } else {
            Nullable::Yes
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Nullable::Yes => "YES",
            Nullable::No => "NO",
        }
    }
}

/// One row of a source catalog's column listing (§INFORMATION_SCHEMA
/// query): the name, nullability, a datatype spelling in whatever
/// case and synonym the source uses, and the raw type parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub column_name: String,
    #[serde(default)]
    pub nullable: Nullable,
    pub datatype_name: String,
    #[serde(flatten)]
    pub datatype: RawColumnType,
}

/// The neutral record a column reports: its name plus whatever the
/// datatype value carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnParameters {
    pub column_name: String,
    #[serde(flatten)]
    pub datatype: TypeParameters,
}

/// A column with its validated datatype. Immutable once built;
/// conversion produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    nullable: Nullable,
    datatype: Datatype,
}

impl Column {
    pub fn new(name: impl Into<String>, nullable: Nullable, datatype: Datatype) -> Self {
        Self {
            name: name.into(),
            nullable,
            datatype,
        }
    }

    /// Build a column from a catalog row, running the datatype factory
    /// for the given dialect.
    pub fn from_description(
        dialect: Dialect,
        desc: &ColumnDescription,
    ) -> Result<Self, DatatypeError> {
        let datatype = Datatype::create(dialect, &desc.datatype_name, &desc.datatype)?;
        Ok(Self {
            name: desc.column_name.clone(),
            nullable: desc.nullable,
            datatype,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nullable(&self) -> Nullable {
        self.nullable
    }

    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    pub fn dialect(&self) -> Dialect {
        self.datatype.dialect()
    }

    /// The column clause of a CREATE TABLE statement.
    pub fn render(&self) -> String {
        let null = match self.nullable {
            Nullable::No => "not null",
            Nullable::Yes => "null",
        };
        format!("{} {} {}", self.name, self.datatype.render(), null)
    }

    pub fn column_parameters(&self) -> ColumnParameters {
        ColumnParameters {
            column_name: self.name.clone(),
            datatype: self.datatype.parameters(),
        }
    }

    /// Convert the datatype to the target dialect, keeping name and
    /// nullability.
    pub fn convert_to(&self, target: Dialect) -> Column {
        Column {
            name: self.name.clone(),
            nullable: self.nullable,
            datatype: self.datatype.convert_to(target),
        }
    }
}
