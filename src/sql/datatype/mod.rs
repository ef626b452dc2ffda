//! The typed-datatype algebra.
//!
//! One closed sum type per dialect ([`MsSqlDatatype`],
//! [`MySqlDatatype`]) wrapped by [`Datatype`], which tags the value
//! with its dialect. Values are immutable once built: the factory
//! normalizes the raw catalog spelling through the synonym index,
//! dispatches to the variant's clamping constructor, and from then on
//! everything is pattern matching.
//!
//! ```ignore
//! use sqlferry::sql::{Datatype, Dialect, RawColumnType};
//!
//! let dt = Datatype::create(
//!     Dialect::MsSql,
//!     "nvarchar",
//!     &RawColumnType { character_size: Some(500), ..Default::default() },
//! )?;
//! assert_eq!(dt.render(), "nvarchar(500)");
//! assert_eq!(
//!     dt.convert_to(Dialect::MySql).render(),
//!     "varchar(500) character set utf8mb4",
//! );
//! ```

mod mssql;
mod mysql;

pub use mssql::{
    MsCharKind, MsDatetime2Kind, MsDatetimeKind, MsFloatKind, MsIntegerKind, MsMoneyKind,
    MsNumericKind, MsOtherKind, MsSqlDatatype, MsTextKind, MsVarcharKind,
};
pub use mysql::{
    MyBlobKind, MyDatetimeKind, MyFloatKind, MyIntegerKind, MySqlDatatype, MyTextKind, Signedness,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dialect::Dialect;
use super::names::DatatypeCatalog;

/// Error type for datatype construction.
#[derive(Debug, Error)]
pub enum DatatypeError {
    #[error("not a valid {} datatype: {name}", .dialect.display())]
    UnknownDatatype { dialect: Dialect, name: String },
}

/// Raw type parameters as read from a source catalog, before any
/// validation. Every field is optional; the factory clamps whatever
/// is missing or out of range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawColumnType {
    pub character_size: Option<i64>,
    pub character_set: Option<String>,
    pub numeric_precision: Option<i64>,
    pub numeric_scale: Option<i64>,
    pub datetime_precision: Option<i64>,
}

/// The neutral parameter record a datatype value carries.
///
/// Optional fields are populated exactly when the variant defines
/// them, so serializing skips everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParameters {
    pub datatype_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_precision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_scale: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_precision: Option<i64>,
}

impl TypeParameters {
    /// A record carrying only the datatype name.
    pub fn new(datatype_name: &'static str) -> Self {
        Self {
            datatype_name,
            character_size: None,
            character_set: None,
            numeric_precision: None,
            numeric_scale: None,
            datetime_precision: None,
        }
    }
}

/// A dialect-tagged datatype value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    MsSql(MsSqlDatatype),
    MySql(MySqlDatatype),
}

impl Datatype {
    /// Build a datatype from a raw catalog spelling.
    ///
    /// The name may be any synonym in any case; parameters the variant
    /// does not consume are ignored, and out-of-range parameters are
    /// clamped. Fails only when the name does not resolve in the
    /// dialect's catalog.
    pub fn create(
        dialect: Dialect,
        datatype_name: &str,
        raw: &RawColumnType,
    ) -> Result<Self, DatatypeError> {
        let canonical = DatatypeCatalog::new(dialect).canonical(datatype_name);
        let unknown = || DatatypeError::UnknownDatatype {
            dialect,
            name: datatype_name.to_string(),
        };
        match dialect {
            Dialect::MsSql => canonical
                .and_then(|name| Self::mssql_factory(name, raw))
                .map(Datatype::MsSql)
                .ok_or_else(unknown),
            Dialect::MySql => canonical
                .and_then(|name| Self::mysql_factory(name, raw))
                .map(Datatype::MySql)
                .ok_or_else(unknown),
        }
    }

    fn mssql_factory(canonical: &str, raw: &RawColumnType) -> Option<MsSqlDatatype> {
        let size = raw.character_size;
        let dt = match canonical {
            "varchar" => MsSqlDatatype::varchar(MsVarcharKind::Varchar, size),
            "nvarchar" => MsSqlDatatype::varchar(MsVarcharKind::Nvarchar, size),
            "text" => MsSqlDatatype::text(MsTextKind::Text),
            "ntext" => MsSqlDatatype::text(MsTextKind::Ntext),
            "char" => MsSqlDatatype::char(MsCharKind::Char, size),
            "nchar" => MsSqlDatatype::char(MsCharKind::Nchar, size),
            "varbinary" => MsSqlDatatype::varbinary(size),
            "binary" => MsSqlDatatype::binary(size),
            "numeric" => MsSqlDatatype::numeric(
                MsNumericKind::Numeric,
                raw.numeric_precision,
                raw.numeric_scale,
            ),
            "decimal" => MsSqlDatatype::numeric(
                MsNumericKind::Decimal,
                raw.numeric_precision,
                raw.numeric_scale,
            ),
            "float" => MsSqlDatatype::float(MsFloatKind::Float),
            "real" => MsSqlDatatype::float(MsFloatKind::Real),
            "bit" => MsSqlDatatype::integer(MsIntegerKind::Bit),
            "tinyint" => MsSqlDatatype::integer(MsIntegerKind::Tinyint),
            "smallint" => MsSqlDatatype::integer(MsIntegerKind::Smallint),
            "int" => MsSqlDatatype::integer(MsIntegerKind::Int),
            "bigint" => MsSqlDatatype::integer(MsIntegerKind::Bigint),
            "smallmoney" => MsSqlDatatype::money(MsMoneyKind::Smallmoney),
            "money" => MsSqlDatatype::money(MsMoneyKind::Money),
            "timestamp" => MsSqlDatatype::timestamp(),
            "date" => MsSqlDatatype::datetime(MsDatetimeKind::Date),
            "datetime" => MsSqlDatatype::datetime(MsDatetimeKind::Datetime),
            "smalldatetime" => MsSqlDatatype::datetime(MsDatetimeKind::Smalldatetime),
            "datetime2" => {
                MsSqlDatatype::datetime2(MsDatetime2Kind::Datetime2, raw.datetime_precision)
            }
            "datetimeoffset" => {
                MsSqlDatatype::datetime2(MsDatetime2Kind::Datetimeoffset, raw.datetime_precision)
            }
            "time" => MsSqlDatatype::datetime2(MsDatetime2Kind::Time, raw.datetime_precision),
            "geography" => MsSqlDatatype::other(MsOtherKind::Geography),
            "geometry" => MsSqlDatatype::other(MsOtherKind::Geometry),
            "hierarchyid" => MsSqlDatatype::other(MsOtherKind::Hierarchyid),
            "image" => MsSqlDatatype::other(MsOtherKind::Image),
            "sql_variant" => MsSqlDatatype::other(MsOtherKind::SqlVariant),
            "sysname" => MsSqlDatatype::other(MsOtherKind::Sysname),
            "uniqueidentifier" => MsSqlDatatype::other(MsOtherKind::Uniqueidentifier),
            "xml" => MsSqlDatatype::other(MsOtherKind::Xml),
            _ => return None,
        };
        Some(dt)
    }

    fn mysql_factory(canonical: &str, raw: &RawColumnType) -> Option<MySqlDatatype> {
        let size = raw.character_size;
        let charset = raw.character_set.as_deref();
        let dt = match canonical {
            "varchar" => MySqlDatatype::varchar(size, charset),
            // The national forms and enum/set land on varchar/char;
            // n* always means utf8mb4 regardless of the catalog row.
            "nvarchar" => MySqlDatatype::varchar(size, Some("utf8mb4")),
            "enum" | "set" => MySqlDatatype::varchar(size, charset),
            "text" => MySqlDatatype::text(size, charset),
            "tinytext" => MySqlDatatype::other_text(MyTextKind::Tinytext, charset),
            "mediumtext" => MySqlDatatype::other_text(MyTextKind::Mediumtext, charset),
            "longtext" => MySqlDatatype::other_text(MyTextKind::Longtext, charset),
            "char" => MySqlDatatype::char(size, charset),
            "nchar" => MySqlDatatype::char(size, Some("utf8mb4")),
            "varbinary" => MySqlDatatype::varbinary(size),
            "binary" => MySqlDatatype::binary(size),
            "blob" => MySqlDatatype::blob(size),
            "tinyblob" => MySqlDatatype::other_blob(MyBlobKind::Tinyblob),
            "mediumblob" => MySqlDatatype::other_blob(MyBlobKind::Mediumblob),
            "longblob" => MySqlDatatype::other_blob(MyBlobKind::Longblob),
            "decimal" => MySqlDatatype::decimal(raw.numeric_precision, raw.numeric_scale),
            "float" => MySqlDatatype::float(MyFloatKind::Float),
            "double" => MySqlDatatype::float(MyFloatKind::Double),
            "bit" => MySqlDatatype::bit(raw.numeric_precision),
            "tinyint" => MySqlDatatype::integer(MyIntegerKind::Tinyint),
            "smallint" => MySqlDatatype::integer(MyIntegerKind::Smallint),
            "mediumint" => MySqlDatatype::integer(MyIntegerKind::Mediumint),
            "int" => MySqlDatatype::integer(MyIntegerKind::Int),
            "bigint" => MySqlDatatype::integer(MyIntegerKind::Bigint),
            "serial" => MySqlDatatype::integer(MyIntegerKind::Serial),
            "date" => MySqlDatatype::date(),
            "datetime" => MySqlDatatype::datetime(MyDatetimeKind::Datetime, raw.datetime_precision),
            "time" => MySqlDatatype::datetime(MyDatetimeKind::Time, raw.datetime_precision),
            "timestamp" => {
                MySqlDatatype::datetime(MyDatetimeKind::Timestamp, raw.datetime_precision)
            }
            "year" => MySqlDatatype::year(),
            _ => return None,
        };
        Some(dt)
    }

    /// The dialect this value belongs to.
    pub fn dialect(&self) -> Dialect {
        match self {
            Datatype::MsSql(_) => Dialect::MsSql,
            Datatype::MySql(_) => Dialect::MySql,
        }
    }

    /// Canonical datatype name.
    pub fn datatype_name(&self) -> &'static str {
        match self {
            Datatype::MsSql(dt) => dt.datatype_name(),
            Datatype::MySql(dt) => dt.datatype_name(),
        }
    }

    /// SQL fragment for a column definition.
    pub fn render(&self) -> String {
        match self {
            Datatype::MsSql(dt) => dt.render(),
            Datatype::MySql(dt) => dt.render(),
        }
    }

    /// The parameter record this value carries.
    pub fn parameters(&self) -> TypeParameters {
        match self {
            Datatype::MsSql(dt) => dt.parameters(),
            Datatype::MySql(dt) => dt.parameters(),
        }
    }

    /// Convert to the target dialect. Identity when already there;
    /// otherwise total and never failing.
    pub fn convert_to(&self, target: Dialect) -> Datatype {
        match (self, target) {
            (Datatype::MsSql(_), Dialect::MsSql) | (Datatype::MySql(_), Dialect::MySql) => {
                self.clone()
            }
            (Datatype::MsSql(dt), Dialect::MySql) => Datatype::MySql(dt.to_mysql()),
            (Datatype::MySql(dt), Dialect::MsSql) => Datatype::MsSql(dt.to_mssql()),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
