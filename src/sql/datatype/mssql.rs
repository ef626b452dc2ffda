//! SQL Server datatype variants.
//!
//! Every variant is an immutable value built by a clamping
//! constructor: missing or out-of-range parameters are replaced by
//! the variant's default rather than rejected. Source catalogs in the
//! wild contain nulls and out-of-range values, and migrating into a
//! safe superset type beats failing the whole transfer.
//!
//! The `-1` character size is SQL Server's `(max)` sentinel.

use super::mysql::{MyBlobKind, MyDatetimeKind, MyFloatKind, MyIntegerKind, MySqlDatatype, MyTextKind};
use super::TypeParameters;

/// `varchar` / `nvarchar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsVarcharKind {
    Varchar,
    Nvarchar,
}

impl MsVarcharKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsVarcharKind::Varchar => "varchar",
            MsVarcharKind::Nvarchar => "nvarchar",
        }
    }
}

/// `text` / `ntext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsTextKind {
    Text,
    Ntext,
}

impl MsTextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsTextKind::Text => "text",
            MsTextKind::Ntext => "ntext",
        }
    }
}

/// `char` / `nchar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsCharKind {
    Char,
    Nchar,
}

impl MsCharKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsCharKind::Char => "char",
            MsCharKind::Nchar => "nchar",
        }
    }
}

/// `numeric` / `decimal` (identical semantics, distinct spelling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsNumericKind {
    Numeric,
    Decimal,
}

impl MsNumericKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsNumericKind::Numeric => "numeric",
            MsNumericKind::Decimal => "decimal",
        }
    }
}

/// `float` (53-bit mantissa) / `real` (24-bit mantissa).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsFloatKind {
    Float,
    Real,
}

impl MsFloatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsFloatKind::Float => "float",
            MsFloatKind::Real => "real",
        }
    }
}

/// The fixed-width integer family. SQL Server's `bit` and `tinyint`
/// belong here: `bit` is a 0/1 flag and `tinyint` is unsigned 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsIntegerKind {
    Bit,
    Tinyint,
    Smallint,
    Int,
    Bigint,
}

impl MsIntegerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsIntegerKind::Bit => "bit",
            MsIntegerKind::Tinyint => "tinyint",
            MsIntegerKind::Smallint => "smallint",
            MsIntegerKind::Int => "int",
            MsIntegerKind::Bigint => "bigint",
        }
    }
}

/// `money` / `smallmoney`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsMoneyKind {
    Money,
    Smallmoney,
}

impl MsMoneyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsMoneyKind::Money => "money",
            MsMoneyKind::Smallmoney => "smallmoney",
        }
    }
}

/// Datetime types without a precision parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsDatetimeKind {
    Date,
    Datetime,
    Smalldatetime,
}

impl MsDatetimeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsDatetimeKind::Date => "date",
            MsDatetimeKind::Datetime => "datetime",
            MsDatetimeKind::Smalldatetime => "smalldatetime",
        }
    }
}

/// Datetime types carrying a fractional-second precision 0..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsDatetime2Kind {
    Datetime2,
    Datetimeoffset,
    Time,
}

impl MsDatetime2Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsDatetime2Kind::Datetime2 => "datetime2",
            MsDatetime2Kind::Datetimeoffset => "datetimeoffset",
            MsDatetime2Kind::Time => "time",
        }
    }
}

/// Parameterless special types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsOtherKind {
    Geography,
    Geometry,
    Hierarchyid,
    Image,
    SqlVariant,
    Sysname,
    Uniqueidentifier,
    Xml,
}

impl MsOtherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsOtherKind::Geography => "geography",
            MsOtherKind::Geometry => "geometry",
            MsOtherKind::Hierarchyid => "hierarchyid",
            MsOtherKind::Image => "image",
            MsOtherKind::SqlVariant => "sql_variant",
            MsOtherKind::Sysname => "sysname",
            MsOtherKind::Uniqueidentifier => "uniqueidentifier",
            MsOtherKind::Xml => "xml",
        }
    }
}

/// A SQL Server column datatype with validated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsSqlDatatype {
    Varchar { kind: MsVarcharKind, size: i32 },
    Text { kind: MsTextKind },
    Char { kind: MsCharKind, size: i32 },
    Binary { size: i32 },
    Varbinary { size: i32 },
    Numeric { kind: MsNumericKind, precision: u8, scale: u8 },
    Float { kind: MsFloatKind },
    Integer { kind: MsIntegerKind },
    Money { kind: MsMoneyKind },
    Datetime { kind: MsDatetimeKind },
    Datetime2 { kind: MsDatetime2Kind, precision: u8 },
    Timestamp,
    Other { kind: MsOtherKind },
}

/// [1, 8000] or the -1 max sentinel; anything else becomes -1.
fn clamp_varchar_size(size: Option<i64>) -> i32 {
    match size {
        Some(s) if (1..=8000).contains(&s) || s == -1 => s as i32,
        _ => -1,
    }
}

/// [1, 8000]; anything else becomes 8000.
fn clamp_fixed_size(size: Option<i64>) -> i32 {
    match size {
        Some(s) if (1..=8000).contains(&s) => s as i32,
        _ => 8000,
    }
}

/// [1, 38]; anything else becomes 38.
fn clamp_precision(precision: Option<i64>) -> u8 {
    match precision {
        Some(p) if (1..=38).contains(&p) => p as u8,
        _ => 38,
    }
}

/// [0, precision]; anything else becomes the precision.
fn clamp_scale(scale: Option<i64>, precision: u8) -> u8 {
    match scale {
        Some(s) if s >= 0 && s <= i64::from(precision) => s as u8,
        _ => precision,
    }
}

/// [0, 7]; anything else becomes 7.
fn clamp_datetime_precision(precision: Option<i64>) -> u8 {
    match precision {
        Some(p) if (0..=7).contains(&p) => p as u8,
        _ => 7,
    }
}

impl MsSqlDatatype {
    pub fn varchar(kind: MsVarcharKind, size: Option<i64>) -> Self {
        MsSqlDatatype::Varchar {
            kind,
            size: clamp_varchar_size(size),
        }
    }

    pub fn text(kind: MsTextKind) -> Self {
        MsSqlDatatype::Text { kind }
    }

    pub fn char(kind: MsCharKind, size: Option<i64>) -> Self {
        MsSqlDatatype::Char {
            kind,
            size: clamp_fixed_size(size),
        }
    }

    pub fn binary(size: Option<i64>) -> Self {
        MsSqlDatatype::Binary {
            size: clamp_fixed_size(size),
        }
    }

    pub fn varbinary(size: Option<i64>) -> Self {
        MsSqlDatatype::Varbinary {
            size: clamp_varchar_size(size),
        }
    }

    pub fn numeric(kind: MsNumericKind, precision: Option<i64>, scale: Option<i64>) -> Self {
        let precision = clamp_precision(precision);
        MsSqlDatatype::Numeric {
            kind,
            precision,
            scale: clamp_scale(scale, precision),
        }
    }

    pub fn float(kind: MsFloatKind) -> Self {
        MsSqlDatatype::Float { kind }
    }

    pub fn integer(kind: MsIntegerKind) -> Self {
        MsSqlDatatype::Integer { kind }
    }

    pub fn money(kind: MsMoneyKind) -> Self {
        MsSqlDatatype::Money { kind }
    }

    pub fn datetime(kind: MsDatetimeKind) -> Self {
        MsSqlDatatype::Datetime { kind }
    }

    pub fn datetime2(kind: MsDatetime2Kind, precision: Option<i64>) -> Self {
        MsSqlDatatype::Datetime2 {
            kind,
            precision: clamp_datetime_precision(precision),
        }
    }

    pub fn timestamp() -> Self {
        MsSqlDatatype::Timestamp
    }

    pub fn other(kind: MsOtherKind) -> Self {
        MsSqlDatatype::Other { kind }
    }

    /// Canonical datatype name.
    pub fn datatype_name(&self) -> &'static str {
        match self {
            MsSqlDatatype::Varchar { kind, .. } => kind.as_str(),
            MsSqlDatatype::Text { kind } => kind.as_str(),
            MsSqlDatatype::Char { kind, .. } => kind.as_str(),
            MsSqlDatatype::Binary { .. } => "binary",
            MsSqlDatatype::Varbinary { .. } => "varbinary",
            MsSqlDatatype::Numeric { kind, .. } => kind.as_str(),
            MsSqlDatatype::Float { kind } => kind.as_str(),
            MsSqlDatatype::Integer { kind } => kind.as_str(),
            MsSqlDatatype::Money { kind } => kind.as_str(),
            MsSqlDatatype::Datetime { kind } => kind.as_str(),
            MsSqlDatatype::Datetime2 { kind, .. } => kind.as_str(),
            MsSqlDatatype::Timestamp => "timestamp",
            MsSqlDatatype::Other { kind } => kind.as_str(),
        }
    }

    /// SQL fragment for a column definition.
    pub fn render(&self) -> String {
        match self {
            MsSqlDatatype::Varchar { kind, size: -1 } => format!("{}(max)", kind.as_str()),
            MsSqlDatatype::Varchar { kind, size } => format!("{}({})", kind.as_str(), size),
            MsSqlDatatype::Char { kind, size } => format!("{}({})", kind.as_str(), size),
            MsSqlDatatype::Binary { size } => format!("binary({})", size),
            MsSqlDatatype::Varbinary { size: -1 } => "varbinary(max)".to_string(),
            MsSqlDatatype::Varbinary { size } => format!("varbinary({})", size),
            MsSqlDatatype::Numeric { kind, precision, scale } => {
                format!("{}({}, {})", kind.as_str(), precision, scale)
            }
            MsSqlDatatype::Datetime2 { kind, precision } => {
                format!("{}({})", kind.as_str(), precision)
            }
            _ => self.datatype_name().to_string(),
        }
    }

    /// Mantissa-derived precision for the float family.
    pub fn float_precision(kind: MsFloatKind) -> u8 {
        match kind {
            MsFloatKind::Float => 53,
            MsFloatKind::Real => 24,
        }
    }

    /// The parameter record this variant carries.
    pub fn parameters(&self) -> TypeParameters {
        let base = TypeParameters::new(self.datatype_name());
        match self {
            MsSqlDatatype::Varchar { size, .. }
            | MsSqlDatatype::Char { size, .. }
            | MsSqlDatatype::Binary { size }
            | MsSqlDatatype::Varbinary { size } => TypeParameters {
                character_size: Some(i64::from(*size)),
                ..base
            },
            MsSqlDatatype::Numeric { precision, scale, .. } => TypeParameters {
                numeric_precision: Some(i64::from(*precision)),
                numeric_scale: Some(i64::from(*scale)),
                ..base
            },
            MsSqlDatatype::Float { kind } => TypeParameters {
                numeric_precision: Some(i64::from(Self::float_precision(*kind))),
                ..base
            },
            MsSqlDatatype::Datetime2 { precision, .. } => TypeParameters {
                datetime_precision: Some(i64::from(*precision)),
                ..base
            },
            _ => base,
        }
    }

    /// Convert to the closest-superset MySQL datatype.
    ///
    /// Total: every variant maps, and the target's own clamping rules
    /// apply. `datetimeoffset` drops its timezone; that loss is
    /// accepted here rather than failing the transfer.
    pub fn to_mysql(&self) -> MySqlDatatype {
        match self {
            MsSqlDatatype::Varchar { kind, size } => {
                let charset = match kind {
                    MsVarcharKind::Varchar => None,
                    MsVarcharKind::Nvarchar => Some("utf8mb4"),
                };
                if *size == -1 {
                    MySqlDatatype::other_text(MyTextKind::Longtext, charset)
                } else {
                    MySqlDatatype::varchar(Some(i64::from(*size)), charset)
                }
            }
            MsSqlDatatype::Text { kind } => {
                let charset = match kind {
                    MsTextKind::Text => Some("latin1"),
                    MsTextKind::Ntext => Some("utf8mb4"),
                };
                MySqlDatatype::other_text(MyTextKind::Longtext, charset)
            }
            MsSqlDatatype::Char { kind, size } => {
                let charset = match kind {
                    MsCharKind::Char => Some("latin1"),
                    MsCharKind::Nchar => Some("utf8mb4"),
                };
                if *size <= 255 {
                    MySqlDatatype::char(Some(i64::from(*size)), charset)
                } else {
                    MySqlDatatype::varchar(Some(i64::from(*size)), charset)
                }
            }
            MsSqlDatatype::Binary { size } => {
                if *size <= 255 {
                    MySqlDatatype::binary(Some(i64::from(*size)))
                } else {
                    MySqlDatatype::blob(Some(65535))
                }
            }
            MsSqlDatatype::Varbinary { size } => {
                if *size == -1 {
                    MySqlDatatype::other_blob(MyBlobKind::Longblob)
                } else {
                    MySqlDatatype::varbinary(Some(i64::from(*size)))
                }
            }
            MsSqlDatatype::Numeric { precision, scale, .. } => {
                MySqlDatatype::decimal(Some(i64::from(*precision)), Some(i64::from(*scale)))
            }
            MsSqlDatatype::Float { kind } => match kind {
                MsFloatKind::Float => MySqlDatatype::float(MyFloatKind::Float),
                MsFloatKind::Real => MySqlDatatype::float(MyFloatKind::Double),
            },
            // bit fits in a signed tinyint, but SQL Server's tinyint is
            // unsigned 0..=255 and must widen to smallint.
            MsSqlDatatype::Integer { kind } => match kind {
                MsIntegerKind::Bit => MySqlDatatype::integer(MyIntegerKind::Tinyint),
                MsIntegerKind::Int => MySqlDatatype::integer(MyIntegerKind::Int),
                MsIntegerKind::Tinyint | MsIntegerKind::Smallint => {
                    MySqlDatatype::integer(MyIntegerKind::Smallint)
                }
                MsIntegerKind::Bigint => MySqlDatatype::integer(MyIntegerKind::Bigint),
            },
            MsSqlDatatype::Money { kind } => match kind {
                MsMoneyKind::Money => MySqlDatatype::decimal(Some(19), Some(4)),
                MsMoneyKind::Smallmoney => MySqlDatatype::decimal(Some(10), Some(4)),
            },
            MsSqlDatatype::Datetime { kind } => match kind {
                MsDatetimeKind::Date => MySqlDatatype::date(),
                MsDatetimeKind::Datetime | MsDatetimeKind::Smalldatetime => {
                    MySqlDatatype::datetime(MyDatetimeKind::Datetime, Some(0))
                }
            },
            MsSqlDatatype::Datetime2 { kind, precision } => {
                let kind = match kind {
                    MsDatetime2Kind::Time => MyDatetimeKind::Time,
                    MsDatetime2Kind::Datetime2 | MsDatetime2Kind::Datetimeoffset => {
                        MyDatetimeKind::Datetime
                    }
                };
                MySqlDatatype::datetime(kind, Some(i64::from(*precision)))
            }
            // rowversion is an opaque 8-byte counter.
            MsSqlDatatype::Timestamp => MySqlDatatype::integer(MyIntegerKind::Bigint),
            MsSqlDatatype::Other { kind } => match kind {
                MsOtherKind::Geography
                | MsOtherKind::Geometry
                | MsOtherKind::Hierarchyid
                | MsOtherKind::Image => MySqlDatatype::blob(Some(65535)),
                MsOtherKind::SqlVariant | MsOtherKind::Xml => {
                    MySqlDatatype::text(Some(65535), None)
                }
                MsOtherKind::Sysname => MySqlDatatype::varchar(Some(128), Some("utf8mb4")),
                MsOtherKind::Uniqueidentifier => MySqlDatatype::binary(Some(16)),
            },
        }
    }
}
