//! MySQL datatype variants.
//!
//! MySQL character types carry a character set, and the character
//! set's worst-case byte width caps the legal `varchar` size (65535
//! row-format bytes minus overhead). Constructors clamp the charset
//! first and then the size, so an oversized size under a wide charset
//! lands on that charset's cap. The reverse is deliberately not done:
//! a size never re-expands.
//!
//! `text` and `blob` sizes are bucketed up to the nearest storage
//! class (255 / 65535 / 16777215 / 4294967295); rendering emits the
//! bucket's own type name (`tinytext`, `mediumtext`, …) even though
//! the canonical datatype name stays `text` / `blob`.

use crate::sql::charset::CharsetCatalog;
use crate::sql::dialect::Dialect;

use super::mssql::{
    MsCharKind, MsDatetime2Kind, MsDatetimeKind, MsFloatKind, MsIntegerKind, MsNumericKind,
    MsSqlDatatype, MsVarcharKind,
};
use super::TypeParameters;

/// `tinytext` / `mediumtext` / `longtext` (plain `text` is its own variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MyTextKind {
    Tinytext,
    Mediumtext,
    Longtext,
}

impl MyTextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MyTextKind::Tinytext => "tinytext",
            MyTextKind::Mediumtext => "mediumtext",
            MyTextKind::Longtext => "longtext",
        }
    }
}

/// `tinyblob` / `mediumblob` / `longblob`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MyBlobKind {
    Tinyblob,
    Mediumblob,
    Longblob,
}

impl MyBlobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MyBlobKind::Tinyblob => "tinyblob",
            MyBlobKind::Mediumblob => "mediumblob",
            MyBlobKind::Longblob => "longblob",
        }
    }
}

/// `float` (single) / `double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MyFloatKind {
    Float,
    Double,
}

impl MyFloatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MyFloatKind::Float => "float",
            MyFloatKind::Double => "double",
        }
    }
}

/// The integer family. `serial` is sugar for `bigint unsigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MyIntegerKind {
    Tinyint,
    Smallint,
    Mediumint,
    Int,
    Bigint,
    Serial,
}

impl MyIntegerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MyIntegerKind::Tinyint => "tinyint",
            MyIntegerKind::Smallint => "smallint",
            MyIntegerKind::Mediumint => "mediumint",
            MyIntegerKind::Int => "int",
            MyIntegerKind::Bigint => "bigint",
            MyIntegerKind::Serial => "serial",
        }
    }
}

/// `timestamp` / `datetime` / `time`, all carrying a precision 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MyDatetimeKind {
    Timestamp,
    Datetime,
    Time,
}

impl MyDatetimeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MyDatetimeKind::Timestamp => "timestamp",
            MyDatetimeKind::Datetime => "datetime",
            MyDatetimeKind::Time => "time",
        }
    }
}

/// Integer signedness modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl Signedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signedness::Signed => "signed",
            Signedness::Unsigned => "unsigned",
        }
    }
}

/// A MySQL column datatype with validated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MySqlDatatype {
    Varchar { size: u32, charset: &'static str },
    Text { size: u32, charset: &'static str },
    OtherText { kind: MyTextKind, charset: &'static str },
    Char { size: u32, charset: &'static str },
    Binary { size: u32 },
    Varbinary { size: u32 },
    Blob { size: u32 },
    OtherBlob { kind: MyBlobKind },
    Decimal { precision: u8, scale: u8 },
    Float { kind: MyFloatKind },
    Bit { precision: u8 },
    Integer { kind: MyIntegerKind, sign: Signedness },
    Date,
    Datetime { kind: MyDatetimeKind, precision: u8 },
    Year,
}

fn charsets() -> CharsetCatalog {
    CharsetCatalog::new(Dialect::MySql)
}

/// Resolve a charset to its catalog spelling; unknown or absent
/// becomes latin1.
fn clamp_charset(charset: Option<&str>) -> &'static str {
    charset
        .and_then(|name| charsets().lookup(name))
        .map(|cs| cs.name)
        .unwrap_or("latin1")
}

/// Maximum `varchar` character count under a charset's byte width.
pub(crate) fn max_varchar_size(charset: &str) -> u32 {
    match charsets().max_length(charset) {
        1 => 65532,
        2 => 32766,
        3 => 21844,
        _ => 16383,
    }
}

/// Bucket a text/blob size up to its storage class.
fn clamp_lob_size(size: Option<i64>) -> u32 {
    match size {
        Some(s) if (0..=4294967295).contains(&s) => {
            if s <= 255 {
                255
            } else if s <= 65535 {
                65535
            } else if s <= 16777215 {
                16777215
            } else {
                4294967295
            }
        }
        _ => 4294967295,
    }
}

/// [1, cap]; anything else becomes the cap.
fn clamp_sized(size: Option<i64>, cap: u32) -> u32 {
    match size {
        Some(s) if s >= 1 && s <= i64::from(cap) => s as u32,
        _ => cap,
    }
}

/// [1, 65]; anything else becomes 65.
fn clamp_decimal_precision(precision: Option<i64>) -> u8 {
    match precision {
        Some(p) if (1..=65).contains(&p) => p as u8,
        _ => 65,
    }
}

/// In range and at most 30 keeps the value; everything else falls
/// back to min(precision, 30).
fn clamp_decimal_scale(scale: Option<i64>, precision: u8) -> u8 {
    let fallback = precision.min(30);
    match scale {
        Some(s) if s >= 0 && s <= i64::from(precision) && s <= 30 => s as u8,
        _ => fallback,
    }
}

/// [0, 6]; anything else becomes 6.
fn clamp_datetime_precision(precision: Option<i64>) -> u8 {
    match precision {
        Some(p) if (0..=6).contains(&p) => p as u8,
        _ => 6,
    }
}

impl MySqlDatatype {
    pub fn varchar(size: Option<i64>, charset: Option<&str>) -> Self {
        let charset = clamp_charset(charset);
        MySqlDatatype::Varchar {
            size: clamp_sized(size, max_varchar_size(charset)),
            charset,
        }
    }

    pub fn text(size: Option<i64>, charset: Option<&str>) -> Self {
        MySqlDatatype::Text {
            size: clamp_lob_size(size),
            charset: clamp_charset(charset),
        }
    }

    pub fn other_text(kind: MyTextKind, charset: Option<&str>) -> Self {
        MySqlDatatype::OtherText {
            kind,
            charset: clamp_charset(charset),
        }
    }

    pub fn char(size: Option<i64>, charset: Option<&str>) -> Self {
        MySqlDatatype::Char {
            size: clamp_sized(size, 255),
            charset: clamp_charset(charset),
        }
    }

    pub fn binary(size: Option<i64>) -> Self {
        MySqlDatatype::Binary {
            size: clamp_sized(size, 255),
        }
    }

    pub fn varbinary(size: Option<i64>) -> Self {
        // varbinary alone admits zero length.
        let size = match size {
            Some(s) if (0..=65532).contains(&s) => s as u32,
            _ => 65532,
        };
        MySqlDatatype::Varbinary { size }
    }

    pub fn blob(size: Option<i64>) -> Self {
        MySqlDatatype::Blob {
            size: clamp_lob_size(size),
        }
    }

    pub fn other_blob(kind: MyBlobKind) -> Self {
        MySqlDatatype::OtherBlob { kind }
    }

    pub fn decimal(precision: Option<i64>, scale: Option<i64>) -> Self {
        let precision = clamp_decimal_precision(precision);
        MySqlDatatype::Decimal {
            precision,
            scale: clamp_decimal_scale(scale, precision),
        }
    }

    pub fn float(kind: MyFloatKind) -> Self {
        MySqlDatatype::Float { kind }
    }

    pub fn bit(precision: Option<i64>) -> Self {
        let precision = match precision {
            Some(p) if (1..=64).contains(&p) => p as u8,
            _ => 64,
        };
        MySqlDatatype::Bit { precision }
    }

    pub fn integer(kind: MyIntegerKind) -> Self {
        MySqlDatatype::Integer {
            kind,
            sign: Signedness::Signed,
        }
    }

    pub fn date() -> Self {
        MySqlDatatype::Date
    }

    pub fn datetime(kind: MyDatetimeKind, precision: Option<i64>) -> Self {
        MySqlDatatype::Datetime {
            kind,
            precision: clamp_datetime_precision(precision),
        }
    }

    pub fn year() -> Self {
        MySqlDatatype::Year
    }

    /// Canonical datatype name.
    pub fn datatype_name(&self) -> &'static str {
        match self {
            MySqlDatatype::Varchar { .. } => "varchar",
            MySqlDatatype::Text { .. } => "text",
            MySqlDatatype::OtherText { kind, .. } => kind.as_str(),
            MySqlDatatype::Char { .. } => "char",
            MySqlDatatype::Binary { .. } => "binary",
            MySqlDatatype::Varbinary { .. } => "varbinary",
            MySqlDatatype::Blob { .. } => "blob",
            MySqlDatatype::OtherBlob { kind } => kind.as_str(),
            MySqlDatatype::Decimal { .. } => "decimal",
            MySqlDatatype::Float { kind } => kind.as_str(),
            MySqlDatatype::Bit { .. } => "bit",
            MySqlDatatype::Integer { kind, .. } => kind.as_str(),
            MySqlDatatype::Date => "date",
            MySqlDatatype::Datetime { kind, .. } => kind.as_str(),
            MySqlDatatype::Year => "year",
        }
    }

    /// Append the charset clause, tolerating an empty fragment.
    fn with_charset(base: String, charset: &str) -> String {
        let clause = charsets().format(charset);
        if clause.is_empty() {
            base
        } else {
            format!("{} {}", base, clause)
        }
    }

    /// SQL fragment for a column definition.
    pub fn render(&self) -> String {
        match self {
            MySqlDatatype::Varchar { size, charset } => {
                Self::with_charset(format!("varchar({})", size), charset)
            }
            MySqlDatatype::Text { size, charset } => {
                let name = match size {
                    0..=255 => "tinytext",
                    256..=65535 => "text",
                    65536..=16777215 => "mediumtext",
                    _ => "longtext",
                };
                Self::with_charset(name.to_string(), charset)
            }
            MySqlDatatype::OtherText { kind, charset } => {
                Self::with_charset(kind.as_str().to_string(), charset)
            }
            MySqlDatatype::Char { size, charset } => {
                Self::with_charset(format!("char({})", size), charset)
            }
            MySqlDatatype::Binary { size } => format!("binary({})", size),
            MySqlDatatype::Varbinary { size } => format!("varbinary({})", size),
            MySqlDatatype::Blob { size } => match size {
                0..=255 => "tinyblob",
                256..=65535 => "blob",
                65536..=16777215 => "mediumblob",
                _ => "longblob",
            }
            .to_string(),
            MySqlDatatype::Decimal { precision, scale } => {
                format!("decimal({}, {})", precision, scale)
            }
            MySqlDatatype::Float { kind } => match kind {
                MyFloatKind::Float => format!("float({})", Self::float_precision(*kind)),
                MyFloatKind::Double => "double".to_string(),
            },
            MySqlDatatype::Bit { precision: 1 } => "bit".to_string(),
            MySqlDatatype::Bit { precision } => format!("bit({})", precision),
            MySqlDatatype::Integer { kind, sign } => match (kind, sign) {
                (MyIntegerKind::Serial, _) => "bigint unsigned".to_string(),
                (kind, Signedness::Unsigned) => format!("{} unsigned", kind.as_str()),
                (kind, Signedness::Signed) => kind.as_str().to_string(),
            },
            MySqlDatatype::Datetime { kind, precision } => {
                format!("{}({})", kind.as_str(), precision)
            }
            _ => self.datatype_name().to_string(),
        }
    }

    /// Mantissa-derived precision for the float family.
    pub fn float_precision(kind: MyFloatKind) -> u8 {
        match kind {
            MyFloatKind::Float => 12,
            MyFloatKind::Double => 22,
        }
    }

    /// The parameter record this variant carries. Signedness is a
    /// rendering detail and not part of the record.
    pub fn parameters(&self) -> TypeParameters {
        let base = TypeParameters::new(self.datatype_name());
        match self {
            MySqlDatatype::Varchar { size, charset }
            | MySqlDatatype::Text { size, charset }
            | MySqlDatatype::Char { size, charset } => TypeParameters {
                character_size: Some(i64::from(*size)),
                character_set: Some(*charset),
                ..base
            },
            MySqlDatatype::OtherText { charset, .. } => TypeParameters {
                character_set: Some(*charset),
                ..base
            },
            MySqlDatatype::Binary { size }
            | MySqlDatatype::Varbinary { size }
            | MySqlDatatype::Blob { size } => TypeParameters {
                character_size: Some(i64::from(*size)),
                ..base
            },
            MySqlDatatype::Decimal { precision, scale } => TypeParameters {
                numeric_precision: Some(i64::from(*precision)),
                numeric_scale: Some(i64::from(*scale)),
                ..base
            },
            MySqlDatatype::Float { kind } => TypeParameters {
                numeric_precision: Some(i64::from(Self::float_precision(*kind))),
                ..base
            },
            MySqlDatatype::Bit { precision } => TypeParameters {
                numeric_precision: Some(i64::from(*precision)),
                ..base
            },
            MySqlDatatype::Datetime { precision, .. } => TypeParameters {
                datetime_precision: Some(i64::from(*precision)),
                ..base
            },
            _ => base,
        }
    }

    fn is_unicode(charset: &str) -> bool {
        charsets().category(charset) == "unicode"
    }

    /// Convert to the closest-superset SQL Server datatype.
    ///
    /// Total: every variant maps, and the target's own clamping rules
    /// apply (e.g. a 65532-byte varbinary lands on `varbinary(max)`).
    pub fn to_mssql(&self) -> MsSqlDatatype {
        match self {
            MySqlDatatype::Varchar { size, charset } => {
                let kind = if Self::is_unicode(charset) {
                    MsVarcharKind::Nvarchar
                } else {
                    MsVarcharKind::Varchar
                };
                let size = if *size > 8000 { -1 } else { *size as i64 };
                MsSqlDatatype::varchar(kind, Some(size))
            }
            MySqlDatatype::Text { size, charset } => {
                let kind = if Self::is_unicode(charset) {
                    MsVarcharKind::Nvarchar
                } else {
                    MsVarcharKind::Varchar
                };
                let size = if *size <= 255 { 255 } else { -1 };
                MsSqlDatatype::varchar(kind, Some(size))
            }
            MySqlDatatype::OtherText { kind, charset } => {
                let target = if Self::is_unicode(charset) {
                    MsVarcharKind::Nvarchar
                } else {
                    MsVarcharKind::Varchar
                };
                let size = match kind {
                    MyTextKind::Tinytext => 255,
                    MyTextKind::Mediumtext | MyTextKind::Longtext => -1,
                };
                MsSqlDatatype::varchar(target, Some(size))
            }
            MySqlDatatype::Char { size, charset } => {
                let kind = if Self::is_unicode(charset) {
                    MsCharKind::Nchar
                } else {
                    MsCharKind::Char
                };
                MsSqlDatatype::char(kind, Some(i64::from(*size)))
            }
            MySqlDatatype::Binary { size } => MsSqlDatatype::binary(Some(i64::from(*size))),
            MySqlDatatype::Varbinary { size } => MsSqlDatatype::varbinary(Some(i64::from(*size))),
            MySqlDatatype::Blob { .. } => MsSqlDatatype::varbinary(Some(-1)),
            MySqlDatatype::OtherBlob { kind } => match kind {
                MyBlobKind::Tinyblob => MsSqlDatatype::varbinary(Some(255)),
                MyBlobKind::Mediumblob | MyBlobKind::Longblob => {
                    MsSqlDatatype::varbinary(Some(-1))
                }
            },
            MySqlDatatype::Decimal { precision, scale } => {
                let precision = (*precision).min(38);
                MsSqlDatatype::numeric(
                    MsNumericKind::Numeric,
                    Some(i64::from(precision)),
                    Some(i64::from(*scale)),
                )
            }
            MySqlDatatype::Float { kind } => match kind {
                MyFloatKind::Double => MsSqlDatatype::float(MsFloatKind::Float),
                MyFloatKind::Float => MsSqlDatatype::float(MsFloatKind::Real),
            },
            // A 64-bit bit field does not fit any SQL Server integer;
            // numeric(20, 0) holds the full unsigned range.
            MySqlDatatype::Bit { .. } => {
                MsSqlDatatype::numeric(MsNumericKind::Numeric, Some(20), Some(0))
            }
            MySqlDatatype::Integer { kind, .. } => match kind {
                MyIntegerKind::Int => MsSqlDatatype::integer(MsIntegerKind::Bigint),
                MyIntegerKind::Tinyint => MsSqlDatatype::integer(MsIntegerKind::Smallint),
                MyIntegerKind::Smallint | MyIntegerKind::Mediumint => {
                    MsSqlDatatype::integer(MsIntegerKind::Int)
                }
                MyIntegerKind::Bigint | MyIntegerKind::Serial => {
                    MsSqlDatatype::numeric(MsNumericKind::Numeric, Some(20), Some(0))
                }
            },
            MySqlDatatype::Date => MsSqlDatatype::datetime(MsDatetimeKind::Date),
            MySqlDatatype::Datetime { kind, precision } => {
                let target = match kind {
                    MyDatetimeKind::Time => MsDatetime2Kind::Time,
                    MyDatetimeKind::Timestamp | MyDatetimeKind::Datetime => {
                        MsDatetime2Kind::Datetime2
                    }
                };
                MsSqlDatatype::datetime2(target, Some(i64::from(*precision)))
            }
            MySqlDatatype::Year => MsSqlDatatype::integer(MsIntegerKind::Int),
        }
    }
}
