//! Datatype-name catalog.
//!
//! Each dialect has a table of canonical datatype names with their
//! accepted synonyms (`character varying` → `varchar`, `int4` → `int`,
//! …) and a coarse category. The reverse synonym index is precomputed
//! and drives case-insensitive normalization of whatever spelling the
//! source catalog hands us.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::dialect::Dialect;

/// Coarse classification used to route conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatatypeCategory {
    CharacterString,
    Numeric,
    Binary,
    Datetime,
    Other,
}

impl DatatypeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatatypeCategory::CharacterString => "CharacterString",
            DatatypeCategory::Numeric => "Numeric",
            DatatypeCategory::Binary => "Binary",
            DatatypeCategory::Datetime => "Datetime",
            DatatypeCategory::Other => "Other",
        }
    }
}

/// One catalog entry: a canonical name, its synonyms (which always
/// include the canonical spelling), and its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatatypeName {
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
    pub category: DatatypeCategory,
}

macro_rules! datatype {
    ($name:literal, [$($syn:literal),+], $cat:ident) => {
        DatatypeName {
            name: $name,
            synonyms: &[$($syn),+],
            category: DatatypeCategory::$cat,
        }
    };
}

static MSSQL_DATATYPES: &[DatatypeName] = &[
    datatype!("varchar", ["character varying", "char varying", "varchar"], CharacterString),
    datatype!(
        "nvarchar",
        ["nvarchar", "national character varying", "national char varying"],
        CharacterString
    ),
    datatype!("text", ["text"], CharacterString),
    datatype!("ntext", ["national text", "ntext"], CharacterString),
    datatype!("char", ["character", "char"], CharacterString),
    datatype!("nchar", ["national character", "national char", "nchar"], CharacterString),
    datatype!("numeric", ["numeric"], Numeric),
    datatype!("decimal", ["dec", "decimal"], Numeric),
    datatype!("float", ["float", "double precision"], Numeric),
    datatype!("real", ["real"], Numeric),
    datatype!("bit", ["bit"], Numeric),
    datatype!("tinyint", ["tinyint"], Numeric),
    datatype!("smallint", ["smallint"], Numeric),
    datatype!("int", ["int", "integer"], Numeric),
    datatype!("bigint", ["bigint"], Numeric),
    datatype!("smallmoney", ["smallmoney"], Numeric),
    datatype!("money", ["money"], Numeric),
    datatype!("varbinary", ["varbinary", "binary varying"], Binary),
    datatype!("binary", ["binary"], Binary),
    datatype!("geography", ["geography"], Other),
    datatype!("geometry", ["geometry"], Other),
    datatype!("hierarchyid", ["hierarchyid"], Other),
    datatype!("image", ["image"], Other),
    datatype!("sql_variant", ["sql_variant"], Other),
    datatype!("sysname", ["sysname"], Other),
    datatype!("uniqueidentifier", ["uniqueidentifier"], Other),
    datatype!("xml", ["xml"], Other),
    datatype!("timestamp", ["timestamp", "rowversion"], Datetime),
    datatype!("date", ["date"], Datetime),
    datatype!("datetime", ["datetime"], Datetime),
    datatype!("datetime2", ["datetime2"], Datetime),
    datatype!("datetimeoffset", ["datetimeoffset"], Datetime),
    datatype!("smalldatetime", ["smalldatetime"], Datetime),
    datatype!("time", ["time"], Datetime),
];

static MYSQL_DATATYPES: &[DatatypeName] = &[
    datatype!("varchar", ["character varying", "char varying", "varchar"], CharacterString),
    datatype!(
        "nvarchar",
        ["nvarchar", "national character varying", "national char varying"],
        CharacterString
    ),
    datatype!("text", ["text"], CharacterString),
    datatype!("tinytext", ["tinytext"], CharacterString),
    datatype!("mediumtext", ["mediumtext", "long", "long varchar"], CharacterString),
    datatype!("longtext", ["longtext"], CharacterString),
    datatype!("char", ["character", "char"], CharacterString),
    datatype!("nchar", ["national character", "national char", "nchar"], CharacterString),
    datatype!("set", ["set"], CharacterString),
    datatype!("enum", ["enum"], CharacterString),
    datatype!("decimal", ["numeric", "dec", "decimal", "fixed"], Numeric),
    datatype!("float", ["float", "float4"], Numeric),
    datatype!("double", ["float8", "double", "double precision", "real"], Numeric),
    datatype!("bit", ["bit"], Numeric),
    datatype!("tinyint", ["int1", "tinyint", "bool", "boolean"], Numeric),
    datatype!("smallint", ["int2", "smallint"], Numeric),
    datatype!("mediumint", ["int3", "mediumint", "middleint"], Numeric),
    datatype!("int", ["int4", "integer", "int"], Numeric),
    datatype!("bigint", ["int8", "bigint"], Numeric),
    datatype!("serial", ["serial"], Numeric),
    datatype!("varbinary", ["varbinary"], Binary),
    datatype!("binary", ["binary"], Binary),
    datatype!("blob", ["blob"], Binary),
    datatype!("tinyblob", ["tinyblob"], Binary),
    datatype!("mediumblob", ["mediumblob", "long varbinary"], Binary),
    datatype!("longblob", ["longblob"], Binary),
    datatype!("date", ["date"], Datetime),
    datatype!("datetime", ["datetime"], Datetime),
    datatype!("time", ["time"], Datetime),
    datatype!("timestamp", ["timestamp"], Datetime),
    datatype!("year", ["year"], Datetime),
];

fn build_index(
    table: &'static [DatatypeName],
) -> HashMap<&'static str, &'static DatatypeName> {
    let mut index = HashMap::new();
    for entry in table {
        for synonym in entry.synonyms {
            index.insert(*synonym, entry);
        }
    }
    index
}

static MSSQL_SYNONYM_INDEX: Lazy<HashMap<&'static str, &'static DatatypeName>> =
    Lazy::new(|| build_index(MSSQL_DATATYPES));

static MYSQL_SYNONYM_INDEX: Lazy<HashMap<&'static str, &'static DatatypeName>> =
    Lazy::new(|| build_index(MYSQL_DATATYPES));

/// Per-dialect view over the datatype-name tables.
#[derive(Debug, Clone, Copy)]
pub struct DatatypeCatalog {
    dialect: Dialect,
}

impl DatatypeCatalog {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// All entries for this dialect, in catalog order.
    pub fn entries(&self) -> &'static [DatatypeName] {
        match self.dialect {
            Dialect::MsSql => MSSQL_DATATYPES,
            Dialect::MySql => MYSQL_DATATYPES,
        }
    }

    fn index(&self) -> &'static HashMap<&'static str, &'static DatatypeName> {
        match self.dialect {
            Dialect::MsSql => &MSSQL_SYNONYM_INDEX,
            Dialect::MySql => &MYSQL_SYNONYM_INDEX,
        }
    }

    /// Resolve any synonym (case-insensitive) to its canonical name.
    pub fn canonical(&self, synonym: &str) -> Option<&'static str> {
        self.metadata(synonym).map(|entry| entry.name)
    }

    /// Full metadata for a canonical name or any synonym of it.
    pub fn metadata(&self, name: &str) -> Option<&'static DatatypeName> {
        self.index().get(name.to_lowercase().as_str()).copied()
    }

    /// Synonyms of a datatype, or empty if unknown.
    pub fn synonyms(&self, name: &str) -> &'static [&'static str] {
        self.metadata(name).map(|entry| entry.synonyms).unwrap_or(&[])
    }

    /// Category string, or `""` if unknown.
    pub fn category(&self, name: &str) -> &'static str {
        self.metadata(name)
            .map(|entry| entry.category.as_str())
            .unwrap_or("")
    }
}
