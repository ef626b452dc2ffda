//! Character-set catalog.
//!
//! MySQL expresses character sets at the type level, so its catalog
//! drives both the maximum byte length of `varchar` columns and the
//! unicode-vs-character classification used when converting to SQL
//! Server (`nvarchar` vs `varchar`). SQL Server has no type-level
//! character set, so its catalog is empty.
//!
//! Lookups for unknown names return empty sentinels (`""`, `0`)
//! rather than errors so renderers can concatenate unconditionally.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::dialect::Dialect;

/// Coarse classification of a character set.
///
/// Note the catalog classifies `utf8` as unicode but `utf16`,
/// `utf16le`, and `utf32` as character. This matches the upstream
/// MySQL column-type mapping this table was taken from and is relied
/// on by the conversion rules; do not "correct" it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetCategory {
    Character,
    Unicode,
}

impl CharsetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharsetCategory::Character => "character",
            CharsetCategory::Unicode => "unicode",
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    pub name: &'static str,
    pub description: &'static str,
    /// Worst-case bytes per character, 1..=4.
    pub max_length: u32,
    pub category: CharsetCategory,
}

macro_rules! charset {
    ($name:literal, $desc:literal, $max:literal, $cat:ident) => {
        CharacterSet {
            name: $name,
            description: $desc,
            max_length: $max,
            category: CharsetCategory::$cat,
        }
    };
}

static MYSQL_CHARACTER_SETS: &[CharacterSet] = &[
    charset!("armscii8", "ARMSCII-8 Armenian", 1, Character),
    charset!("ascii", "US ASCII", 1, Character),
    charset!("big5", "Big5 Traditional Chinese", 2, Unicode),
    charset!("binary", "Binary pseudo charset", 1, Character),
    charset!("cp1250", "Windows Central European", 1, Character),
    charset!("cp1251", "Windows Cyrillic", 1, Character),
    charset!("cp1256", "Windows Arabic", 1, Character),
    charset!("cp1257", "Windows Baltic", 1, Character),
    charset!("cp850", "DOS West European", 1, Character),
    charset!("cp852", "DOS Central European", 1, Character),
    charset!("cp866", "DOS Russian", 1, Character),
    charset!("cp932", "SJIS for Windows Japanese", 2, Unicode),
    charset!("dec8", "DEC West European", 1, Character),
    charset!("eucjpms", "UJIS for Windows Japanese", 3, Unicode),
    charset!("euckr", "EUC-KR Korean", 2, Unicode),
    charset!("gb18030", "China National Standard GB18030", 4, Character),
    charset!("gb2312", "GB2312 Simplified Chinese", 2, Unicode),
    charset!("gbk", "GBK Simplified Chinese", 2, Unicode),
    charset!("geostd8", "GEOSTD8 Georgian", 1, Character),
    charset!("greek", "ISO 8859-7 Greek", 1, Character),
    charset!("hebrew", "ISO 8859-8 Hebrew", 1, Character),
    charset!("hp8", "HP West European", 1, Character),
    charset!("keybcs2", "DOS Kamenicky Czech-Slovak", 1, Character),
    charset!("koi8r", "KOI8-R Relcom Russian", 1, Character),
    charset!("koi8u", "KOI8-U Ukrainian", 1, Character),
    charset!("latin1", "cp1252 West European", 1, Character),
    charset!("latin2", "ISO 8859-2 Central European", 1, Character),
    charset!("latin5", "ISO 8859-9 Turkish", 1, Character),
    charset!("latin7", "ISO 8859-13 Baltic", 1, Character),
    charset!("macce", "Mac Central European", 1, Character),
    charset!("macroman", "Mac West European", 1, Character),
    charset!("sjis", "Shift-JIS Japanese", 2, Unicode),
    charset!("swe7", "7bit Swedish", 1, Character),
    charset!("tis620", "TIS620 Thai", 1, Character),
    charset!("ucs2", "UCS-2 Unicode", 2, Unicode),
    charset!("ujis", "EUC-JP Japanese", 3, Unicode),
    charset!("utf16", "UTF-16 Unicode", 4, Character),
    charset!("utf16le", "UTF-16LE Unicode", 4, Character),
    charset!("utf32", "UTF-32 Unicode", 4, Character),
    charset!("utf8", "UTF-8 Unicode", 3, Unicode),
    charset!("utf8mb4", "UTF-8 Unicode", 4, Unicode),
];

static MYSQL_CHARSET_INDEX: Lazy<HashMap<&'static str, &'static CharacterSet>> =
    Lazy::new(|| MYSQL_CHARACTER_SETS.iter().map(|cs| (cs.name, cs)).collect());

/// Per-dialect view over the character-set tables.
#[derive(Debug, Clone, Copy)]
pub struct CharsetCatalog {
    dialect: Dialect,
}

impl CharsetCatalog {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// All entries for this dialect. Empty for SQL Server.
    pub fn entries(&self) -> &'static [CharacterSet] {
        match self.dialect {
            Dialect::MsSql => &[],
            Dialect::MySql => MYSQL_CHARACTER_SETS,
        }
    }

    /// Look up a character set by exact name.
    pub fn lookup(&self, name: &str) -> Option<&'static CharacterSet> {
        match self.dialect {
            Dialect::MsSql => None,
            Dialect::MySql => MYSQL_CHARSET_INDEX.get(name).copied(),
        }
    }

    /// SQL fragment naming the character set, or `""` if unknown.
    pub fn format(&self, name: &str) -> String {
        match self.lookup(name) {
            Some(cs) => format!("character set {}", cs.name),
            None => String::new(),
        }
    }

    /// `"character"`, `"unicode"`, or `""` if unknown.
    pub fn category(&self, name: &str) -> &'static str {
        self.lookup(name).map(|cs| cs.category.as_str()).unwrap_or("")
    }

    /// Worst-case bytes per character, or `0` if unknown.
    pub fn max_length(&self, name: &str) -> u32 {
        self.lookup(name).map(|cs| cs.max_length).unwrap_or(0)
    }
}
