//! MySQL → SQL Server conversion, variant by variant.
//!
//! The unicode-vs-character classification of the column's character
//! set decides between the n-prefixed and plain SQL Server types, and
//! the 8000-byte ceiling decides between sized types and `(max)`.

use sqlferry::sql::{Datatype, Dialect, RawColumnType};

fn varchar(size: i64, charset: &str) -> RawColumnType {
    RawColumnType {
        character_size: Some(size),
        character_set: Some(charset.to_string()),
        ..Default::default()
    }
}

fn sized(size: i64) -> RawColumnType {
    RawColumnType {
        character_size: Some(size),
        ..Default::default()
    }
}

fn numeric(precision: i64, scale: i64) -> RawColumnType {
    RawColumnType {
        numeric_precision: Some(precision),
        numeric_scale: Some(scale),
        ..Default::default()
    }
}

fn dt_precision(precision: i64) -> RawColumnType {
    RawColumnType {
        datetime_precision: Some(precision),
        ..Default::default()
    }
}

/// Build a MySQL datatype and return its SQL Server rendering.
fn converted(name: &str, raw: &RawColumnType) -> String {
    Datatype::create(Dialect::MySql, name, raw)
        .unwrap()
        .convert_to(Dialect::MsSql)
        .render()
}

#[test]
fn varchar_charset_category_picks_the_target_kind() {
    assert_eq!(converted("varchar", &varchar(500, "latin1")), "varchar(500)");
    assert_eq!(converted("varchar", &varchar(500, "utf8mb4")), "nvarchar(500)");
    // Above 8000 characters only (max) can hold it.
    assert_eq!(converted("varchar", &varchar(9000, "latin1")), "varchar(max)");
    assert_eq!(converted("varchar", &varchar(9000, "utf8mb4")), "nvarchar(max)");
    assert_eq!(converted("varchar", &varchar(8000, "utf8mb4")), "nvarchar(8000)");
}

#[test]
fn utf16_counts_as_character_not_unicode() {
    // The charset catalog classifies utf16/utf16le/utf32 as character
    // (only utf8/utf8mb4 and the CJK sets are unicode), so these land
    // on plain varchar. Preserved as-is.
    assert_eq!(converted("varchar", &varchar(1000, "utf16")), "varchar(1000)");
    assert_eq!(converted("varchar", &varchar(1000, "utf32")), "varchar(1000)");
    assert_eq!(converted("varchar", &varchar(1000, "utf8")), "nvarchar(1000)");
}

#[test]
fn oversized_varchar_scenario() {
    // Scenario: a 50-million-character request caps at utf8mb4's
    // 16383, which is still beyond 8000 bytes, so (max) it is.
    let dt = Datatype::create(Dialect::MySql, "varchar", &varchar(50000000, "utf8mb4")).unwrap();
    assert_eq!(dt.render(), "varchar(16383) character set utf8mb4");

    let converted = dt.convert_to(Dialect::MsSql);
    let params = converted.parameters();
    assert_eq!(params.datatype_name, "nvarchar");
    assert_eq!(params.character_size, Some(-1));
    assert_eq!(converted.render(), "nvarchar(max)");
}

#[test]
fn text_buckets_split_on_tinytext() {
    assert_eq!(converted("text", &varchar(100, "latin1")), "varchar(255)");
    assert_eq!(converted("text", &varchar(100, "utf8mb4")), "nvarchar(255)");
    assert_eq!(converted("text", &varchar(70000, "latin1")), "varchar(max)");
    assert_eq!(converted("text", &varchar(70000, "utf8")), "nvarchar(max)");
}

#[test]
fn mediumtext_scenario() {
    // Scenario: 16777210 characters bucket to mediumtext, which has no
    // sized counterpart on SQL Server.
    let dt = Datatype::create(Dialect::MySql, "text", &varchar(16777210, "latin1")).unwrap();
    assert_eq!(dt.render(), "mediumtext character set latin1");
    assert_eq!(dt.convert_to(Dialect::MsSql).render(), "varchar(max)");
}

#[test]
fn named_text_types() {
    assert_eq!(converted("tinytext", &varchar(0, "latin1")), "varchar(255)");
    assert_eq!(converted("tinytext", &varchar(0, "utf8mb4")), "nvarchar(255)");
    assert_eq!(converted("mediumtext", &varchar(0, "latin1")), "varchar(max)");
    assert_eq!(converted("longtext", &varchar(0, "utf8mb4")), "nvarchar(max)");
}

#[test]
fn char_keeps_its_size() {
    assert_eq!(converted("char", &varchar(200, "latin1")), "char(200)");
    assert_eq!(converted("char", &varchar(200, "utf8mb4")), "nchar(200)");
}

#[test]
fn binary_types() {
    assert_eq!(converted("binary", &sized(16)), "binary(16)");
    assert_eq!(converted("varbinary", &sized(400)), "varbinary(400)");
    // 65532 exceeds SQL Server's 8000 ceiling and clamps to (max);
    // so does the zero-length oddity varbinary(0).
    assert_eq!(converted("varbinary", &sized(65532)), "varbinary(max)");
    assert_eq!(converted("varbinary", &sized(0)), "varbinary(max)");
}

#[test]
fn blob_types_land_on_varbinary() {
    assert_eq!(converted("blob", &sized(1000)), "varbinary(max)");
    assert_eq!(converted("tinyblob", &RawColumnType::default()), "varbinary(255)");
    assert_eq!(converted("mediumblob", &RawColumnType::default()), "varbinary(max)");
    assert_eq!(converted("longblob", &RawColumnType::default()), "varbinary(max)");
}

#[test]
fn decimal_precision_caps_at_38() {
    assert_eq!(converted("decimal", &numeric(10, 2)), "numeric(10, 2)");
    assert_eq!(converted("decimal", &numeric(65, 30)), "numeric(38, 30)");
    // The numeric/dec/fixed spellings are synonyms of decimal.
    assert_eq!(converted("fixed", &numeric(12, 0)), "numeric(12, 0)");
}

#[test]
fn float_family_swaps_width_names() {
    assert_eq!(converted("double", &RawColumnType::default()), "float");
    assert_eq!(converted("float", &RawColumnType::default()), "real");
    // MySQL "real" is a synonym of double.
    assert_eq!(converted("real", &RawColumnType::default()), "float");
}

#[test]
fn bit_needs_twenty_digits() {
    let raw = RawColumnType {
        numeric_precision: Some(64),
        ..Default::default()
    };
    assert_eq!(converted("bit", &raw), "numeric(20, 0)");
    assert_eq!(converted("bit", &RawColumnType::default()), "numeric(20, 0)");
}

#[test]
fn integer_family_widens_one_step() {
    assert_eq!(converted("tinyint", &RawColumnType::default()), "smallint");
    assert_eq!(converted("smallint", &RawColumnType::default()), "int");
    assert_eq!(converted("mediumint", &RawColumnType::default()), "int");
    assert_eq!(converted("int", &RawColumnType::default()), "bigint");
}

#[test]
fn bigint_scenario_needs_numeric() {
    // Scenario: an unsigned-capable bigint does not fit SQL Server's
    // signed bigint; numeric(20, 0) holds the whole range.
    let params = Datatype::create(Dialect::MySql, "bigint", &RawColumnType::default())
        .unwrap()
        .convert_to(Dialect::MsSql)
        .parameters();
    assert_eq!(params.datatype_name, "numeric");
    assert_eq!(params.numeric_precision, Some(20));
    assert_eq!(params.numeric_scale, Some(0));

    assert_eq!(converted("bigint", &RawColumnType::default()), "numeric(20, 0)");
    assert_eq!(converted("serial", &RawColumnType::default()), "numeric(20, 0)");
}

#[test]
fn datetime_family() {
    assert_eq!(converted("date", &RawColumnType::default()), "date");
    assert_eq!(converted("time", &dt_precision(3)), "time(3)");
    assert_eq!(converted("datetime", &dt_precision(6)), "datetime2(6)");
    assert_eq!(converted("timestamp", &dt_precision(0)), "datetime2(0)");
    assert_eq!(converted("year", &RawColumnType::default()), "int");
}

#[test]
fn identity_and_double_conversion() {
    for name in ["varchar", "decimal", "bigint", "year", "blob"] {
        let dt = Datatype::create(Dialect::MySql, name, &RawColumnType::default()).unwrap();
        // Same-dialect conversion is the identity.
        assert_eq!(dt.convert_to(Dialect::MySql), dt);
        // And a converted value converts to itself in its own dialect.
        let over = dt.convert_to(Dialect::MsSql);
        assert_eq!(over.convert_to(Dialect::MsSql), over);
    }
}

#[test]
fn converted_values_are_legal_in_the_target_dialect() {
    use sqlferry::sql::DatatypeCatalog;

    // Rebuilding each converted value from its own parameter record
    // must be a no-op: the conversion already applied the target's
    // clamping rules.
    for entry in DatatypeCatalog::new(Dialect::MySql).entries() {
        let dt = Datatype::create(Dialect::MySql, entry.name, &RawColumnType::default()).unwrap();
        let over = dt.convert_to(Dialect::MsSql);
        let params = over.parameters();
        let raw = RawColumnType {
            character_size: params.character_size,
            character_set: params.character_set.map(str::to_string),
            numeric_precision: params.numeric_precision,
            numeric_scale: params.numeric_scale,
            datetime_precision: params.datetime_precision,
        };
        let rebuilt = Datatype::create(Dialect::MsSql, params.datatype_name, &raw).unwrap();
        assert_eq!(rebuilt, over, "converted {} not legal at the target", entry.name);
    }
}
