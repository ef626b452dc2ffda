//! SQL Server → MySQL conversion, variant by variant.
//!
//! Every case feeds a value built by the factory through
//! `convert_to(MySql)` and checks the rendered target type. Several
//! cases also pin the exact parameter record, since the rendered text
//! can hide clamping (a `datetime(6)` could be a clamped 7 or a
//! passed-through 6).

use sqlferry::sql::{Datatype, Dialect, RawColumnType};

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

/// Build an MSSQL datatype and return its MySQL rendering.
fn converted(name: &str, raw: &RawColumnType) -> String {
    Datatype::create(Dialect::MsSql, name, raw)
        .unwrap()
        .convert_to(Dialect::MySql)
        .render()
}

#[test]
fn varchar_keeps_size_under_latin1() {
    assert_eq!(converted("varchar", &sized(500)), "varchar(500) character set latin1");
    assert_eq!(converted("varchar", &sized(-1)), "longtext character set latin1");
}

#[test]
fn nvarchar_maps_to_utf8mb4() {
    // Scenario: nvarchar(500) crosses over as a 500-character utf8mb4 varchar.
    let dt = Datatype::create(Dialect::MsSql, "nvarchar", &sized(500)).unwrap();
    assert_eq!(dt.render(), "nvarchar(500)");
    assert_eq!(
        dt.convert_to(Dialect::MySql).render(),
        "varchar(500) character set utf8mb4"
    );
    assert_eq!(converted("nvarchar", &sized(-1)), "longtext character set utf8mb4");
}

#[test]
fn text_maps_to_longtext() {
    assert_eq!(converted("text", &RawColumnType::default()), "longtext character set latin1");
    assert_eq!(converted("ntext", &RawColumnType::default()), "longtext character set utf8mb4");
}

#[test]
fn char_splits_on_the_255_boundary() {
    assert_eq!(converted("char", &sized(200)), "char(200) character set latin1");
    assert_eq!(converted("char", &sized(256)), "varchar(256) character set latin1");
    assert_eq!(converted("nchar", &sized(255)), "char(255) character set utf8mb4");
    assert_eq!(converted("nchar", &sized(500)), "varchar(500) character set utf8mb4");
}

#[test]
fn binary_splits_on_the_255_boundary() {
    assert_eq!(converted("binary", &sized(100)), "binary(100)");
    assert_eq!(converted("binary", &sized(300)), "blob");
}

#[test]
fn varbinary_max_becomes_longblob() {
    assert_eq!(converted("varbinary", &sized(-1)), "longblob");
    assert_eq!(converted("varbinary", &sized(400)), "varbinary(400)");
}

#[test]
fn numeric_carries_precision_and_scale() {
    assert_eq!(converted("numeric", &numeric(10, 5)), "decimal(10, 5)");
    assert_eq!(converted("decimal", &numeric(18, 2)), "decimal(18, 2)");
    // MySQL's own scale cap applies on arrival.
    assert_eq!(converted("numeric", &numeric(38, 35)), "decimal(38, 30)");
}

#[test]
fn decimal_scenario_clamps_at_the_source() {
    // Scenario: decimal(45, 10) clamps to 38 before crossing over.
    let dt = Datatype::create(Dialect::MsSql, "decimal", &numeric(45, 10)).unwrap();
    assert_eq!(dt.render(), "decimal(38, 10)");

    let params = dt.convert_to(Dialect::MySql).parameters();
    assert_eq!(params.datatype_name, "decimal");
    assert_eq!(params.numeric_precision, Some(38));
    assert_eq!(params.numeric_scale, Some(10));
}

#[test]
fn float_family() {
    assert_eq!(converted("float", &RawColumnType::default()), "float(12)");
    assert_eq!(converted("real", &RawColumnType::default()), "double");
}

#[test]
fn integer_family_widens_asymmetrically() {
    // bit fits a signed tinyint, but tinyint (unsigned 0..=255 on SQL
    // Server) must widen to smallint. The asymmetry is deliberate.
    assert_eq!(converted("bit", &RawColumnType::default()), "tinyint");
    assert_eq!(converted("tinyint", &RawColumnType::default()), "smallint");
    assert_eq!(converted("smallint", &RawColumnType::default()), "smallint");
    assert_eq!(converted("int", &RawColumnType::default()), "int");
    assert_eq!(converted("bigint", &RawColumnType::default()), "bigint");
}

#[test]
fn money_becomes_fixed_point_decimal() {
    assert_eq!(converted("money", &RawColumnType::default()), "decimal(19, 4)");
    assert_eq!(converted("smallmoney", &RawColumnType::default()), "decimal(10, 4)");
}

#[test]
fn rowversion_becomes_bigint() {
    assert_eq!(converted("timestamp", &RawColumnType::default()), "bigint");
    assert_eq!(converted("rowversion", &RawColumnType::default()), "bigint");
}

#[test]
fn plain_datetimes() {
    assert_eq!(converted("date", &RawColumnType::default()), "date");
    assert_eq!(converted("datetime", &RawColumnType::default()), "datetime(0)");
    assert_eq!(converted("smalldatetime", &RawColumnType::default()), "datetime(0)");
}

#[test]
fn fractional_datetimes_carry_precision_clamped_to_six() {
    assert_eq!(converted("datetime2", &dt_precision(3)), "datetime(3)");
    assert_eq!(converted("datetime2", &dt_precision(7)), "datetime(6)");
    assert_eq!(converted("time", &dt_precision(2)), "time(2)");
    assert_eq!(converted("time", &dt_precision(7)), "time(6)");
    // datetimeoffset drops its timezone: documented lossy.
    assert_eq!(converted("datetimeoffset", &dt_precision(5)), "datetime(5)");
}

#[test]
fn special_types() {
    for name in ["geography", "geometry", "hierarchyid", "image"] {
        assert_eq!(converted(name, &RawColumnType::default()), "blob", "{}", name);
    }
    assert_eq!(converted("sql_variant", &RawColumnType::default()), "text character set latin1");
    assert_eq!(converted("xml", &RawColumnType::default()), "text character set latin1");
    assert_eq!(
        converted("sysname", &RawColumnType::default()),
        "varchar(128) character set utf8mb4"
    );
}

#[test]
fn uniqueidentifier_scenario() {
    // Scenario: a GUID crosses over as 16 raw bytes.
    let dt = Datatype::create(Dialect::MsSql, "uniqueidentifier", &RawColumnType::default())
        .unwrap()
        .convert_to(Dialect::MySql);
    assert_eq!(dt.render(), "binary(16)");
    assert_eq!(dt.parameters().character_size, Some(16));
}

#[test]
fn conversion_is_total_over_the_catalog() {
    use sqlferry::sql::DatatypeCatalog;

    for entry in DatatypeCatalog::new(Dialect::MsSql).entries() {
        let dt = Datatype::create(Dialect::MsSql, entry.name, &RawColumnType::default()).unwrap();
        let converted = dt.convert_to(Dialect::MySql);
        assert_eq!(converted.dialect(), Dialect::MySql);
        assert!(!converted.render().is_empty());
    }
}
