//! Column and table behavior over a realistic schema: rendering,
//! conversion, and the statement quartet the transfer engine runs.

use insta::assert_snapshot;

use sqlferry::schema::{Column, ColumnDescription, Database, Nullable, Table};
use sqlferry::sql::{Datatype, Dialect, RawColumnType};

fn describe(
    name: &str,
    nullable: Nullable,
    datatype: &str,
    raw: RawColumnType,
) -> ColumnDescription {
    ColumnDescription {
        column_name: name.to_string(),
        nullable,
        datatype_name: datatype.to_string(),
        datatype: raw,
    }
}

/// A SQL Server table using most of the type families.
fn orders_table() -> Table {
    let descriptions = vec![
        describe("order_id", Nullable::No, "bigint", RawColumnType::default()),
        describe(
            "customer_ref",
            Nullable::No,
            "uniqueidentifier",
            RawColumnType::default(),
        ),
        describe(
            "label",
            Nullable::Yes,
            "nvarchar",
            RawColumnType {
                character_size: Some(120),
                ..Default::default()
            },
        ),
        describe(
            "total",
            Nullable::No,
            "money",
            RawColumnType::default(),
        ),
        describe(
            "placed_at",
            Nullable::No,
            "datetime2",
            RawColumnType {
                datetime_precision: Some(3),
                ..Default::default()
            },
        ),
    ];
    let columns = descriptions
        .iter()
        .map(|desc| Column::from_description(Dialect::MsSql, desc).unwrap())
        .collect();
    Table::new(Dialect::MsSql, "orders", "BASE TABLE", None, columns)
}

#[test]
fn column_parameters_are_the_datatype_record_plus_the_name() {
    let table = orders_table();
    for column in table.columns() {
        let params = column.column_parameters();
        assert_eq!(params.column_name, column.name());
        assert_eq!(params.datatype, column.datatype().parameters());
    }
}

#[test]
fn statement_quartet_on_the_source() {
    let table = orders_table();
    assert_snapshot!(table.render_select("shop", None), @"SELECT * FROM shop.dbo.orders;");
    assert_snapshot!(table.render_drop("shop", None), @"DROP TABLE IF EXISTS shop.dbo.orders;");
    assert_snapshot!(
        table.render_insert("shop", None),
        @"INSERT INTO shop.dbo.orders (order_id, customer_ref, label, total, placed_at) VALUES (?,?,?,?,?);"
    );
}

#[test]
fn create_statement_renders_every_column() {
    let table = orders_table();
    assert_eq!(
        table.render_create("shop", None),
        "CREATE TABLE shop.dbo.orders (\n\n\
         order_id bigint not null,\n\
         customer_ref uniqueidentifier not null,\n\
         label nvarchar(120) null,\n\
         total money not null,\n\
         placed_at datetime2(3) not null\n\n);"
    );
}

#[test]
fn converted_table_recreates_on_mysql() {
    let table = orders_table().convert_to(Dialect::MySql);
    assert_eq!(table.dialect(), Dialect::MySql);
    assert_eq!(
        table.render_create("shop", None),
        "CREATE TABLE shop.orders (\n\n\
         order_id bigint not null,\n\
         customer_ref binary(16) not null,\n\
         label varchar(120) character set utf8mb4 null,\n\
         total decimal(19, 4) not null,\n\
         placed_at datetime(3) not null\n\n);"
    );
}

#[test]
fn alternate_table_name_flows_through_every_statement() {
    let table = orders_table();
    assert_eq!(
        table.render_select("shop", Some("orders_backup")),
        "SELECT * FROM shop.dbo.orders_backup;"
    );
    assert_eq!(
        table.render_drop("shop", Some("orders_backup")),
        "DROP TABLE IF EXISTS shop.dbo.orders_backup;"
    );
}

#[test]
fn database_selection_and_conversion() {
    let source = Database::new(Dialect::MsSql, "shop", vec![orders_table()]);
    assert_eq!(source.table_names(), vec!["shop.dbo.orders"]);
    assert_eq!(source.use_statement(), "USE shop;");

    let converted = source.convert_tables(&["shop.dbo.orders".to_string()], Dialect::MySql);
    assert_eq!(converted.len(), 1);
    assert_eq!(converted[0].qualified_name("shop", None), "shop.orders");
}

#[test]
fn round_trip_across_dialects_widens_but_never_breaks() {
    // Over and back is lossy by design: money came back as numeric,
    // the GUID stayed raw bytes, and the unsigned-capable bigint
    // pushed the original bigint into numeric(20, 0).
    let back = orders_table()
        .convert_to(Dialect::MySql)
        .convert_to(Dialect::MsSql);
    let rendered: Vec<String> = back
        .columns()
        .iter()
        .map(|column| column.datatype().render())
        .collect();
    assert_eq!(
        rendered,
        [
            "numeric(20, 0)",
            "binary(16)",
            "nvarchar(120)",
            "numeric(19, 4)",
            "datetime2(3)",
        ]
    );
}

#[test]
fn catalog_rows_deserialize_into_descriptions() {
    let json = serde_json::json!([
        {
            "column_name": "id",
            "nullable": "NO",
            "datatype_name": "INT",
            "numeric_precision": 10,
            "numeric_scale": 0
        },
        {
            "column_name": "body",
            "nullable": "YES",
            "datatype_name": "longtext",
            "character_size": 4294967295u32,
            "character_set": "utf8mb4"
        }
    ]);
    let descriptions: Vec<ColumnDescription> = serde_json::from_value(json).unwrap();
    let table = Table::from_catalog(
        Dialect::MySql,
        &sqlferry::schema::TableDescription {
            schema: None,
            table: "posts".to_string(),
            table_type: "BASE TABLE".to_string(),
        },
        &descriptions,
    )
    .unwrap();
    assert_eq!(
        table.render_create("blog", None),
        "CREATE TABLE blog.posts (\n\n\
         id int not null,\n\
         body longtext character set utf8mb4 null\n\n);"
    );
}
