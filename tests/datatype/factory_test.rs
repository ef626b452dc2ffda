//! Factory behavior across both dialect catalogs: synonym
//! normalization, totality, clamping fixed points, and the
//! render-token round trip.

use sqlferry::sql::{Datatype, DatatypeCatalog, Dialect, RawColumnType, TypeParameters};

fn raw_from(params: &TypeParameters) -> RawColumnType {
    RawColumnType {
        character_size: params.character_size,
        character_set: params.character_set.map(str::to_string),
        numeric_precision: params.numeric_precision,
        numeric_scale: params.numeric_scale,
        datetime_precision: params.datetime_precision,
    }
}

#[test]
fn every_synonym_normalizes_to_its_canonical_name() {
    for dialect in [Dialect::MsSql, Dialect::MySql] {
        let catalog = DatatypeCatalog::new(dialect);
        for entry in catalog.entries() {
            for synonym in entry.synonyms {
                assert_eq!(catalog.canonical(synonym), Some(entry.name));
                assert_eq!(catalog.canonical(&synonym.to_uppercase()), Some(entry.name));
            }
        }
    }
}

#[test]
fn factory_accepts_every_synonym() {
    for dialect in [Dialect::MsSql, Dialect::MySql] {
        let catalog = DatatypeCatalog::new(dialect);
        for entry in catalog.entries() {
            for synonym in entry.synonyms {
                let result = Datatype::create(dialect, synonym, &RawColumnType::default());
                assert!(
                    result.is_ok(),
                    "{:?} factory rejected synonym {}",
                    dialect,
                    synonym
                );
            }
        }
    }
}

#[test]
fn factory_rejects_names_from_the_other_dialect_only() {
    // mediumint is MySQL-only, uniqueidentifier is SQL Server-only.
    assert!(Datatype::create(Dialect::MsSql, "mediumint", &RawColumnType::default()).is_err());
    assert!(Datatype::create(Dialect::MySql, "mediumint", &RawColumnType::default()).is_ok());
    assert!(Datatype::create(Dialect::MySql, "uniqueidentifier", &RawColumnType::default()).is_err());
    assert!(Datatype::create(Dialect::MsSql, "uniqueidentifier", &RawColumnType::default()).is_ok());
}

#[test]
fn absurd_parameters_clamp_to_a_fixed_point() {
    // Rebuilding a value from its own reported parameters must give
    // the value back: clamping is idempotent.
    let absurd = RawColumnType {
        character_size: Some(i64::MAX),
        character_set: Some("no-such-charset".to_string()),
        numeric_precision: Some(i64::MAX),
        numeric_scale: Some(i64::MAX),
        datetime_precision: Some(i64::MAX),
    };
    let negative = RawColumnType {
        character_size: Some(-999),
        character_set: Some(String::new()),
        numeric_precision: Some(-999),
        numeric_scale: Some(-999),
        datetime_precision: Some(-999),
    };

    for dialect in [Dialect::MsSql, Dialect::MySql] {
        let catalog = DatatypeCatalog::new(dialect);
        for entry in catalog.entries() {
            for raw in [&absurd, &negative, &RawColumnType::default()] {
                let built = Datatype::create(dialect, entry.name, raw).unwrap();
                let rebuilt =
                    Datatype::create(dialect, built.datatype_name(), &raw_from(&built.parameters()))
                        .unwrap();
                assert_eq!(rebuilt, built, "{:?} {} not a fixed point", dialect, entry.name);
            }
        }
    }
}

#[test]
fn render_leading_token_reparses_to_the_canonical_name() {
    // The first token of the rendered SQL resolves back to the
    // canonical name, except where rendering deliberately emits a
    // different spelling: text/blob render their size bucket, and
    // serial renders as bigint unsigned.
    for dialect in [Dialect::MsSql, Dialect::MySql] {
        let catalog = DatatypeCatalog::new(dialect);
        for entry in catalog.entries() {
            let built = Datatype::create(dialect, entry.name, &RawColumnType::default()).unwrap();
            let rendered = built.render();
            let token = rendered
                .split(['(', ' '])
                .next()
                .expect("render is never empty");
            let reparsed = catalog.canonical(token);

            match (dialect, built.datatype_name()) {
                // Defaults land text/blob in the largest bucket.
                (Dialect::MySql, "text") => assert_eq!(reparsed, Some("longtext")),
                (Dialect::MySql, "blob") => assert_eq!(reparsed, Some("longblob")),
                (Dialect::MySql, "serial") => assert_eq!(reparsed, Some("bigint")),
                (_, name) => assert_eq!(reparsed, Some(name), "render was {:?}", rendered),
            }
        }
    }
}

#[test]
fn mysql_text_small_sizes_reparse_to_their_bucket() {
    let raw = RawColumnType {
        character_size: Some(100),
        ..Default::default()
    };
    let dt = Datatype::create(Dialect::MySql, "text", &raw).unwrap();
    // Renders tinytext, which maps back to tinytext, not text.
    let token = dt.render();
    let token = token.split(' ').next().unwrap();
    assert_eq!(token, "tinytext");
    assert_eq!(DatatypeCatalog::new(Dialect::MySql).canonical(token), Some("tinytext"));
    assert_eq!(dt.datatype_name(), "text");
}

#[test]
fn parameters_ignore_fields_the_variant_does_not_consume() {
    // A datetime precision on an integer column is source noise, not
    // an error.
    let raw = RawColumnType {
        character_size: Some(12),
        datetime_precision: Some(3),
        ..Default::default()
    };
    let dt = Datatype::create(Dialect::MsSql, "bigint", &raw).unwrap();
    let params = dt.parameters();
    assert_eq!(params.datatype_name, "bigint");
    assert!(params.character_size.is_none());
    assert!(params.datetime_precision.is_none());
}

#[test]
fn dialect_metadata() {
    assert_eq!(Dialect::MsSql.id(), "MsSQL");
    assert_eq!(Dialect::MySql.id_lower(), "mysql");
    assert_eq!(Dialect::MsSql.to_string(), "Microsoft SQL Server");
    assert!(Dialect::parse("oracle").is_err());
}
