//! Dialect-specific behavior: quoting, literals, operators, pagination, hints.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::ast::{
    DatabaseOptions, IndexHint, InsertOptions, Operator, OrderBy, Row, SelectQuery, Value, row,
};
use crate::config::QueryOptions;
use crate::error::QueryError;
use crate::transpiler::{Dialect, QueryGenerator, ToSql};

#[test]
fn test_identifier_quoting() {
    assert_eq!(QueryGenerator::new(Dialect::MySQL).quote_identifier("a.b"), "`a.b`");
    assert_eq!(QueryGenerator::new(Dialect::MariaDB).quote_path("a.b"), "`a`.`b`");
    assert_eq!(QueryGenerator::new(Dialect::Postgres).quote_path("a.b"), "\"a\".\"b\"");
    assert_eq!(QueryGenerator::new(Dialect::SQLite).quote_identifier("x\"y"), "\"x\"\"y\"");
}

#[test]
fn test_mysql_string_escaping() {
    let generator = QueryGenerator::new(Dialect::MySQL);
    assert_eq!(
        generator.escape(&Value::from("a\nb\tc\\d\"e\0")).unwrap(),
        "'a\\nb\\tc\\\\d\\\"e\\0'"
    );
}

#[test]
fn test_postgres_string_escaping_strips_nul() {
    let generator = QueryGenerator::new(Dialect::Postgres);
    assert_eq!(generator.escape(&Value::from("it's\0")).unwrap(), "'it''s'");
    assert_eq!(generator.escape(&Value::from("back\\slash")).unwrap(), "'back\\slash'");
}

#[test]
fn test_binary_literals() {
    let bytes = Value::Binary(vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(
        QueryGenerator::new(Dialect::MySQL).escape(&bytes).unwrap(),
        "X'DEADBEEF'"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::SQLite).escape(&bytes).unwrap(),
        "X'DEADBEEF'"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::Postgres).escape(&bytes).unwrap(),
        "'\\xdeadbeef'"
    );
}

#[test]
fn test_date_literal_is_utc() {
    let date = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    for dialect in [Dialect::MySQL, Dialect::Postgres, Dialect::SQLite] {
        assert_eq!(
            QueryGenerator::new(dialect).escape(&Value::Date(date)).unwrap(),
            "'2020-01-02 03:04:05'"
        );
    }
}

#[test]
fn test_boolean_tokens() {
    let query = SelectQuery::new("t").filter(eq("a", true)).filter(not("b", false));
    assert_eq!(
        query.to_sql_with_dialect(Dialect::SQLite).unwrap().query,
        "SELECT * FROM \"t\" WHERE \"t\".\"a\" = 1 AND \"t\".\"b\" IS NOT 0;"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MariaDB).unwrap().query,
        "SELECT * FROM `t` WHERE `t`.`a` = true AND `t`.`b` IS NOT false;"
    );
}

#[test]
fn test_non_finite_number_is_invalid() {
    let err = QueryGenerator::new(Dialect::MySQL)
        .escape(&Value::Float(f64::INFINITY))
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidDescriptor(_)));
}

#[test]
fn test_placeholders() {
    let query = SelectQuery::new("t").filter(eq("a", 1)).filter(eq("b", 2));
    let opts = QueryOptions::bind();
    assert_eq!(
        QueryGenerator::new(Dialect::Postgres)
            .select_query(&query, &opts)
            .unwrap()
            .query,
        "SELECT * FROM \"t\" WHERE \"t\".\"a\" = $1 AND \"t\".\"b\" = $2;"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::SQLite)
            .select_query(&query, &opts)
            .unwrap()
            .query,
        "SELECT * FROM \"t\" WHERE \"t\".\"a\" = ? AND \"t\".\"b\" = ?;"
    );
}

#[test]
fn test_offset_without_limit_uses_sentinel() {
    let query = SelectQuery::new("t").offset(5);
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MySQL).unwrap().query,
        "SELECT * FROM `t` LIMIT 18446744073709551615 OFFSET 5;"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MariaDB).unwrap().query,
        "SELECT * FROM `t` LIMIT 18446744073709551615 OFFSET 5;"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::SQLite).unwrap().query,
        "SELECT * FROM \"t\" LIMIT -1 OFFSET 5;"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::Postgres).unwrap().query,
        "SELECT * FROM \"t\" LIMIT ALL OFFSET 5;"
    );
}

#[test]
fn test_zero_limit_and_offset_render_literally() {
    let query = SelectQuery::new("t").limit(0).offset(0);
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MySQL).unwrap().query,
        "SELECT * FROM `t` LIMIT 0 OFFSET 0;"
    );
}

#[test]
fn test_regexp_operators() {
    let query = SelectQuery::new("t").filter(regexp("name", "^a"));
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MySQL).unwrap().query,
        "SELECT * FROM `t` WHERE `t`.`name` REGEXP '^a';"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::Postgres).unwrap().query,
        "SELECT * FROM \"t\" WHERE \"t\".\"name\" ~ '^a';"
    );
    let err = query.to_sql_with_dialect(Dialect::SQLite).unwrap_err();
    assert!(matches!(
        err,
        QueryError::UnsupportedOperator { dialect: "sqlite", .. }
    ));

    let query = SelectQuery::new("t").filter(cond("name", Operator::NotIRegexp, "^a"));
    assert_eq!(
        query.to_sql_with_dialect(Dialect::Postgres).unwrap().query,
        "SELECT * FROM \"t\" WHERE \"t\".\"name\" !~* '^a';"
    );
    assert!(query.to_sql_with_dialect(Dialect::MySQL).is_err());
}

#[test]
fn test_ilike_is_postgres_only() {
    let query = SelectQuery::new("t").filter(cond("name", Operator::ILike, "%a%"));
    assert_eq!(
        query.to_sql_with_dialect(Dialect::Postgres).unwrap().query,
        "SELECT * FROM \"t\" WHERE \"t\".\"name\" ILIKE '%a%';"
    );
    let err = query.to_sql_with_dialect(Dialect::MySQL).unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedOperator { .. }));
}

#[test]
fn test_index_hints_mysql_family_only() {
    let query = SelectQuery::new("t")
        .index_hint(IndexHint::new("use", ["idx_a", "idx_b"]))
        .index_hint(IndexHint::new("bogus", ["x"]))
        .index_hint(IndexHint::new("FORCE", ["idx_c"]));
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MySQL).unwrap().query,
        "SELECT * FROM `t` USE INDEX (`idx_a`, `idx_b`) FORCE INDEX (`idx_c`);"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::Postgres).unwrap().query,
        "SELECT * FROM \"t\";"
    );
    assert_eq!(
        query.to_sql_with_dialect(Dialect::SQLite).unwrap().query,
        "SELECT * FROM \"t\";"
    );
}

#[test]
fn test_order_direction_quirk() {
    let query = SelectQuery::new("t")
        .order_by(OrderBy {
            expr: col("a"),
            direction: Some("asc nulls first".to_string()),
        })
        .order_by(OrderBy {
            expr: col("b"),
            direction: Some("whatever".to_string()),
        });
    assert_eq!(
        query.to_sql().unwrap().query,
        "SELECT * FROM \"t\" ORDER BY \"a\" ASC NULLS FIRST, \"b\" whatever;"
    );

    let bad = SelectQuery::new("t").order_by(OrderBy {
        expr: col("a"),
        direction: Some("DESC; DROP TABLE t".to_string()),
    });
    assert!(matches!(
        bad.to_sql().unwrap_err(),
        QueryError::InvalidDescriptor(_)
    ));
}

#[test]
fn test_between_inline_and_bound() {
    let query = SelectQuery::new("t").filter(between("age", 18, 30));
    assert_eq!(
        query.to_sql_with_dialect(Dialect::MySQL).unwrap().query,
        "SELECT * FROM `t` WHERE `t`.`age` BETWEEN 18 AND 30;"
    );
    let compiled = QueryGenerator::new(Dialect::Postgres)
        .select_query(&query, &QueryOptions::bind())
        .unwrap();
    assert_eq!(
        compiled.query,
        "SELECT * FROM \"t\" WHERE \"t\".\"age\" BETWEEN $1 AND $2;"
    );
}

#[test]
fn test_empty_insert() {
    let opts = QueryOptions::default();
    assert_eq!(
        QueryGenerator::new(Dialect::MySQL)
            .insert_query("t", &Row::new(), &InsertOptions::default(), &opts)
            .unwrap()
            .query,
        "INSERT INTO `t` () VALUES ();"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::Postgres)
            .insert_query("t", &Row::new(), &InsertOptions::default(), &opts)
            .unwrap()
            .query,
        "INSERT INTO \"t\" DEFAULT VALUES;"
    );
}

#[test]
fn test_insert_returning() {
    let options = InsertOptions {
        returning: true,
        ..Default::default()
    };
    let values = row([("a", 1)]);
    assert_eq!(
        QueryGenerator::new(Dialect::Postgres)
            .insert_query("t", &values, &options, &QueryOptions::default())
            .unwrap()
            .query,
        "INSERT INTO \"t\" (\"a\") VALUES ($1) RETURNING *;"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::SQLite)
            .insert_query("t", &values, &options, &QueryOptions::default())
            .unwrap()
            .query,
        "INSERT INTO \"t\" (\"a\") VALUES (?) RETURNING *;"
    );
    let err = QueryGenerator::new(Dialect::MySQL)
        .insert_query("t", &values, &options, &QueryOptions::default())
        .unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedFeature { .. }));
}

#[test]
fn test_truncate() {
    assert_eq!(
        QueryGenerator::new(Dialect::MySQL).truncate_table_query("t"),
        "TRUNCATE `t`;"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::Postgres).truncate_table_query("t"),
        "TRUNCATE \"t\";"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::SQLite).truncate_table_query("t"),
        "DELETE FROM \"t\";"
    );
}

#[test]
fn test_create_and_drop_database() {
    let options = DatabaseOptions {
        charset: Some("utf8mb4".into()),
        collate: Some("utf8mb4_bin".into()),
        ..Default::default()
    };
    assert_eq!(
        QueryGenerator::new(Dialect::MySQL)
            .create_database_query("app", &options)
            .unwrap(),
        "CREATE DATABASE IF NOT EXISTS `app` DEFAULT CHARACTER SET 'utf8mb4' DEFAULT COLLATE 'utf8mb4_bin';"
    );
    assert_eq!(
        QueryGenerator::new(Dialect::MariaDB)
            .drop_database_query("app", &DatabaseOptions::default())
            .unwrap(),
        "DROP DATABASE IF EXISTS `app`;"
    );

    let pg = QueryGenerator::new(Dialect::Postgres);
    let err = pg
        .create_database_query("app", &DatabaseOptions::default())
        .unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedFeature { .. }));
    let options = DatabaseOptions {
        guard: false,
        charset: Some("UTF8".into()),
        collate: None,
    };
    assert_eq!(
        pg.create_database_query("app", &options).unwrap(),
        "CREATE DATABASE \"app\" ENCODING = 'UTF8';"
    );
    assert_eq!(
        pg.drop_database_query("app", &DatabaseOptions::default())
            .unwrap(),
        "DROP DATABASE IF EXISTS \"app\";"
    );

    let sqlite = QueryGenerator::new(Dialect::SQLite);
    assert!(sqlite
        .create_database_query("app", &DatabaseOptions::default())
        .is_err());
    assert!(sqlite
        .drop_database_query("app", &DatabaseOptions::default())
        .is_err());
}
