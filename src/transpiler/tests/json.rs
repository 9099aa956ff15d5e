//! Nested-JSON rewrite tests.

use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::ast::SelectQuery;
use crate::config::QueryOptions;
use crate::error::QueryError;
use crate::transpiler::{Dialect, QueryGenerator, ToSql};

#[test]
fn test_nested_json_shape() {
    let query = SelectQuery::new("users")
        .column("id")
        .aliased(col("name"), "n")
        .filter(eq("id", 1))
        .nested_json();
    assert_eq!(
        query.to_sql_with_dialect(Dialect::Postgres).unwrap().query,
        "SELECT COALESCE(JSON_AGG(\"root\"), '[]') AS \"root\" FROM \
         (SELECT JSON_BUILD_OBJECT('id', (SELECT \"_0_root.base\".\"id\"), \
         'n', (SELECT \"_0_root.base\".\"n\")) AS \"root\" FROM \
         (SELECT \"id\", \"name\" AS \"n\" FROM \"users\" WHERE \"users\".\"id\" = 1) \
         AS \"_0_root.base\") AS \"_1_root\";"
    );
}

#[test]
fn test_nested_json_star_uses_row_to_json() {
    let query = SelectQuery::new("users").limit(2).nested_json();
    assert_eq!(
        query.to_sql().unwrap().query,
        "SELECT COALESCE(JSON_AGG(\"root\"), '[]') AS \"root\" FROM \
         (SELECT ROW_TO_JSON(\"_0_root.base\") AS \"root\" FROM \
         (SELECT * FROM \"users\" LIMIT 2) AS \"_0_root.base\") AS \"_1_root\";"
    );
}

#[test]
fn test_nested_json_uses_result_column_names() {
    let query = SelectQuery::new("users")
        .declare(["meta.key"])
        .column("users.id")
        .column("meta.key")
        .nested_json();
    assert_eq!(
        query.to_sql().unwrap().query,
        "SELECT COALESCE(JSON_AGG(\"root\"), '[]') AS \"root\" FROM \
         (SELECT JSON_BUILD_OBJECT('id', (SELECT \"_0_root.base\".\"id\"), \
         'meta.key', (SELECT \"_0_root.base\".\"meta.key\")) AS \"root\" FROM \
         (SELECT \"users\".\"id\", \"meta.key\" FROM \"users\") \
         AS \"_0_root.base\") AS \"_1_root\";"
    );
}

#[test]
fn test_nested_json_keeps_binds() {
    let query = SelectQuery::new("users")
        .column("id")
        .filter(eq("name", "bob"))
        .nested_json();
    let compiled = QueryGenerator::new(Dialect::Postgres)
        .select_query(&query, &QueryOptions::bind())
        .unwrap();
    assert!(compiled.query.contains("WHERE \"users\".\"name\" = $1) AS \"_0_root.base\""));
    assert_eq!(compiled.bind.len(), 1);
}

#[test]
fn test_nested_json_ignored_without_support() {
    let query = SelectQuery::new("users").column("id").nested_json();
    for dialect in [Dialect::MySQL, Dialect::MariaDB, Dialect::SQLite] {
        let plain = SelectQuery::new("users").column("id");
        assert_eq!(
            query.to_sql_with_dialect(dialect).unwrap(),
            plain.to_sql_with_dialect(dialect).unwrap()
        );
    }
}

#[test]
fn test_nested_json_requires_alias_for_functions() {
    let query = SelectQuery::new("users")
        .attribute(crate::ast::Attribute::Expr(func("COUNT", [col("id")])))
        .nested_json();
    assert!(matches!(
        query.to_sql().unwrap_err(),
        QueryError::InvalidDescriptor(_)
    ));
}
