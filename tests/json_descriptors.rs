use pretty_assertions::assert_eq;
use serde_json::json;

use querygen::ast::normalize::{predicate_from_json, row_from_json, select_from_json};
use querygen::prelude::*;

fn select(dialect: Dialect, descriptor: serde_json::Value) -> QueryResult<CompiledQuery> {
    let query = select_from_json(&descriptor)?;
    QueryGenerator::new(dialect).select_query(&query, &QueryOptions::default())
}

#[test]
fn test_hash_predicate_with_many_keys() {
    let compiled = select(
        Dialect::MySQL,
        json!({
            "table": "users",
            "attributes": ["id", ["name", "n"]],
            "where": { "active": true, "age": { "gte": 18 } },
            "order": [["id", "DESC"]],
            "limit": 10
        }),
    )
    .unwrap();
    assert_eq!(
        compiled.query,
        "SELECT `id`, `name` AS `n` FROM `users` WHERE `users`.`active` = true \
         AND `users`.`age` >= 18 ORDER BY `id` DESC LIMIT 10;"
    );
}

#[test]
fn test_combinators_nest_with_parentheses() {
    let compiled = select(
        Dialect::Postgres,
        json!({
            "table": { "name": "t", "alias": "x" },
            "where": {
                "$or": [{ "a": 1 }, { "b": { "in": [1, 2] } }],
                "c": null
            }
        }),
    )
    .unwrap();
    assert_eq!(
        compiled.query,
        "SELECT * FROM \"t\" AS \"x\" WHERE (\"x\".\"a\" = 1 OR \"x\".\"b\" IN (1, 2)) \
         AND \"x\".\"c\" IS NULL;"
    );
}

#[test]
fn test_empty_where_shapes_are_omitted() {
    for empty in [json!({}), json!([]), json!(null), json!({ "$or": [] })] {
        let compiled = select(Dialect::SQLite, json!({ "table": "t", "where": empty })).unwrap();
        assert_eq!(compiled.query, "SELECT * FROM \"t\";");
    }
}

#[test]
fn test_empty_not_in_widens_or_group() {
    let compiled = select(
        Dialect::MySQL,
        json!({ "table": "t", "where": { "$or": [{ "a": 1 }, { "b": { "notIn": [] } }] } }),
    )
    .unwrap();
    assert_eq!(compiled.query, "SELECT * FROM `t`;");

    let compiled = select(
        Dialect::MySQL,
        json!({ "table": "t", "where": { "$and": [{ "a": 1 }, { "b": { "notIn": [] } }] } }),
    )
    .unwrap();
    assert_eq!(compiled.query, "SELECT * FROM `t` WHERE `t`.`a` = 1;");
}

#[test]
fn test_unsigned_overflow_is_rejected() {
    let err = select(
        Dialect::MySQL,
        json!({ "table": "t", "where": { "id": 18446744073709551615u64 } }),
    )
    .unwrap_err();
    assert!(matches!(err, QueryError::InvalidDescriptor(_)));
}

#[test]
fn test_raw_function_predicate() {
    let compiled = select(
        Dialect::MySQL,
        json!({
            "table": "t",
            "where": { "$raw": { "$fn": "LOWER", "args": [{ "$col": "name" }] }, "eq": "bob" }
        }),
    )
    .unwrap();
    assert_eq!(
        compiled.query,
        "SELECT * FROM `t` WHERE LOWER(`t`.`name`) = 'bob';"
    );
}

#[test]
fn test_group_and_having() {
    let compiled = select(
        Dialect::Postgres,
        json!({
            "table": "orders",
            "attributes": ["status", [{ "$fn": "COUNT", "args": [{ "$col": "*" }] }, "total"]],
            "group": "status",
            "having": { "$raw": { "$fn": "COUNT", "args": [{ "$col": "*" }] }, "gt": 3 }
        }),
    )
    .unwrap();
    assert_eq!(
        compiled.query,
        "SELECT \"status\", COUNT(*) AS \"total\" FROM \"orders\" GROUP BY \"status\" \
         HAVING COUNT(*) > 3;"
    );
}

#[test]
fn test_index_hints_from_json() {
    let descriptor = json!({
        "table": "t",
        "indexHints": [
            { "type": "USE", "values": ["idx"] },
            { "type": "nope", "values": ["x"] },
            { "bad": 1 }
        ]
    });
    assert_eq!(
        select(Dialect::MySQL, descriptor.clone()).unwrap().query,
        "SELECT * FROM `t` USE INDEX (`idx`);"
    );
    assert_eq!(
        select(Dialect::Postgres, descriptor).unwrap().query,
        "SELECT * FROM \"t\";"
    );
}

#[test]
fn test_offset_only() {
    assert_eq!(
        select(Dialect::SQLite, json!({ "table": "t", "offset": 5 }))
            .unwrap()
            .query,
        "SELECT * FROM \"t\" LIMIT -1 OFFSET 5;"
    );
    assert!(matches!(
        select(Dialect::SQLite, json!({ "table": "t", "limit": -1 })).unwrap_err(),
        QueryError::InvalidDescriptor(_)
    ));
}

#[test]
fn test_unknown_operator_is_rejected() {
    let err = predicate_from_json(&json!({ "a": { "$foo": 1 } })).unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedOperator { .. }));
}

#[test]
fn test_nested_json_flag() {
    let compiled = select(
        Dialect::Postgres,
        json!({ "table": "users", "attributes": ["id"], "json": true }),
    )
    .unwrap();
    assert!(compiled
        .query
        .starts_with("SELECT COALESCE(JSON_AGG(\"root\"), '[]') AS \"root\" FROM (SELECT JSON_BUILD_OBJECT('id'"));
    assert!(compiled.query.ends_with(") AS \"_1_root\";"));
}

#[test]
fn test_rows_from_json() {
    let rows = vec![
        row_from_json(&json!({ "name": "bob", "born": { "$date": "2000-01-01T00:00:00Z" } }))
            .unwrap(),
        row_from_json(&json!({ "name": "it's", "avatar": { "$binary": "CAFE" } })).unwrap(),
    ];
    assert_eq!(
        QueryGenerator::new(Dialect::MySQL)
            .bulk_insert_query("people", &rows, &InsertOptions::default())
            .unwrap(),
        "INSERT INTO `people` (`name`, `born`, `avatar`) VALUES \
         ('bob', '2000-01-01 00:00:00', NULL), ('it\\'s', NULL, X'CAFE');"
    );

    let compiled = QueryGenerator::new(Dialect::Postgres)
        .insert_query("people", &rows[0], &InsertOptions::default(), &QueryOptions::default())
        .unwrap();
    assert_eq!(
        compiled.query,
        "INSERT INTO \"people\" (\"name\", \"born\") VALUES ($1, $2);"
    );
    assert!(matches!(compiled.bind["2"], Value::Date(_)));
}

#[test]
fn test_config_file_drives_generator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("querygen.toml");
    std::fs::write(&path, "dialect = \"postgres\"\nbind_parameters = true\n").unwrap();

    let generator = QueryGenerator::with_config(GeneratorConfig::from_file(&path).unwrap());
    let query = select_from_json(&json!({ "table": "t", "where": { "a": 1 } })).unwrap();
    let compiled = generator.select_query(&query, &QueryOptions::default()).unwrap();
    assert_eq!(compiled.query, "SELECT * FROM \"t\" WHERE \"t\".\"a\" = $1;");
    assert_eq!(compiled.bind["1"], Value::Int(1));
}
