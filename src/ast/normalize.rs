//! JSON input normalization.
//!
//! Query descriptors arrive from the model layer as loosely shaped JSON:
//! hash-shaped predicates (`{"a": 1, "b": {"gt": 2}}`), arrays of predicates,
//! and explicit combinators (`{"$or": [...]}`). Everything is lowered here into
//! the typed AST so the compilers only ever see one representation.
//!
//! Expression forms accepted wherever a value is expected:
//! - `{"$col": "name"}` or `{"$col": "table.name"}`: column reference
//! - `{"$fn": "LOWER", "args": [...]}`: function call
//! - `{"$date": "2020-01-01T00:00:00Z"}`: timestamp literal
//! - `{"$binary": "DEADBEEF"}`: binary literal from hex
//! - any other scalar or array: literal

use chrono::{DateTime, Utc};
use serde_json::{Map, Value as Json};

use crate::ast::{
    Attribute, Expr, IndexHint, LogicalOp, Operator, OrderBy, Predicate, Row, SelectQuery,
    TableMeta, Value,
};
use crate::error::{QueryError, QueryResult};

const ANY_DIALECT: &str = "any dialect";

/// Normalize a WHERE/HAVING predicate. Empty objects, empty arrays and `null`
/// yield `None`.
pub fn predicate_from_json(json: &Json) -> QueryResult<Option<Predicate>> {
    match json {
        Json::Null => Ok(None),
        Json::Object(map) => hash_predicate(map),
        Json::Array(items) => combine(LogicalOp::And, predicate_list(items)?),
        other => Err(QueryError::invalid(format!(
            "predicate must be an object or an array, got {}",
            other
        ))),
    }
}

/// Normalize a full SELECT descriptor.
pub fn select_from_json(json: &Json) -> QueryResult<SelectQuery> {
    let map = json
        .as_object()
        .ok_or_else(|| QueryError::invalid("select descriptor must be an object"))?;

    let table = match map.get("table") {
        Some(Json::String(name)) => TableMeta::new(name.as_str()),
        Some(obj @ Json::Object(_)) => serde_json::from_value(obj.clone())
            .map_err(|e| QueryError::invalid(format!("table: {}", e)))?,
        _ => return Err(QueryError::invalid("select descriptor requires a table")),
    };

    let mut query = SelectQuery {
        table,
        ..Default::default()
    };

    if let Some(attrs) = map.get("attributes") {
        let items = attrs
            .as_array()
            .ok_or_else(|| QueryError::invalid("attributes must be an array"))?;
        for item in items {
            query.attributes.push(attribute_from_json(item)?);
        }
    }

    if let Some(w) = map.get("where") {
        query.where_clause = predicate_from_json(w)?;
    }
    if let Some(h) = map.get("having") {
        query.having = predicate_from_json(h)?;
    }

    match map.get("group") {
        None | Some(Json::Null) => {}
        // A single key is a one-element list
        Some(Json::String(name)) => query.group.push(column_ref(name)),
        Some(Json::Array(items)) => {
            for item in items {
                query.group.push(match item {
                    Json::String(name) => column_ref(name),
                    other => expr_from_json(other)?,
                });
            }
        }
        Some(other) => query.group.push(expr_from_json(other)?),
    }

    match map.get("order") {
        None | Some(Json::Null) => {}
        Some(Json::Array(items)) => {
            for item in items {
                query.order.push(order_from_json(item)?);
            }
        }
        Some(single) => query.order.push(order_from_json(single)?),
    }

    query.limit = pagination(map, "limit")?;
    query.offset = pagination(map, "offset")?;

    if let Some(hints) = map.get("indexHints") {
        let items = hints
            .as_array()
            .ok_or_else(|| QueryError::invalid("indexHints must be an array"))?;
        for hint in items {
            if let Some(hint) = index_hint_from_json(hint) {
                query.index_hints.push(hint);
            }
        }
    }

    query.nested_json = map.get("json").and_then(Json::as_bool).unwrap_or(false);
    Ok(query)
}

/// Normalize one row of column values for INSERT/UPDATE.
pub fn row_from_json(json: &Json) -> QueryResult<Row> {
    let map = json
        .as_object()
        .ok_or_else(|| QueryError::invalid("row must be an object"))?;
    map.iter()
        .map(|(k, v)| -> QueryResult<(String, Option<Expr>)> {
            Ok((k.clone(), Some(expr_from_json(v)?)))
        })
        .collect()
}

/// Normalize a value position into an expression.
pub fn expr_from_json(json: &Json) -> QueryResult<Expr> {
    if let Json::Object(map) = json {
        if let Some(name) = map.get("$col").and_then(Json::as_str) {
            return Ok(column_ref(name));
        }
        if let Some(name) = map.get("$fn").and_then(Json::as_str) {
            let args = match map.get("args") {
                None => vec![],
                Some(Json::Array(items)) => items
                    .iter()
                    .map(expr_from_json)
                    .collect::<QueryResult<Vec<_>>>()?,
                Some(single) => vec![expr_from_json(single)?],
            };
            return Ok(Expr::FunctionCall {
                name: name.to_string(),
                args,
            });
        }
    }
    Ok(Expr::Literal(value_from_json(json)?))
}

/// Normalize a literal.
pub fn value_from_json(json: &Json) -> QueryResult<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::Int(i),
            (None, Some(_)) => {
                return Err(QueryError::invalid(format!(
                    "integer {} does not fit a signed 64-bit value",
                    n
                )));
            }
            (None, None) => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::Array(
            items
                .iter()
                .map(value_from_json)
                .collect::<QueryResult<Vec<_>>>()?,
        ),
        Json::Object(map) => {
            if let Some(s) = map.get("$date").and_then(Json::as_str) {
                let parsed = DateTime::parse_from_rfc3339(s)
                    .map_err(|e| QueryError::invalid(format!("invalid $date '{}': {}", s, e)))?;
                Value::Date(parsed.with_timezone(&Utc))
            } else if let Some(s) = map.get("$binary").and_then(Json::as_str) {
                Value::Binary(decode_hex(s)?)
            } else {
                return Err(QueryError::invalid(format!(
                    "unsupported literal object {}",
                    json
                )));
            }
        }
    })
}

fn column_ref(name: &str) -> Expr {
    Expr::column(name)
}

fn hash_predicate(map: &Map<String, Json>) -> QueryResult<Option<Predicate>> {
    let mut children = Vec::new();

    if let Some(call) = map.get("$raw") {
        let call = expr_from_json(call)?;
        for (key, value) in map.iter().filter(|(k, _)| k.as_str() != "$raw") {
            let op = operator(key)?;
            children.push(Predicate::Raw {
                call: call.clone(),
                op,
                value: operand(op, value)?,
            });
        }
        if children.is_empty() {
            return Err(QueryError::invalid("$raw predicate requires an operator"));
        }
        return combine(LogicalOp::And, children);
    }

    for (key, value) in map {
        let child = match key.as_str() {
            "$and" | "and" => combinator(LogicalOp::And, value)?,
            "$or" | "or" => combinator(LogicalOp::Or, value)?,
            column => column_predicate(column, value)?,
        };
        if let Some(child) = child {
            children.push(child);
        }
    }
    combine(LogicalOp::And, children)
}

fn combinator(op: LogicalOp, json: &Json) -> QueryResult<Option<Predicate>> {
    match json {
        Json::Array(items) => combine(op, predicate_list(items)?),
        Json::Object(map) => {
            // `{"$or": {"a": 1, "b": 2}}` ORs each key
            let mut children = Vec::new();
            for (key, value) in map {
                let mut single = Map::new();
                single.insert(key.clone(), value.clone());
                if let Some(child) = hash_predicate(&single)? {
                    children.push(child);
                }
            }
            combine(op, children)
        }
        Json::Null => Ok(None),
        other => Err(QueryError::invalid(format!(
            "combinator expects an array or object, got {}",
            other
        ))),
    }
}

fn predicate_list(items: &[Json]) -> QueryResult<Vec<Predicate>> {
    let mut out = Vec::new();
    for item in items {
        if let Some(p) = predicate_from_json(item)? {
            out.push(p);
        }
    }
    Ok(out)
}

fn column_predicate(column: &str, json: &Json) -> QueryResult<Option<Predicate>> {
    let left = column_ref(column);
    match json {
        Json::Array(items) => Ok(Some(Predicate::InList {
            left,
            values: items
                .iter()
                .map(value_from_json)
                .collect::<QueryResult<Vec<_>>>()?,
            negated: false,
        })),
        Json::Object(map) if !is_expression(map) => {
            let mut children = Vec::new();
            for (key, value) in map {
                let op = operator(key)?;
                children.push(Predicate::Comparison {
                    left: left.clone(),
                    op,
                    value: operand(op, value)?,
                });
            }
            combine(LogicalOp::And, children)
        }
        other => Ok(Some(Predicate::Comparison {
            left,
            op: Operator::Eq,
            value: expr_from_json(other)?,
        })),
    }
}

fn is_expression(map: &Map<String, Json>) -> bool {
    ["$col", "$fn", "$date", "$binary"]
        .iter()
        .any(|k| map.contains_key(*k))
}

fn operator(tag: &str) -> QueryResult<Operator> {
    Operator::from_tag(tag).ok_or_else(|| QueryError::operator(tag, ANY_DIALECT))
}

fn operand(op: Operator, json: &Json) -> QueryResult<Expr> {
    if op.takes_list() && !json.is_array() {
        return Err(QueryError::invalid(format!(
            "operator '{}' expects an array",
            op
        )));
    }
    expr_from_json(json)
}

/// Collapse a child list: none → `None`, one → the child, more → combinator.
fn combine(op: LogicalOp, mut children: Vec<Predicate>) -> QueryResult<Option<Predicate>> {
    Ok(match children.len() {
        0 => None,
        1 => children.pop(),
        _ => Some(Predicate::Logical { op, children }),
    })
}

fn attribute_from_json(json: &Json) -> QueryResult<Attribute> {
    match json {
        Json::String(s) if s == "*" => Ok(Attribute::Star),
        Json::String(s) => Ok(Attribute::Expr(column_ref(s))),
        Json::Array(pair) => match pair.as_slice() {
            [expr, Json::String(alias)] => {
                let expr = match expr {
                    Json::String(s) => column_ref(s),
                    other => expr_from_json(other)?,
                };
                Ok(Attribute::Aliased(expr, alias.clone()))
            }
            _ => Err(QueryError::invalid(
                "aliased attribute must be [expression, alias]",
            )),
        },
        other => Ok(Attribute::Expr(expr_from_json(other)?)),
    }
}

fn order_from_json(json: &Json) -> QueryResult<OrderBy> {
    match json {
        Json::String(s) => Ok(OrderBy {
            expr: column_ref(s),
            direction: None,
        }),
        Json::Array(pair) => {
            let (expr, direction) = match pair.as_slice() {
                [expr] => (expr, None),
                [expr, Json::String(dir)] => (expr, Some(dir.clone())),
                _ => {
                    return Err(QueryError::invalid(
                        "order entry must be [expression, direction]",
                    ))
                }
            };
            let expr = match expr {
                Json::String(s) => column_ref(s),
                other => expr_from_json(other)?,
            };
            Ok(OrderBy { expr, direction })
        }
        other => Ok(OrderBy {
            expr: expr_from_json(other)?,
            direction: None,
        }),
    }
}

fn pagination(map: &Map<String, Json>, key: &str) -> QueryResult<Option<u64>> {
    match map.get(key) {
        None | Some(Json::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            QueryError::invalid(format!("{} must be a non-negative integer, got {}", key, v))
        }),
    }
}

/// Malformed hints are dropped rather than failing the query.
fn index_hint_from_json(json: &Json) -> Option<IndexHint> {
    let map = json.as_object()?;
    let kind = map.get("type")?.as_str()?;
    let values = map
        .get("values")?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    Some(IndexHint {
        kind: kind.to_string(),
        values,
    })
}

fn decode_hex(s: &str) -> QueryResult<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(QueryError::invalid(format!("odd-length hex string '{}'", s)));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            s.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| QueryError::invalid(format!("invalid hex string '{}'", s)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_shapes_are_none() {
        assert_eq!(predicate_from_json(&json!({})).unwrap(), None);
        assert_eq!(predicate_from_json(&json!([])).unwrap(), None);
        assert_eq!(predicate_from_json(&Json::Null).unwrap(), None);
        assert_eq!(predicate_from_json(&json!({"$or": []})).unwrap(), None);
    }

    #[test]
    fn test_single_key_is_not_wrapped() {
        let p = predicate_from_json(&json!({"id": 1})).unwrap().unwrap();
        assert_eq!(
            p,
            Predicate::Comparison {
                left: Expr::column("id"),
                op: Operator::Eq,
                value: Expr::Literal(Value::Int(1)),
            }
        );
    }

    #[test]
    fn test_hash_with_many_keys_is_and() {
        let p = predicate_from_json(&json!({"a": 1, "b": {"gt": 2, "lt": 5}}))
            .unwrap()
            .unwrap();
        match p {
            Predicate::Logical { op, children } => {
                assert_eq!(op, LogicalOp::And);
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], Predicate::Logical { .. }));
            }
            other => panic!("expected AND, got {:?}", other),
        }
    }

    #[test]
    fn test_array_value_is_in_list() {
        let p = predicate_from_json(&json!({"id": [1, 2]})).unwrap().unwrap();
        assert!(matches!(p, Predicate::InList { negated: false, .. }));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = predicate_from_json(&json!({"id": {"almost": 1}})).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_raw_function_predicate() {
        let p = predicate_from_json(&json!({
            "$raw": {"$fn": "LOWER", "args": [{"$col": "name"}]},
            "eq": "bob"
        }))
        .unwrap()
        .unwrap();
        assert!(matches!(p, Predicate::Raw { op: Operator::Eq, .. }));
    }

    #[test]
    fn test_select_descriptor() {
        let q = select_from_json(&json!({
            "table": "myTable",
            "attributes": ["id", ["name", "n"]],
            "group": "name",
            "order": [["id", "DESC"], "name"],
            "limit": 0,
            "offset": 2,
            "indexHints": [{"type": "FORCE", "values": ["idx"]}, {"bogus": true}],
            "json": true
        }))
        .unwrap();
        assert_eq!(q.table.name, "myTable");
        assert_eq!(q.attributes.len(), 2);
        assert_eq!(q.group, vec![Expr::column("name")]);
        assert_eq!(q.order.len(), 2);
        assert_eq!(q.order[0].direction.as_deref(), Some("DESC"));
        assert_eq!(q.limit, Some(0));
        assert_eq!(q.offset, Some(2));
        assert_eq!(q.index_hints.len(), 1);
        assert!(q.nested_json);
    }

    #[test]
    fn test_negative_limit_is_invalid() {
        let err = select_from_json(&json!({"table": "t", "limit": -1})).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDescriptor(_)));
        let err = select_from_json(&json!({"table": "t", "offset": 1.5})).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_integer_out_of_range_rejected() {
        let err = value_from_json(&json!(18446744073709551615u64)).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDescriptor(_)));
        assert_eq!(value_from_json(&json!(i64::MAX)).unwrap(), Value::Int(i64::MAX));
        assert_eq!(value_from_json(&json!(-2.5)).unwrap(), Value::Float(-2.5));
    }

    #[test]
    fn test_special_literals() {
        let v = value_from_json(&json!({"$binary": "00ff"})).unwrap();
        assert_eq!(v, Value::Binary(vec![0x00, 0xff]));
        let v = value_from_json(&json!({"$date": "2020-01-02T03:04:05Z"})).unwrap();
        assert!(matches!(v, Value::Date(_)));
    }
}
