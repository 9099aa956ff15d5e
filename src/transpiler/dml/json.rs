//! Nested-JSON rewrite: wrap a base SELECT so the whole result comes back
//! as one JSON array in a single `root` column.

use crate::ast::{Attribute, TableMeta, Value};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::traits::SqlGenerator;

const ROOT: &str = "root";
const BASE_ALIAS: &str = "_0_root.base";
const ROOT_ALIAS: &str = "_1_root";

/// `base_sql` must not carry the trailing `;`.
pub fn build_nested_json(
    generator: &dyn SqlGenerator,
    base_sql: &str,
    table: &TableMeta,
    attributes: &[Attribute],
) -> QueryResult<String> {
    let base = generator.quote_identifier(BASE_ALIAS);
    let root = generator.quote_identifier(ROOT);

    let whole_row =
        attributes.is_empty() || attributes.iter().any(|a| matches!(a, Attribute::Star));
    let object = if whole_row {
        format!("{}({})", generator.json_row_function(), base)
    } else {
        let mut members = Vec::with_capacity(attributes.len());
        for attr in attributes {
            let key = attr.output_name(table).ok_or_else(|| {
                QueryError::invalid("nested JSON needs an alias for every computed attribute")
            })?;
            members.push(format!(
                "{}, (SELECT {}.{})",
                generator.escape_literal(&Value::String(key.to_string()))?,
                base,
                generator.quote_identifier(key)
            ));
        }
        format!("{}({})", generator.json_object_function(), members.join(", "))
    };

    Ok(format!(
        "SELECT COALESCE({}({}), {}) AS {} FROM (SELECT {} AS {} FROM ({}) AS {}) AS {}",
        generator.json_array_aggregate(),
        root,
        generator.empty_json_array(),
        root,
        object,
        root,
        base_sql,
        base,
        generator.quote_identifier(ROOT_ALIAS)
    ))
}
