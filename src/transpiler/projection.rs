//! Expressions, projection lists, GROUP BY and ORDER BY.

use crate::ast::{Attribute, Expr, OrderBy};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::params::CompileContext;
use crate::transpiler::traits::plain_word;

const DIRECTIONS: &[&str] = &[
    "ASC",
    "DESC",
    "ASC NULLS FIRST",
    "ASC NULLS LAST",
    "DESC NULLS FIRST",
    "DESC NULLS LAST",
    "NULLS FIRST",
    "NULLS LAST",
];

/// Compile an expression node to SQL.
pub fn compile_expr(ctx: &mut CompileContext<'_>, expr: &Expr) -> QueryResult<String> {
    match expr {
        Expr::Column { name, table } => Ok(compile_column(ctx, name, table.as_deref())),
        Expr::FunctionCall { name, args } => {
            let name = plain_word("function name", name)?;
            let args = args
                .iter()
                .map(|arg| compile_expr(ctx, arg))
                .collect::<QueryResult<Vec<_>>>()?;
            Ok(format!("{}({})", name, args.join(", ")))
        }
        Expr::Literal(value) => ctx.literal(value),
        Expr::Raw(sql) => Ok(sql.clone()),
    }
}

/// Resolve a column reference.
///
/// Declared attributes are single identifiers even when dotted; other dotted
/// names are treated as `table.column`. With `ctx.qualify` set, unqualified
/// names get the table qualifier.
fn compile_column(ctx: &CompileContext<'_>, name: &str, table: Option<&str>) -> String {
    let generator = ctx.generator;
    if name == "*" {
        return match table {
            Some(t) => format!("{}.*", generator.quote_path(t)),
            None => "*".to_string(),
        };
    }
    if let Some(t) = table {
        return format!("{}.{}", generator.quote_path(t), generator.quote_identifier(name));
    }

    let declared = ctx.table.is_some_and(|meta| meta.declares(name));
    if !declared && name.contains('.') {
        return generator.quote_path(name);
    }
    let column = generator.quote_identifier(name);
    match ctx.table {
        Some(meta) if ctx.qualify => {
            let qualifier = match &meta.alias {
                Some(alias) => generator.quote_identifier(alias),
                None => generator.quote_path(&meta.name),
            };
            format!("{}.{}", qualifier, column)
        }
        _ => column,
    }
}

/// Projection list; empty means `*`.
pub fn compile_attributes(
    ctx: &mut CompileContext<'_>,
    attributes: &[Attribute],
) -> QueryResult<String> {
    if attributes.is_empty() {
        return Ok("*".to_string());
    }
    let mut parts = Vec::with_capacity(attributes.len());
    for attr in attributes {
        let sql = match attr {
            Attribute::Star => "*".to_string(),
            Attribute::Expr(expr) => compile_expr(ctx, expr)?,
            Attribute::Aliased(expr, alias) => {
                format!("{} AS {}", compile_expr(ctx, expr)?, ctx.quote(alias))
            }
        };
        parts.push(sql);
    }
    Ok(parts.join(", "))
}

pub fn compile_group(ctx: &mut CompileContext<'_>, group: &[Expr]) -> QueryResult<Option<String>> {
    if group.is_empty() {
        return Ok(None);
    }
    let parts = group
        .iter()
        .map(|e| compile_expr(ctx, e))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(Some(parts.join(", ")))
}

pub fn compile_order(ctx: &mut CompileContext<'_>, order: &[OrderBy]) -> QueryResult<Option<String>> {
    if order.is_empty() {
        return Ok(None);
    }
    let mut parts = Vec::with_capacity(order.len());
    for entry in order {
        let mut sql = compile_expr(ctx, &entry.expr)?;
        if let Some(direction) = &entry.direction {
            sql.push(' ');
            sql.push_str(&normalize_direction(direction)?);
        }
        parts.push(sql);
    }
    Ok(Some(parts.join(", ")))
}

/// Canonical directions are uppercased. Other plain word tokens pass
/// through unchanged for compatibility with existing callers.
pub fn normalize_direction(direction: &str) -> QueryResult<String> {
    let trimmed = direction.trim();
    let upper = trimmed.to_ascii_uppercase();
    let collapsed = upper.split_whitespace().collect::<Vec<_>>().join(" ");
    if DIRECTIONS.contains(&collapsed.as_str()) {
        return Ok(collapsed);
    }
    let plain = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ' ');
    if plain {
        Ok(trimmed.to_string())
    } else {
        Err(QueryError::invalid(format!(
            "invalid ORDER BY direction '{}'",
            direction
        )))
    }
}
