//! Operator resolution: abstract operator + right-hand side to a SQL fragment.

use crate::ast::{ArithmeticOp, Expr, Operator, Value};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::params::CompileContext;
use crate::transpiler::projection::compile_expr;

/// Render `left <op> value`. `None` means the comparison matches everything
/// and the caller drops it (empty NOT IN).
pub fn resolve_comparison(
    ctx: &mut CompileContext<'_>,
    left: &str,
    op: Operator,
    value: &Expr,
) -> QueryResult<Option<String>> {
    let symbol = ctx
        .generator
        .operator_sql(op)
        .ok_or_else(|| QueryError::operator(op.tag(), ctx.generator.name()))?;

    match (op, value.as_literal()) {
        (Operator::Eq | Operator::Is, Some(Value::Null)) => Ok(Some(format!("{} IS NULL", left))),
        (Operator::Ne | Operator::Not, Some(Value::Null)) => {
            Ok(Some(format!("{} IS NOT NULL", left)))
        }
        (Operator::Is, Some(Value::Bool(b))) => Ok(Some(format!(
            "{} IS {}",
            left,
            ctx.generator.bool_literal(*b)
        ))),
        (Operator::Not, Some(Value::Bool(b))) => Ok(Some(format!(
            "{} IS NOT {}",
            left,
            ctx.generator.bool_literal(*b)
        ))),
        (Operator::Is, _) => Err(QueryError::invalid(format!(
            "'is' on {} accepts only null or a boolean",
            left
        ))),
        (Operator::In | Operator::NotIn, Some(Value::Array(items))) => {
            in_list(ctx, left, items, op == Operator::NotIn)
        }
        (Operator::In | Operator::NotIn, _) => Err(QueryError::invalid(format!(
            "'{}' on {} requires a list",
            op.tag(),
            left
        ))),
        (Operator::Between | Operator::NotBetween, Some(Value::Array(items))) => {
            let [low, high] = items.as_slice() else {
                return Err(QueryError::invalid(format!(
                    "'{}' on {} requires exactly two values",
                    op.tag(),
                    left
                )));
            };
            let low = ctx.literal(low)?;
            let high = ctx.literal(high)?;
            Ok(Some(format!("{} {} {} AND {}", left, symbol, low, high)))
        }
        (Operator::Between | Operator::NotBetween, _) => Err(QueryError::invalid(format!(
            "'{}' on {} requires a two-element list",
            op.tag(),
            left
        ))),
        _ => {
            let right = compile_expr(ctx, value)?;
            Ok(Some(format!("{} {} {}", left, symbol, right)))
        }
    }
}

/// `left [NOT] IN (...)`. An empty IN matches nothing, an empty NOT IN
/// matches everything.
pub fn in_list(
    ctx: &mut CompileContext<'_>,
    left: &str,
    items: &[Value],
    negated: bool,
) -> QueryResult<Option<String>> {
    let keyword = if negated { "NOT IN" } else { "IN" };
    if items.is_empty() {
        return Ok(if negated {
            None
        } else {
            Some(format!("{} IN (NULL)", left))
        });
    }
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        parts.push(ctx.literal(item)?);
    }
    Ok(Some(format!("{} {} ({})", left, keyword, parts.join(", "))))
}

/// `col = col + v` / `col = col - v`. The value is always inline.
pub fn arithmetic_assignment(
    ctx: &CompileContext<'_>,
    column: &str,
    op: ArithmeticOp,
    value: &Value,
) -> QueryResult<String> {
    if !matches!(value, Value::Int(_) | Value::Float(_)) {
        return Err(QueryError::invalid(format!(
            "cannot {} non-numeric {} on {}",
            if op == ArithmeticOp::Add { "add" } else { "subtract" },
            value.kind(),
            column
        )));
    }
    let quoted = ctx.quote(column);
    let literal = ctx.generator.escape_literal(value)?;
    Ok(format!("{} = {} {} {}", quoted, quoted, op, literal))
}
