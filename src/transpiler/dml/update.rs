use indexmap::IndexMap;

use crate::ast::{ArithmeticOp, Expr, Predicate, Row, UpdateOptions, Value};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::conditions::compile_predicate;
use crate::transpiler::dml::insert::returning;
use crate::transpiler::operators::arithmetic_assignment;
use crate::transpiler::params::{CompileContext, Settings};
use crate::transpiler::projection::compile_expr;
use crate::transpiler::traits::SqlGenerator;
use crate::transpiler::CompiledQuery;

/// Generate UPDATE SQL. SET values are bound first, then WHERE.
pub fn build_update(
    generator: &dyn SqlGenerator,
    table: &str,
    values: &Row,
    where_clause: Option<&Predicate>,
    options: &UpdateOptions,
    settings: Settings,
) -> QueryResult<CompiledQuery> {
    let mut ctx = CompileContext::new(generator, settings);
    let sets = set_list(&mut ctx, values)?;
    if sets.is_empty() {
        return Err(QueryError::invalid(format!(
            "update of {} has no values to set",
            table
        )));
    }
    let query = finish_update(
        &mut ctx,
        table,
        sets,
        where_clause,
        options.limit,
        options.returning,
    )?;
    Ok(CompiledQuery {
        query,
        bind: ctx.finish(),
    })
}

/// Generate `col = col +/- n` UPDATE SQL for increment/decrement.
/// Increments are inline; `extra` values are bound like a normal UPDATE.
pub fn build_arithmetic(
    generator: &dyn SqlGenerator,
    op: ArithmeticOp,
    table: &str,
    where_clause: Option<&Predicate>,
    increments: &IndexMap<String, Value>,
    extra: &Row,
    settings: Settings,
) -> QueryResult<CompiledQuery> {
    if increments.is_empty() {
        return Err(QueryError::invalid(format!(
            "arithmetic update of {} has no columns",
            table
        )));
    }
    let mut ctx = CompileContext::new(generator, settings);
    let mut sets = Vec::with_capacity(increments.len() + extra.len());
    for (column, value) in increments {
        sets.push(arithmetic_assignment(&ctx, column, op, value)?);
    }
    sets.extend(set_list(&mut ctx, extra)?);
    let query = finish_update(&mut ctx, table, sets, where_clause, None, false)?;
    Ok(CompiledQuery {
        query,
        bind: ctx.finish(),
    })
}

fn set_list(ctx: &mut CompileContext<'_>, values: &Row) -> QueryResult<Vec<String>> {
    let mut sets = Vec::with_capacity(values.len());
    for (column, value) in values {
        let Some(expr) = value else {
            continue;
        };
        if ctx.settings.omit_null && matches!(expr, Expr::Literal(Value::Null)) {
            continue;
        }
        let sql = match expr {
            Expr::Literal(v) => ctx.bind(v.clone()),
            other => compile_expr(ctx, other)?,
        };
        sets.push(format!("{} = {}", ctx.quote(column), sql));
    }
    Ok(sets)
}

fn finish_update(
    ctx: &mut CompileContext<'_>,
    table: &str,
    sets: Vec<String>,
    where_clause: Option<&Predicate>,
    limit: Option<u64>,
    want_returning: bool,
) -> QueryResult<String> {
    let generator = ctx.generator;
    let mut sql = format!(
        "UPDATE {} SET {}",
        generator.quote_path(table),
        sets.join(", ")
    );
    if let Some(predicate) = where_clause {
        if let Some(where_sql) = compile_predicate(ctx, predicate)? {
            sql.push_str(&format!(" WHERE {}", where_sql));
        }
    }
    if let Some(n) = limit {
        if !generator.supports_limit_on_write() {
            return Err(QueryError::feature("UPDATE ... LIMIT", generator.name()));
        }
        sql.push_str(&format!(" LIMIT {}", n));
    }
    sql.push_str(&returning(generator, want_returning)?);
    sql.push(';');
    Ok(sql)
}
