use indexmap::IndexSet;

use crate::ast::{Expr, InsertOptions, Row, Value};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::params::{CompileContext, Settings};
use crate::transpiler::projection::compile_expr;
use crate::transpiler::traits::SqlGenerator;
use crate::transpiler::CompiledQuery;

/// Generate single-row INSERT SQL. Literal values are always bound.
pub fn build_insert(
    generator: &dyn SqlGenerator,
    table: &str,
    row: &Row,
    options: &InsertOptions,
    settings: Settings,
) -> QueryResult<CompiledQuery> {
    let mut ctx = CompileContext::new(generator, settings);

    let mut cols = Vec::new();
    let mut values = Vec::new();
    for (column, value) in row {
        let Some(expr) = value else {
            continue;
        };
        if settings.omit_null && matches!(expr, Expr::Literal(Value::Null)) {
            continue;
        }
        cols.push(generator.quote_identifier(column));
        values.push(match expr {
            Expr::Literal(v) => ctx.bind(v.clone()),
            other => compile_expr(&mut ctx, other)?,
        });
    }

    let mut sql = format!(
        "{} {}",
        generator.insert_keyword(&options.duplicates),
        generator.quote_path(table)
    );
    if cols.is_empty() {
        sql.push_str(generator.empty_insert_values());
    } else {
        sql.push_str(&format!(" ({}) VALUES ({})", cols.join(", "), values.join(", ")));
    }
    sql.push_str(&generator.duplicate_clause(&options.duplicates)?);
    sql.push_str(&returning(generator, options.returning)?);
    sql.push(';');

    Ok(CompiledQuery {
        query: sql,
        bind: ctx.finish(),
    })
}

/// Generate multi-row INSERT SQL with inline literals.
///
/// Columns are the union of all row keys in first-seen order; a column a row
/// does not define is written as NULL.
pub fn build_bulk_insert(
    generator: &dyn SqlGenerator,
    table: &str,
    rows: &[Row],
    options: &InsertOptions,
) -> QueryResult<String> {
    if rows.is_empty() {
        return Err(QueryError::invalid("bulk insert needs at least one row"));
    }
    let columns: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();
    if columns.is_empty() {
        return Err(QueryError::invalid("bulk insert needs at least one column"));
    }

    let mut ctx = CompileContext::new(generator, Settings::default());
    let mut tuples = Vec::with_capacity(rows.len());
    for row in rows {
        let mut values = Vec::with_capacity(columns.len());
        for column in &columns {
            let sql = match row.get(*column) {
                Some(Some(Expr::Literal(v))) => generator.escape_literal(v)?,
                Some(Some(other)) => compile_expr(&mut ctx, other)?,
                Some(None) | None => "NULL".to_string(),
            };
            values.push(sql);
        }
        tuples.push(format!("({})", values.join(", ")));
    }

    let cols = columns
        .iter()
        .map(|c| generator.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!(
        "{} {} ({}) VALUES {}",
        generator.insert_keyword(&options.duplicates),
        generator.quote_path(table),
        cols,
        tuples.join(", ")
    );
    sql.push_str(&generator.duplicate_clause(&options.duplicates)?);
    sql.push_str(&returning(generator, options.returning)?);
    sql.push(';');
    Ok(sql)
}

pub(crate) fn returning(generator: &dyn SqlGenerator, requested: bool) -> QueryResult<String> {
    if !requested {
        return Ok(String::new());
    }
    if !generator.supports_returning() {
        return Err(QueryError::feature("RETURNING", generator.name()));
    }
    Ok(" RETURNING *".to_string())
}
