use crate::ast::{IndexHint, IndexHintKind, SelectQuery};
use crate::error::QueryResult;
use crate::transpiler::conditions::{compile_predicate, compile_qualified};
use crate::transpiler::dml::json::build_nested_json;
use crate::transpiler::params::{CompileContext, Settings};
use crate::transpiler::projection::{compile_attributes, compile_group, compile_order};
use crate::transpiler::traits::SqlGenerator;
use crate::transpiler::CompiledQuery;

/// Generate SELECT SQL.
///
/// Clause order is fixed, and so is bind order: attributes, WHERE, GROUP BY,
/// HAVING, ORDER BY. LIMIT/OFFSET are always inline.
pub fn build_select(
    generator: &dyn SqlGenerator,
    query: &SelectQuery,
    settings: Settings,
) -> QueryResult<CompiledQuery> {
    let mut ctx = CompileContext::new(generator, settings).with_table(&query.table);

    let mut sql = format!("SELECT {}", compile_attributes(&mut ctx, &query.attributes)?);

    sql.push_str(" FROM ");
    sql.push_str(&generator.quote_path(&query.table.name));
    if let Some(alias) = &query.table.alias {
        sql.push_str(&format!(" AS {}", generator.quote_identifier(alias)));
    }

    for hint in &query.index_hints {
        if let Some(clause) = index_hint_sql(generator, hint) {
            sql.push(' ');
            sql.push_str(&clause);
        }
    }

    if let Some(where_sql) = compile_qualified(&mut ctx, query.where_clause.as_ref())? {
        sql.push_str(&format!(" WHERE {}", where_sql));
    }

    if let Some(group) = compile_group(&mut ctx, &query.group)? {
        sql.push_str(&format!(" GROUP BY {}", group));
    }

    if let Some(having) = &query.having {
        if let Some(having_sql) = compile_predicate(&mut ctx, having)? {
            sql.push_str(&format!(" HAVING {}", having_sql));
        }
    }

    if let Some(order) = compile_order(&mut ctx, &query.order)? {
        sql.push_str(&format!(" ORDER BY {}", order));
    }

    sql.push_str(&generator.limit_offset(query.limit, query.offset));

    if query.nested_json && generator.needs_nested_json() {
        sql = build_nested_json(generator, &sql, &query.table, &query.attributes)?;
    }
    sql.push(';');

    Ok(CompiledQuery {
        query: sql,
        bind: ctx.finish(),
    })
}

/// `USE INDEX (...)` etc. Unknown or unsupported kinds and empty lists yield `None`.
fn index_hint_sql(generator: &dyn SqlGenerator, hint: &IndexHint) -> Option<String> {
    let kind = IndexHintKind::parse(&hint.kind)
        .filter(|k| generator.index_hint_kinds().contains(k));
    let Some(kind) = kind else {
        tracing::trace!(
            "Dropping index hint '{}' unsupported by {}",
            hint.kind,
            generator.name()
        );
        return None;
    };
    if hint.values.is_empty() {
        tracing::trace!("Dropping {} INDEX hint without index names", kind.keyword());
        return None;
    }
    let names = hint
        .values
        .iter()
        .map(|v| generator.quote_identifier(v))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("{} INDEX ({})", kind.keyword(), names))
}
