use crate::ast::{DeleteOptions, Predicate};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::conditions::compile_predicate;
use crate::transpiler::params::{CompileContext, Settings};
use crate::transpiler::traits::SqlGenerator;
use crate::transpiler::CompiledQuery;

/// Generate DELETE SQL.
pub fn build_delete(
    generator: &dyn SqlGenerator,
    table: &str,
    where_clause: Option<&Predicate>,
    options: &DeleteOptions,
    settings: Settings,
) -> QueryResult<CompiledQuery> {
    let mut ctx = CompileContext::new(generator, settings);
    let mut sql = format!("DELETE FROM {}", generator.quote_path(table));

    if let Some(predicate) = where_clause {
        if let Some(where_sql) = compile_predicate(&mut ctx, predicate)? {
            sql.push_str(&format!(" WHERE {}", where_sql));
        }
    }

    if let Some(n) = options.limit {
        if !generator.supports_limit_on_write() {
            return Err(QueryError::feature("DELETE ... LIMIT", generator.name()));
        }
        sql.push_str(&format!(" LIMIT {}", n));
    }
    sql.push(';');

    Ok(CompiledQuery {
        query: sql,
        bind: ctx.finish(),
    })
}
