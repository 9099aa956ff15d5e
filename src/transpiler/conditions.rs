use crate::ast::{Predicate, Reach};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::operators::{in_list, resolve_comparison};
use crate::transpiler::params::CompileContext;
use crate::transpiler::projection::compile_expr;

/// Compile a WHERE/HAVING tree. `None` means the clause is omitted.
pub fn compile_predicate(
    ctx: &mut CompileContext<'_>,
    predicate: &Predicate,
) -> QueryResult<Option<String>> {
    compile_node(ctx, predicate, false)
}

/// Compile an optional predicate with columns qualified by the context table.
pub fn compile_qualified(
    ctx: &mut CompileContext<'_>,
    predicate: Option<&Predicate>,
) -> QueryResult<Option<String>> {
    let Some(predicate) = predicate else {
        return Ok(None);
    };
    ctx.qualify = ctx.table.is_some();
    let result = compile_predicate(ctx, predicate);
    ctx.qualify = false;
    result
}

fn compile_node(
    ctx: &mut CompileContext<'_>,
    predicate: &Predicate,
    nested: bool,
) -> QueryResult<Option<String>> {
    match predicate {
        Predicate::Comparison { left, op, value } => {
            let left = compile_expr(ctx, left)?;
            resolve_comparison(ctx, &left, *op, value)
        }
        Predicate::Raw { call, op, value } => {
            if !call.is_function() {
                return Err(QueryError::invalid(format!(
                    "raw condition needs a function call, got {}",
                    call
                )));
            }
            let left = compile_expr(ctx, call)?;
            resolve_comparison(ctx, &left, *op, value)
        }
        Predicate::IsNull(expr) => Ok(Some(format!("{} IS NULL", compile_expr(ctx, expr)?))),
        Predicate::InList {
            left,
            values,
            negated,
        } => {
            let left = compile_expr(ctx, left)?;
            in_list(ctx, &left, values, *negated)
        }
        Predicate::Logical { op, children } => {
            if predicate.reach() != Reach::Filter {
                return Ok(None);
            }
            let live: Vec<&Predicate> = children
                .iter()
                .filter(|c| c.reach() == Reach::Filter)
                .collect();
            // A lone child takes the parent's place
            let child_nested = if live.len() > 1 { true } else { nested };
            let mut parts = Vec::with_capacity(live.len());
            for child in live {
                if let Some(sql) = compile_node(ctx, child, child_nested)? {
                    parts.push(sql);
                }
            }
            Ok(match parts.len() {
                0 => None,
                1 => parts.pop(),
                _ => {
                    let joined = parts.join(op.joiner());
                    Some(if nested { format!("({})", joined) } else { joined })
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{and, col, eq, func, gt, is_in, not_in, or, raw_cond};
    use crate::ast::{LogicalOp, Operator, TableMeta, Value};
    use crate::transpiler::Dialect;
    use crate::transpiler::params::Settings;

    fn compile(dialect: Dialect, p: &Predicate) -> Option<String> {
        let generator = dialect.generator();
        let mut ctx = CompileContext::new(generator.as_ref(), Settings::default());
        compile_predicate(&mut ctx, p).unwrap()
    }

    #[test]
    fn test_nested_parentheses() {
        let p = eq("a", 5).and(or([gt("b", 1), eq("c", "x")]));
        assert_eq!(
            compile(Dialect::MySQL, &p).unwrap(),
            "`a` = 5 AND (`b` > 1 OR `c` = 'x')"
        );
    }

    #[test]
    fn test_single_child_collapses() {
        let p = Predicate::Logical {
            op: LogicalOp::Or,
            children: vec![eq("a", 1).and(eq("b", 2))],
        };
        assert_eq!(compile(Dialect::Postgres, &p).unwrap(), "\"a\" = 1 AND \"b\" = 2");
    }

    #[test]
    fn test_empty_children_dropped() {
        let p = eq("a", 1).and(not_in("b", Vec::<i64>::new()));
        assert_eq!(compile(Dialect::SQLite, &p).unwrap(), "\"a\" = 1");
        assert_eq!(compile(Dialect::SQLite, &not_in("b", Vec::<i64>::new())), None);
        assert_eq!(
            compile(Dialect::SQLite, &is_in("b", Vec::<i64>::new())).unwrap(),
            "\"b\" IN (NULL)"
        );
    }

    #[test]
    fn test_everything_child_widens_or() {
        let p = or([eq("a", 1), not_in("b", Vec::<i64>::new())]);
        assert_eq!(compile(Dialect::MySQL, &p), None);

        let p = eq("a", 1).and(or([eq("b", 2), not_in("c", Vec::<i64>::new())]));
        assert_eq!(compile(Dialect::MySQL, &p).unwrap(), "`a` = 1");
    }

    #[test]
    fn test_dropped_raw_child_leaves_no_parentheses() {
        let p = and([
            raw_cond(func("LOWER", [col("a")]), Operator::NotIn, Value::Array(vec![])),
            or([eq("b", 1), eq("c", 2)]),
        ]);
        assert_eq!(compile(Dialect::MySQL, &p).unwrap(), "`b` = 1 OR `c` = 2");
    }

    #[test]
    fn test_qualified_columns() {
        let generator = Dialect::MySQL.generator();
        let mut meta = TableMeta::new("users");
        meta.alias = Some("u".to_string());
        meta.attributes = vec!["profile.name".to_string()];
        let mut ctx = CompileContext::new(generator.as_ref(), Settings::default()).with_table(&meta);
        let p = eq("id", 1).and(eq("profile.name", "x")).and(eq("other.id", 2));
        let sql = compile_qualified(&mut ctx, Some(&p)).unwrap().unwrap();
        assert_eq!(
            sql,
            "`u`.`id` = 1 AND `u`.`profile.name` = 'x' AND `other`.`id` = 2"
        );
        assert!(!ctx.qualify);
    }
}
