//! Predicate builders for WHERE and HAVING.

use crate::ast::{Expr, LogicalOp, Operator, Predicate, Value};

/// Generic comparison against a column.
pub fn cond(column: &str, op: Operator, value: impl Into<Value>) -> Predicate {
    Predicate::Comparison {
        left: Expr::column(column),
        op,
        value: Expr::Literal(value.into()),
    }
}

/// `column = value` (IS NULL against null)
pub fn eq(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Eq, value)
}

/// `column != value` (IS NOT NULL against null)
pub fn ne(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Ne, value)
}

/// `column IS NOT <bool>` for booleans, `!=` otherwise
pub fn not(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Not, value)
}

pub fn gt(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Gt, value)
}

pub fn gte(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Gte, value)
}

pub fn lt(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Lt, value)
}

pub fn lte(column: &str, value: impl Into<Value>) -> Predicate {
    cond(column, Operator::Lte, value)
}

pub fn like(column: &str, pattern: &str) -> Predicate {
    cond(column, Operator::Like, pattern)
}

pub fn not_like(column: &str, pattern: &str) -> Predicate {
    cond(column, Operator::NotLike, pattern)
}

pub fn regexp(column: &str, pattern: &str) -> Predicate {
    cond(column, Operator::Regexp, pattern)
}

/// `column BETWEEN low AND high`
pub fn between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
    cond(column, Operator::Between, Value::Array(vec![low.into(), high.into()]))
}

/// `column IN (values)`
pub fn is_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Predicate {
    Predicate::InList {
        left: Expr::column(column),
        values: values.into_iter().map(Into::into).collect(),
        negated: false,
    }
}

/// `column NOT IN (values)`
pub fn not_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Predicate {
    Predicate::InList {
        left: Expr::column(column),
        values: values.into_iter().map(Into::into).collect(),
        negated: true,
    }
}

/// `column IS NULL`
pub fn is_null(column: &str) -> Predicate {
    Predicate::IsNull(Expr::column(column))
}

/// Function call compared against a value, e.g. `LOWER(name) = 'bob'`.
pub fn raw_cond(call: Expr, op: Operator, value: impl Into<Expr>) -> Predicate {
    Predicate::Raw {
        call,
        op,
        value: value.into(),
    }
}

/// AND over the given predicates.
pub fn and(children: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Logical {
        op: LogicalOp::And,
        children: children.into_iter().collect(),
    }
}

/// OR over the given predicates.
pub fn or(children: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Logical {
        op: LogicalOp::Or,
        children: children.into_iter().collect(),
    }
}
