//! Column references, function calls and literals.

use crate::ast::{Expr, Value};

/// Unqualified column reference.
pub fn col(name: &str) -> Expr {
    Expr::column(name)
}

/// Column reference qualified with a table or alias.
pub fn qualified(table: &str, name: &str) -> Expr {
    Expr::Column {
        name: name.to_string(),
        table: Some(table.to_string()),
    }
}

/// Function call with nested arguments.
pub fn func(name: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::FunctionCall {
        name: name.to_string(),
        args: args.into_iter().collect(),
    }
}

/// Literal value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// Trusted SQL fragment, emitted verbatim.
pub fn raw(sql: &str) -> Expr {
    Expr::Raw(sql.to_string())
}
