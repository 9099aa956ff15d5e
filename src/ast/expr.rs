use serde::{Deserialize, Serialize};

use crate::ast::{TableMeta, Value};

/// A general expression node (column, function call, literal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Column reference with an optional table qualifier
    Column {
        name: String,
        #[serde(default)]
        table: Option<String>,
    },
    /// Function call (COUNT, LOWER, COALESCE, ...); arguments may nest
    FunctionCall { name: String, args: Vec<Expr> },
    /// Scalar literal, escaped or bound on emission
    Literal(Value),
    /// Trusted SQL fragment emitted verbatim (e.g. `CURRENT_TIMESTAMP`).
    /// Never produced from JSON input.
    Raw(String),
}

impl Expr {
    /// Unqualified column reference.
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column {
            name: name.into(),
            table: None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expr::FunctionCall { .. })
    }

    /// The literal value, if this is a literal.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expr::Literal(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Column { name, table: None } => write!(f, "{}", name),
            Expr::Column {
                name,
                table: Some(t),
            } => write!(f, "{}.{}", t, name),
            Expr::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Literal(v) => write!(f, "{}", v),
            Expr::Raw(sql) => write!(f, "{}", sql),
        }
    }
}

/// One entry of a projection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    /// All columns (*)
    Star,
    /// Plain expression
    Expr(Expr),
    /// `expr AS alias`
    Aliased(Expr, String),
}

impl Attribute {
    /// Name of the result column this attribute produces in a SELECT on
    /// `meta`. An undeclared `a.b` reference yields `b`.
    pub fn output_name(&self, meta: &TableMeta) -> Option<&str> {
        match self {
            Attribute::Star => None,
            Attribute::Aliased(_, alias) => Some(alias),
            Attribute::Expr(Expr::Column { name, table: None }) if !meta.declares(name) => {
                name.rsplit('.').next()
            }
            Attribute::Expr(Expr::Column { name, .. }) => Some(name),
            Attribute::Expr(_) => None,
        }
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        if name == "*" {
            Attribute::Star
        } else {
            Attribute::Expr(Expr::column(name))
        }
    }
}

/// One ORDER BY entry. `direction` is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub expr: Expr,
    #[serde(default)]
    pub direction: Option<String>,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            expr: Expr::column(column),
            direction: Some("ASC".to_string()),
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            expr: Expr::column(column),
            direction: Some("DESC".to_string()),
        }
    }
}
