use serde::{Deserialize, Serialize};

use crate::ast::{Expr, LogicalOp, Operator, Value};

/// A boolean filter tree used by WHERE and HAVING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `left <op> value`
    Comparison {
        left: Expr,
        op: Operator,
        value: Expr,
    },
    /// AND / OR over ordered children
    Logical {
        op: LogicalOp,
        children: Vec<Predicate>,
    },
    /// Function call on the left side, e.g. `LOWER(name) = 'foo'`
    Raw {
        call: Expr,
        op: Operator,
        value: Expr,
    },
    /// `expr IS NULL`
    IsNull(Expr),
    /// `expr [NOT] IN (values)`
    InList {
        left: Expr,
        values: Vec<Value>,
        #[serde(default)]
        negated: bool,
    },
}

/// What a predicate node constrains, decided before any SQL is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// No conditions at all (an empty group)
    Empty,
    /// Matches every row, e.g. an empty NOT IN
    Everything,
    /// Produces SQL
    Filter,
}

impl Predicate {
    /// Classify this node. Empty children are ignored; under OR a child that
    /// matches everything makes the whole group match everything.
    pub fn reach(&self) -> Reach {
        match self {
            Predicate::Logical { op, children } => {
                let mut reaches = children
                    .iter()
                    .map(Predicate::reach)
                    .filter(|r| *r != Reach::Empty)
                    .peekable();
                if reaches.peek().is_none() {
                    return Reach::Empty;
                }
                let widened = match op {
                    LogicalOp::And => reaches.all(|r| r == Reach::Everything),
                    LogicalOp::Or => reaches.any(|r| r == Reach::Everything),
                };
                if widened {
                    Reach::Everything
                } else {
                    Reach::Filter
                }
            }
            Predicate::InList {
                values, negated, ..
            } if *negated && values.is_empty() => Reach::Everything,
            Predicate::Comparison {
                op: Operator::NotIn,
                value: Expr::Literal(Value::Array(values)),
                ..
            }
            | Predicate::Raw {
                op: Operator::NotIn,
                value: Expr::Literal(Value::Array(values)),
                ..
            } if values.is_empty() => Reach::Everything,
            _ => Reach::Filter,
        }
    }

    /// True when compiling this node cannot produce any SQL.
    pub fn is_empty(&self) -> bool {
        self.reach() != Reach::Filter
    }

    /// Combine with another predicate using AND, flattening nested ANDs.
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Logical {
                op: LogicalOp::And,
                mut children,
            } => {
                children.push(other);
                Predicate::Logical {
                    op: LogicalOp::And,
                    children,
                }
            }
            first => Predicate::Logical {
                op: LogicalOp::And,
                children: vec![first, other],
            },
        }
    }

    /// Combine with another predicate using OR, flattening nested ORs.
    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Logical {
                op: LogicalOp::Or,
                mut children,
            } => {
                children.push(other);
                Predicate::Logical {
                    op: LogicalOp::Or,
                    children,
                }
            }
            first => Predicate::Logical {
                op: LogicalOp::Or,
                children: vec![first, other],
            },
        }
    }
}
