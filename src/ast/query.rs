use serde::{Deserialize, Serialize};

use crate::ast::{Attribute, Expr, OrderBy, Predicate};

/// Table metadata supplied by the model layer. Read-only input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Target table name
    pub name: String,
    /// Optional alias (`FROM t AS alias`)
    #[serde(default)]
    pub alias: Option<String>,
    /// Declared attribute names. Dotted names listed here are single identifiers.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl TableMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            attributes: vec![],
        }
    }

    /// Whether `name` is a declared attribute of this table.
    pub fn declares(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }
}

/// An index hint as received; unknown kinds are dropped at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHint {
    pub kind: String,
    pub values: Vec<String>,
}

impl IndexHint {
    pub fn new<S: Into<String>>(kind: &str, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind: kind.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Structured description of one SELECT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    /// Target table
    pub table: TableMeta,
    /// Projection; empty means `*`
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// WHERE predicate
    #[serde(default)]
    pub where_clause: Option<Predicate>,
    /// GROUP BY keys; empty omits the clause
    #[serde(default)]
    pub group: Vec<Expr>,
    /// HAVING predicate
    #[serde(default)]
    pub having: Option<Predicate>,
    /// ORDER BY entries
    #[serde(default)]
    pub order: Vec<OrderBy>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    /// Index hints (MySQL family)
    #[serde(default)]
    pub index_hints: Vec<IndexHint>,
    /// Wrap the result into a single JSON array column named `root`
    #[serde(default)]
    pub nested_json: bool,
}

impl SelectQuery {
    /// Create a new SELECT against the given table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: TableMeta::new(table),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table.alias = Some(alias.into());
        self
    }

    /// Declare table attributes (dotted names are kept whole).
    pub fn declare<S: Into<String>>(mut self, attributes: impl IntoIterator<Item = S>) -> Self {
        self.table
            .attributes
            .extend(attributes.into_iter().map(Into::into));
        self
    }

    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Add a bare column to the projection.
    pub fn column(self, name: &str) -> Self {
        self.attribute(name)
    }

    /// Add `expr AS alias` to the projection.
    pub fn aliased(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.attributes.push(Attribute::Aliased(expr, alias.into()));
        self
    }

    /// Set or extend (with AND) the WHERE predicate.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group.push(expr);
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(match self.having.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn order_asc(self, column: &str) -> Self {
        self.order_by(OrderBy::asc(column))
    }

    pub fn order_desc(self, column: &str) -> Self {
        self.order_by(OrderBy::desc(column))
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn index_hint(mut self, hint: IndexHint) -> Self {
        self.index_hints.push(hint);
        self
    }

    pub fn nested_json(mut self) -> Self {
        self.nested_json = true;
        self
    }
}
