//! Options for INSERT, UPDATE and DELETE statements.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Value};

/// Column values of one row, in declaration order.
/// `None` marks an undefined value: the key is left out of the statement.
pub type Row = IndexMap<String, Option<Expr>>;

/// Build a [`Row`] from literal values.
pub fn row<K, V, I>(values: I) -> Row
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), Some(Expr::Literal(v.into()))))
        .collect()
}

/// What to do when an inserted row hits a unique constraint.
/// The variants are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum DuplicateHandling {
    /// Let the database raise the error
    #[default]
    Error,
    /// Skip conflicting rows (INSERT IGNORE / ON CONFLICT DO NOTHING)
    Ignore,
    /// Overwrite `columns` of the existing row. `conflict_keys` is required by
    /// dialects using ON CONFLICT and ignored by the MySQL family.
    Update {
        columns: Vec<String>,
        #[serde(default)]
        conflict_keys: Vec<String>,
    },
}

/// INSERT / bulk INSERT options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertOptions {
    #[serde(default)]
    pub duplicates: DuplicateHandling,
    /// Append `RETURNING *`
    #[serde(default)]
    pub returning: bool,
}

impl InsertOptions {
    pub fn ignore_duplicates() -> Self {
        Self {
            duplicates: DuplicateHandling::Ignore,
            ..Default::default()
        }
    }

    pub fn update_on_duplicate<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        conflict_keys: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            duplicates: DuplicateHandling::Update {
                columns: columns.into_iter().map(Into::into).collect(),
                conflict_keys: conflict_keys.into_iter().map(Into::into).collect(),
            },
            ..Default::default()
        }
    }
}

/// UPDATE options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOptions {
    /// `LIMIT n` (MySQL family)
    #[serde(default)]
    pub limit: Option<u64>,
    /// Append `RETURNING *`
    #[serde(default)]
    pub returning: bool,
}

/// DELETE options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteOptions {
    /// `LIMIT n` (MySQL family)
    #[serde(default)]
    pub limit: Option<u64>,
}
