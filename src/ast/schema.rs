//! Column and table definitions consumed by the DDL compiler.

use serde::{Deserialize, Serialize};

use crate::ast::{Expr, ReferentialAction};

/// Foreign key target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct References {
    pub table: String,
    /// Referenced column; omitted from the SQL when absent
    #[serde(default)]
    pub key: Option<String>,
}

/// Definition of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// SQL type, e.g. `VARCHAR(255)`, `INTEGER`, `JSON`
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default = "default_true")]
    pub allow_null: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub default: Option<Expr>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Place the column after another one (MySQL family)
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub references: Option<References>,
    #[serde(default)]
    pub on_delete: Option<ReferentialAction>,
    #[serde(default)]
    pub on_update: Option<ReferentialAction>,
}

fn default_true() -> bool {
    true
}

impl ColumnDefinition {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            allow_null: true,
            auto_increment: false,
            primary_key: false,
            unique: false,
            default: None,
            comment: None,
            after: None,
            references: None,
            on_delete: None,
            on_update: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Expr>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.after = Some(column.into());
        self
    }

    pub fn references(mut self, table: impl Into<String>, key: Option<&str>) -> Self {
        self.references = Some(References {
            table: table.into(),
            key: key.map(str::to_string),
        });
        self
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// A named (or anonymous) multi-column unique constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueKey {
    #[serde(default)]
    pub name: Option<String>,
    pub fields: Vec<String>,
}

/// CREATE TABLE options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    #[serde(default = "default_true")]
    pub if_not_exists: bool,
    /// Storage engine (MySQL family; defaults to InnoDB there)
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub collate: Option<String>,
    #[serde(default)]
    pub row_format: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub unique_keys: Vec<UniqueKey>,
    #[serde(default)]
    pub initial_auto_increment: Option<u64>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            if_not_exists: true,
            engine: None,
            charset: None,
            collate: None,
            row_format: None,
            comment: None,
            unique_keys: vec![],
            initial_auto_increment: None,
        }
    }
}

impl TableOptions {
    /// True when an option only the MySQL family understands is set.
    pub(crate) fn has_mysql_only_options(&self) -> bool {
        self.engine.is_some()
            || self.charset.is_some()
            || self.collate.is_some()
            || self.row_format.is_some()
            || self.comment.is_some()
            || self.initial_auto_increment.is_some()
    }
}

/// DROP TABLE options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableOptions {
    #[serde(default = "default_true")]
    pub if_exists: bool,
    #[serde(default)]
    pub cascade: bool,
}

impl Default for DropTableOptions {
    fn default() -> Self {
        Self {
            if_exists: true,
            cascade: false,
        }
    }
}

/// CREATE/DROP DATABASE options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseOptions {
    /// `IF NOT EXISTS` on create, `IF EXISTS` on drop
    #[serde(default = "default_true")]
    pub guard: bool,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub collate: Option<String>,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            guard: true,
            charset: None,
            collate: None,
        }
    }
}
