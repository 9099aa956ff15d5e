//! Dialect trait and shared escaping utilities.

use chrono::{DateTime, Utc};

use crate::ast::{DatabaseOptions, DuplicateHandling, IndexHintKind, Operator, TableOptions, Value};
use crate::error::{QueryError, QueryResult};

/// Format used for date literals (always UTC).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trait for dialect-specific SQL generation.
///
/// Implementations are stateless; one instance is chosen per `QueryGenerator`
/// and shared by every compilation it runs.
pub trait SqlGenerator: Send + Sync {
    /// Dialect name used in error messages.
    fn name(&self) -> &'static str;

    /// Opening and closing identifier quote characters.
    fn quote_chars(&self) -> (char, char);

    /// Quote a single identifier. Dots are part of the name.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.quote_chars();
        let doubled = format!("{}{}", close, close);
        format!("{}{}{}", open, name.replace(close, &doubled), close)
    }

    /// Quote an already qualified name (`table.column`) segment by segment.
    fn quote_path(&self, name: &str) -> String {
        name.split('.')
            .map(|part| {
                if part == "*" {
                    part.to_string()
                } else {
                    self.quote_identifier(part)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Generate the parameter placeholder (e.g., $1, ?) for a 1-based index.
    fn placeholder(&self, index: usize) -> String;

    /// Get the boolean literal (true/false vs 1/0).
    fn bool_literal(&self, val: bool) -> String {
        if val {
            "true".to_string()
        } else {
            "false".to_string()
        }
    }

    /// Quote a string literal. Default doubles single quotes.
    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// Hex literal for binary data.
    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_upper(bytes))
    }

    fn date_literal(&self, date: &DateTime<Utc>) -> String {
        format!("'{}'", date.format(DATE_FORMAT))
    }

    /// Render a scalar as inline SQL text.
    fn escape_literal(&self, value: &Value) -> QueryResult<String> {
        Ok(match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.bool_literal(*b),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(QueryError::invalid(format!(
                        "non-finite number {} has no SQL literal",
                        f
                    )));
                }
                f.to_string()
            }
            Value::String(s) => self.string_literal(s),
            Value::Binary(bytes) => self.binary_literal(bytes),
            Value::Date(d) => self.date_literal(d),
            Value::Array(items) => {
                let parts = items
                    .iter()
                    .map(|v| self.escape_literal(v))
                    .collect::<QueryResult<Vec<_>>>()?;
                format!("({})", parts.join(", "))
            }
        })
    }

    /// SQL keyword for an operator, or `None` when the dialect has no mapping.
    fn operator_sql(&self, op: Operator) -> Option<&'static str> {
        standard_operator(op)
    }

    /// LIMIT used when only OFFSET is given.
    fn max_limit(&self) -> &'static str;

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        match (limit, offset) {
            (Some(n), _) => sql.push_str(&format!(" LIMIT {}", n)),
            (None, Some(_)) => sql.push_str(&format!(" LIMIT {}", self.max_limit())),
            (None, None) => {}
        }
        if let Some(n) = offset {
            sql.push_str(&format!(" OFFSET {}", n));
        }
        sql
    }

    /// Index hint kinds understood by the dialect.
    fn index_hint_kinds(&self) -> &'static [IndexHintKind] {
        &[]
    }

    /// Whether nested results must be emulated with the JSON rewrite.
    fn needs_nested_json(&self) -> bool {
        false
    }

    fn json_object_function(&self) -> &'static str {
        "JSON_BUILD_OBJECT"
    }

    fn json_row_function(&self) -> &'static str {
        "ROW_TO_JSON"
    }

    fn json_array_aggregate(&self) -> &'static str {
        "JSON_AGG"
    }

    fn empty_json_array(&self) -> &'static str {
        "'[]'"
    }

    // ---- DDL hooks ----

    /// Inline auto-increment keyword, if the dialect has one.
    fn auto_increment_keyword(&self) -> Option<&'static str> {
        None
    }

    /// Whether the auto-increment keyword follows PRIMARY KEY (SQLite).
    fn auto_increment_after_primary_key(&self) -> bool {
        false
    }

    /// Replacement type for auto-increment columns (Postgres SERIAL).
    fn serial_type(&self, _data_type: &str) -> Option<&'static str> {
        None
    }

    /// Whether columns of this type reject DEFAULT values.
    fn forbids_default(&self, _data_type: &str) -> bool {
        false
    }

    fn supports_inline_comment(&self) -> bool {
        false
    }

    /// `AFTER <column>` placement.
    fn supports_column_placement(&self) -> bool {
        false
    }

    /// Trailing CREATE TABLE options (engine, charset, ...).
    fn table_options(&self, options: &TableOptions) -> QueryResult<String> {
        if options.has_mysql_only_options() {
            return Err(QueryError::feature(
                "engine/charset/collate/row format/comment/auto-increment table options",
                self.name(),
            ));
        }
        Ok(String::new())
    }

    fn supports_drop_cascade(&self) -> bool {
        false
    }

    fn create_database(&self, _name: &str, _options: &DatabaseOptions) -> QueryResult<String> {
        Err(QueryError::feature("CREATE DATABASE", self.name()))
    }

    fn drop_database(&self, _name: &str, _options: &DatabaseOptions) -> QueryResult<String> {
        Err(QueryError::feature("DROP DATABASE", self.name()))
    }

    fn truncate_table(&self, table: &str) -> String {
        format!("TRUNCATE {};", self.quote_path(table))
    }

    // ---- DML hooks ----

    fn insert_keyword(&self, _duplicates: &DuplicateHandling) -> &'static str {
        "INSERT INTO"
    }

    /// Clause placed after VALUES for duplicate handling.
    /// Default is the ON CONFLICT form (Postgres, SQLite).
    fn duplicate_clause(&self, duplicates: &DuplicateHandling) -> QueryResult<String> {
        match duplicates {
            DuplicateHandling::Error => Ok(String::new()),
            DuplicateHandling::Ignore => Ok(" ON CONFLICT DO NOTHING".to_string()),
            DuplicateHandling::Update {
                columns,
                conflict_keys,
            } => {
                if conflict_keys.is_empty() {
                    return Err(QueryError::invalid(
                        "update on duplicate requires conflict keys",
                    ));
                }
                if columns.is_empty() {
                    return Err(QueryError::invalid(
                        "update on duplicate requires at least one column",
                    ));
                }
                let target = conflict_keys
                    .iter()
                    .map(|c| self.quote_identifier(c))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sets = columns
                    .iter()
                    .map(|c| {
                        let quoted = self.quote_identifier(c);
                        format!("{} = EXCLUDED.{}", quoted, quoted)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!(" ON CONFLICT ({}) DO UPDATE SET {}", target, sets))
            }
        }
    }

    /// Column list and VALUES for a row with no columns.
    fn empty_insert_values(&self) -> &'static str {
        " DEFAULT VALUES"
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn supports_limit_on_write(&self) -> bool {
        false
    }
}

/// Operator table shared by every dialect.
pub fn standard_operator(op: Operator) -> Option<&'static str> {
    Some(match op {
        Operator::Eq => "=",
        Operator::Ne | Operator::Not => "!=",
        Operator::Is => "IS",
        Operator::Gt => ">",
        Operator::Gte => ">=",
        Operator::Lt => "<",
        Operator::Lte => "<=",
        Operator::In => "IN",
        Operator::NotIn => "NOT IN",
        Operator::Like => "LIKE",
        Operator::NotLike => "NOT LIKE",
        Operator::Between => "BETWEEN",
        Operator::NotBetween => "NOT BETWEEN",
        Operator::ILike
        | Operator::NotILike
        | Operator::Regexp
        | Operator::NotRegexp
        | Operator::IRegexp
        | Operator::NotIRegexp => return None,
    })
}

pub fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Accept a bare SQL word (engine, charset, function name ...), reject anything else.
pub fn plain_word<'a>(what: &str, value: &'a str) -> QueryResult<&'a str> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if ok {
        Ok(value)
    } else {
        Err(QueryError::invalid(format!("invalid {} '{}'", what, value)))
    }
}
