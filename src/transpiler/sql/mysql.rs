use crate::ast::{DatabaseOptions, DuplicateHandling, IndexHintKind, Operator, TableOptions};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::traits::{SqlGenerator, plain_word, standard_operator};

/// Largest unsigned BIGINT; stands in for "no limit" when only OFFSET is set.
pub const MYSQL_MAX_LIMIT: &str = "18446744073709551615";

pub const MYSQL_INDEX_HINTS: &[IndexHintKind] =
    &[IndexHintKind::Use, IndexHintKind::Force, IndexHintKind::Ignore];

/// MySQL Generator.
pub struct MysqlGenerator;

impl SqlGenerator for MysqlGenerator {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_chars(&self) -> (char, char) {
        ('`', '`')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn string_literal(&self, s: &str) -> String {
        backslash_escape(s)
    }

    fn operator_sql(&self, op: Operator) -> Option<&'static str> {
        mysql_operator(op)
    }

    fn max_limit(&self) -> &'static str {
        MYSQL_MAX_LIMIT
    }

    fn index_hint_kinds(&self) -> &'static [IndexHintKind] {
        MYSQL_INDEX_HINTS
    }

    fn auto_increment_keyword(&self) -> Option<&'static str> {
        Some("auto_increment")
    }

    fn forbids_default(&self, data_type: &str) -> bool {
        blob_like(data_type)
    }

    fn supports_inline_comment(&self) -> bool {
        true
    }

    fn supports_column_placement(&self) -> bool {
        true
    }

    fn table_options(&self, options: &TableOptions) -> QueryResult<String> {
        mysql_table_options(self, options)
    }

    fn create_database(&self, name: &str, options: &DatabaseOptions) -> QueryResult<String> {
        mysql_create_database(self, name, options)
    }

    fn drop_database(&self, name: &str, options: &DatabaseOptions) -> QueryResult<String> {
        Ok(mysql_drop_database(self, name, options))
    }

    fn insert_keyword(&self, duplicates: &DuplicateHandling) -> &'static str {
        mysql_insert_keyword(duplicates)
    }

    fn duplicate_clause(&self, duplicates: &DuplicateHandling) -> QueryResult<String> {
        mysql_duplicate_clause(self, duplicates)
    }

    fn empty_insert_values(&self) -> &'static str {
        " () VALUES ()"
    }

    fn supports_limit_on_write(&self) -> bool {
        true
    }
}

/// MySQL string escaping: backslash escapes for control and quote characters.
pub fn backslash_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\x08' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

pub fn mysql_operator(op: Operator) -> Option<&'static str> {
    match op {
        Operator::Regexp => Some("REGEXP"),
        Operator::NotRegexp => Some("NOT REGEXP"),
        other => standard_operator(other),
    }
}

/// BLOB, TEXT, GEOMETRY and JSON columns cannot carry a DEFAULT.
pub fn blob_like(data_type: &str) -> bool {
    let upper = data_type.trim().to_ascii_uppercase();
    let base = upper.split(['(', ' ']).next().unwrap_or_default();
    matches!(
        base,
        "BLOB"
            | "TINYBLOB"
            | "MEDIUMBLOB"
            | "LONGBLOB"
            | "TEXT"
            | "TINYTEXT"
            | "MEDIUMTEXT"
            | "LONGTEXT"
            | "GEOMETRY"
            | "JSON"
    )
}

pub fn mysql_table_options<G: SqlGenerator + ?Sized>(
    generator: &G,
    options: &TableOptions,
) -> QueryResult<String> {
    let engine = plain_word("engine", options.engine.as_deref().unwrap_or("InnoDB"))?;
    let mut sql = format!(" ENGINE={}", engine);
    if let Some(comment) = &options.comment {
        sql.push_str(&format!(" COMMENT {}", generator.string_literal(comment)));
    }
    if let Some(charset) = &options.charset {
        sql.push_str(&format!(" DEFAULT CHARSET={}", plain_word("charset", charset)?));
    }
    if let Some(collate) = &options.collate {
        sql.push_str(&format!(" COLLATE {}", plain_word("collation", collate)?));
    }
    if let Some(n) = options.initial_auto_increment {
        sql.push_str(&format!(" AUTO_INCREMENT={}", n));
    }
    if let Some(row_format) = &options.row_format {
        sql.push_str(&format!(" ROW_FORMAT={}", plain_word("row format", row_format)?));
    }
    Ok(sql)
}

pub fn mysql_create_database<G: SqlGenerator + ?Sized>(
    generator: &G,
    name: &str,
    options: &DatabaseOptions,
) -> QueryResult<String> {
    let mut sql = String::from("CREATE DATABASE ");
    if options.guard {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&generator.quote_identifier(name));
    if let Some(charset) = &options.charset {
        sql.push_str(&format!(
            " DEFAULT CHARACTER SET {}",
            generator.string_literal(charset)
        ));
    }
    if let Some(collate) = &options.collate {
        sql.push_str(&format!(" DEFAULT COLLATE {}", generator.string_literal(collate)));
    }
    sql.push(';');
    Ok(sql)
}

pub fn mysql_drop_database<G: SqlGenerator + ?Sized>(
    generator: &G,
    name: &str,
    options: &DatabaseOptions,
) -> String {
    let guard = if options.guard { "IF EXISTS " } else { "" };
    format!("DROP DATABASE {}{};", guard, generator.quote_identifier(name))
}

pub fn mysql_insert_keyword(duplicates: &DuplicateHandling) -> &'static str {
    match duplicates {
        DuplicateHandling::Ignore => "INSERT IGNORE INTO",
        _ => "INSERT INTO",
    }
}

/// `ON DUPLICATE KEY UPDATE`; conflict keys are implied by the table's unique keys.
pub fn mysql_duplicate_clause<G: SqlGenerator + ?Sized>(
    generator: &G,
    duplicates: &DuplicateHandling,
) -> QueryResult<String> {
    match duplicates {
        DuplicateHandling::Error | DuplicateHandling::Ignore => Ok(String::new()),
        DuplicateHandling::Update { columns, .. } => {
            if columns.is_empty() {
                return Err(QueryError::invalid(
                    "update on duplicate requires at least one column",
                ));
            }
            let sets = columns
                .iter()
                .map(|c| {
                    let quoted = generator.quote_identifier(c);
                    format!("{} = VALUES({})", quoted, quoted)
                })
                .collect::<Vec<_>>()
                .join(", ");
            Ok(format!(" ON DUPLICATE KEY UPDATE {}", sets))
        }
    }
}
