use super::mysql::{
    MYSQL_INDEX_HINTS, MYSQL_MAX_LIMIT, backslash_escape, blob_like, mysql_create_database,
    mysql_drop_database, mysql_duplicate_clause, mysql_insert_keyword, mysql_operator,
    mysql_table_options,
};
use crate::ast::{DatabaseOptions, DuplicateHandling, IndexHintKind, Operator, TableOptions};
use crate::error::QueryResult;
use crate::transpiler::traits::SqlGenerator;

/// MariaDB Generator. Same surface syntax as MySQL.
pub struct MariaDbGenerator;

impl SqlGenerator for MariaDbGenerator {
    fn name(&self) -> &'static str {
        "mariadb"
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
