use crate::transpiler::traits::SqlGenerator;

/// SQLite Generator.
pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn max_limit(&self) -> &'static str {
        "-1"
    }

    fn auto_increment_keyword(&self) -> Option<&'static str> {
        Some("AUTOINCREMENT")
    }

    fn auto_increment_after_primary_key(&self) -> bool {
        true
    }

    // No TRUNCATE statement
    fn truncate_table(&self, table: &str) -> String {
        format!("DELETE FROM {};", self.quote_path(table))
    }

    fn supports_returning(&self) -> bool {
        true
    }
}
