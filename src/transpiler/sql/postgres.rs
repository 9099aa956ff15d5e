use crate::ast::{DatabaseOptions, Operator};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::traits::{SqlGenerator, standard_operator};

/// PostgreSQL Generator.
pub struct PostgresGenerator;

impl SqlGenerator for PostgresGenerator {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    // NUL cannot be stored in a text value
    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\0', "").replace('\'', "''"))
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        format!("'\\x{}'", hex)
    }

    fn operator_sql(&self, op: Operator) -> Option<&'static str> {
        match op {
            Operator::ILike => Some("ILIKE"),
            Operator::NotILike => Some("NOT ILIKE"),
            Operator::Regexp => Some("~"),
            Operator::NotRegexp => Some("!~"),
            Operator::IRegexp => Some("~*"),
            Operator::NotIRegexp => Some("!~*"),
            other => standard_operator(other),
        }
    }

    fn max_limit(&self) -> &'static str {
        "ALL"
    }

    fn needs_nested_json(&self) -> bool {
        true
    }

    fn serial_type(&self, data_type: &str) -> Option<&'static str> {
        match data_type.trim().to_ascii_uppercase().as_str() {
            "INTEGER" | "INT" | "INT4" | "SERIAL" => Some("SERIAL"),
            "BIGINT" | "INT8" | "BIGSERIAL" => Some("BIGSERIAL"),
            "SMALLINT" | "INT2" | "SMALLSERIAL" => Some("SMALLSERIAL"),
            _ => None,
        }
    }

    fn supports_drop_cascade(&self) -> bool {
        true
    }

    fn create_database(&self, name: &str, options: &DatabaseOptions) -> QueryResult<String> {
        if options.guard {
            return Err(QueryError::feature(
                "CREATE DATABASE IF NOT EXISTS",
                self.name(),
            ));
        }
        let mut sql = format!("CREATE DATABASE {}", self.quote_identifier(name));
        if let Some(charset) = &options.charset {
            sql.push_str(&format!(" ENCODING = {}", self.string_literal(charset)));
        }
        if let Some(collate) = &options.collate {
            sql.push_str(&format!(" LC_COLLATE = {}", self.string_literal(collate)));
        }
        sql.push(';');
        Ok(sql)
    }

    fn drop_database(&self, name: &str, options: &DatabaseOptions) -> QueryResult<String> {
        let guard = if options.guard { "IF EXISTS " } else { "" };
        Ok(format!("DROP DATABASE {}{};", guard, self.quote_identifier(name)))
    }

    fn supports_returning(&self) -> bool {
        true
    }
}
