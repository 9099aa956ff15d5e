//! SQL generation for query descriptors.
//!
//! [`QueryGenerator`] is the entry point: it owns the dialect's
//! [`SqlGenerator`] and the instance configuration, and exposes one method per
//! statement kind. Every method is pure; per-call flags come in through
//! [`QueryOptions`].

pub mod conditions;
pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod operators;
pub mod params;
pub mod projection;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::{
    ArithmeticOp, ColumnDefinition, DatabaseOptions, DeleteOptions, DropTableOptions,
    InsertOptions, Predicate, Row, SelectQuery, TableOptions, UpdateOptions, Value,
};
use crate::config::{GeneratorConfig, QueryOptions};
use crate::error::QueryResult;
use params::Settings;

pub use dialect::Dialect;
pub use params::BindCollector;
pub use traits::SqlGenerator;

/// Compiled statement: SQL text plus bind values keyed by ordinal.
/// `bind` is empty when literals were inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub query: String,
    pub bind: IndexMap<String, Value>,
}

impl CompiledQuery {
    /// Bind values in placeholder order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.bind.values()
    }
}

impl std::fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.query)
    }
}

/// Trait for converting descriptors to SQL.
pub trait ToSql {
    /// Compile with the default dialect and inline literals.
    fn to_sql(&self) -> QueryResult<CompiledQuery> {
        self.to_sql_with_dialect(Dialect::default())
    }
    /// Compile with a specific dialect and inline literals.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> QueryResult<CompiledQuery>;
}

impl ToSql for SelectQuery {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> QueryResult<CompiledQuery> {
        QueryGenerator::new(dialect).select_query(self, &QueryOptions::default())
    }
}

/// Dialect-bound query generator. Immutable after construction.
pub struct QueryGenerator {
    config: GeneratorConfig,
    generator: Box<dyn SqlGenerator>,
}

impl QueryGenerator {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_config(GeneratorConfig::new(dialect))
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        let generator = config.dialect.generator();
        Self { config, generator }
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn sql_generator(&self) -> &dyn SqlGenerator {
        self.generator.as_ref()
    }

    fn settings(&self, options: &QueryOptions) -> Settings {
        Settings {
            bind_parameters: options
                .bind_parameters
                .unwrap_or(self.config.bind_parameters),
            omit_null: options.omit_null.unwrap_or(self.config.omit_null),
        }
    }

    fn log_compiled(&self, kind: &str, table: &str, sql: &str, binds: usize) {
        tracing::debug!("Compiled {} on '{}' for {}", kind, table, self.config.dialect);
        tracing::trace!("{} ({} bind values)", sql, binds);
    }

    fn logged(&self, kind: &str, table: &str, compiled: CompiledQuery) -> CompiledQuery {
        self.log_compiled(kind, table, &compiled.query, compiled.bind.len());
        compiled
    }

    fn logged_sql(&self, kind: &str, table: &str, sql: String) -> String {
        self.log_compiled(kind, table, &sql, 0);
        sql
    }

    // ---- Escaper ----

    /// Quote one identifier; dots are part of the name.
    pub fn quote_identifier(&self, name: &str) -> String {
        self.generator.quote_identifier(name)
    }

    /// Quote a dotted path segment by segment.
    pub fn quote_path(&self, name: &str) -> String {
        self.generator.quote_path(name)
    }

    /// Render a value as an inline SQL literal.
    pub fn escape(&self, value: &Value) -> QueryResult<String> {
        self.generator.escape_literal(value)
    }

    // ---- DML ----

    pub fn select_query(
        &self,
        query: &SelectQuery,
        options: &QueryOptions,
    ) -> QueryResult<CompiledQuery> {
        let compiled =
            dml::select::build_select(self.generator.as_ref(), query, self.settings(options))?;
        Ok(self.logged("SELECT", &query.table.name, compiled))
    }

    pub fn insert_query(
        &self,
        table: &str,
        row: &Row,
        insert: &InsertOptions,
        options: &QueryOptions,
    ) -> QueryResult<CompiledQuery> {
        let compiled = dml::insert::build_insert(
            self.generator.as_ref(),
            table,
            row,
            insert,
            self.settings(options),
        )?;
        Ok(self.logged("INSERT", table, compiled))
    }

    /// Multi-row INSERT with inline literals.
    pub fn bulk_insert_query(
        &self,
        table: &str,
        rows: &[Row],
        insert: &InsertOptions,
    ) -> QueryResult<String> {
        let sql = dml::insert::build_bulk_insert(self.generator.as_ref(), table, rows, insert)?;
        Ok(self.logged_sql("bulk INSERT", table, sql))
    }

    pub fn update_query(
        &self,
        table: &str,
        values: &Row,
        where_clause: Option<&Predicate>,
        update: &UpdateOptions,
        options: &QueryOptions,
    ) -> QueryResult<CompiledQuery> {
        let compiled = dml::update::build_update(
            self.generator.as_ref(),
            table,
            values,
            where_clause,
            update,
            self.settings(options),
        )?;
        Ok(self.logged("UPDATE", table, compiled))
    }

    /// Increment (`Add`) or decrement (`Sub`) columns in place.
    pub fn arithmetic_query(
        &self,
        op: ArithmeticOp,
        table: &str,
        where_clause: Option<&Predicate>,
        increments: &IndexMap<String, Value>,
        extra: &Row,
        options: &QueryOptions,
    ) -> QueryResult<CompiledQuery> {
        let compiled = dml::update::build_arithmetic(
            self.generator.as_ref(),
            op,
            table,
            where_clause,
            increments,
            extra,
            self.settings(options),
        )?;
        Ok(self.logged("arithmetic UPDATE", table, compiled))
    }

    pub fn delete_query(
        &self,
        table: &str,
        where_clause: Option<&Predicate>,
        delete: &DeleteOptions,
        options: &QueryOptions,
    ) -> QueryResult<CompiledQuery> {
        let compiled = dml::delete::build_delete(
            self.generator.as_ref(),
            table,
            where_clause,
            delete,
            self.settings(options),
        )?;
        Ok(self.logged("DELETE", table, compiled))
    }

    pub fn truncate_table_query(&self, table: &str) -> String {
        self.logged_sql("TRUNCATE", table, self.generator.truncate_table(table))
    }

    // ---- DDL ----

    pub fn attribute_to_sql(&self, definition: &ColumnDefinition) -> QueryResult<String> {
        ddl::build_attribute(self.generator.as_ref(), definition)
    }

    pub fn attributes_to_sql(
        &self,
        columns: &IndexMap<String, ColumnDefinition>,
    ) -> QueryResult<IndexMap<String, String>> {
        ddl::build_attributes(self.generator.as_ref(), columns)
    }

    pub fn create_table_query(
        &self,
        table: &str,
        columns: &IndexMap<String, ColumnDefinition>,
        options: &TableOptions,
    ) -> QueryResult<String> {
        let sql = ddl::build_create_table(self.generator.as_ref(), table, columns, options)?;
        Ok(self.logged_sql("CREATE TABLE", table, sql))
    }

    pub fn drop_table_query(&self, table: &str, options: &DropTableOptions) -> QueryResult<String> {
        let sql = ddl::build_drop_table(self.generator.as_ref(), table, options)?;
        Ok(self.logged_sql("DROP TABLE", table, sql))
    }

    pub fn add_column_query(
        &self,
        table: &str,
        column: &str,
        definition: &ColumnDefinition,
    ) -> QueryResult<String> {
        let sql = ddl::build_add_column(self.generator.as_ref(), table, column, definition)?;
        Ok(self.logged_sql("ADD COLUMN", table, sql))
    }

    pub fn remove_column_query(&self, table: &str, column: &str) -> String {
        let sql = ddl::build_remove_column(self.generator.as_ref(), table, column);
        self.logged_sql("DROP COLUMN", table, sql)
    }

    pub fn create_database_query(
        &self,
        name: &str,
        options: &DatabaseOptions,
    ) -> QueryResult<String> {
        let sql = self.generator.create_database(name, options)?;
        Ok(self.logged_sql("CREATE DATABASE", name, sql))
    }

    pub fn drop_database_query(&self, name: &str, options: &DatabaseOptions) -> QueryResult<String> {
        let sql = self.generator.drop_database(name, options)?;
        Ok(self.logged_sql("DROP DATABASE", name, sql))
    }
}

impl std::fmt::Debug for QueryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryGenerator")
            .field("config", &self.config)
            .finish()
    }
}
