use indexmap::IndexMap;

use crate::ast::{ColumnDefinition, DropTableOptions, Expr, TableOptions};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::params::{CompileContext, Settings};
use crate::transpiler::projection::compile_expr;
use crate::transpiler::traits::SqlGenerator;

/// Generate the column clause (everything after the column name).
pub fn build_attribute(generator: &dyn SqlGenerator, def: &ColumnDefinition) -> QueryResult<String> {
    column_clause(generator, def, true)
}

/// Column clauses keyed by column name, in input order.
pub fn build_attributes(
    generator: &dyn SqlGenerator,
    columns: &IndexMap<String, ColumnDefinition>,
) -> QueryResult<IndexMap<String, String>> {
    columns
        .iter()
        .map(|(name, def)| -> QueryResult<(String, String)> {
            Ok((name.clone(), build_attribute(generator, def)?))
        })
        .collect()
}

/// Fixed order: type, NOT NULL, auto-increment, DEFAULT, UNIQUE, PRIMARY KEY,
/// COMMENT, AFTER, REFERENCES, ON DELETE, ON UPDATE.
fn column_clause(
    generator: &dyn SqlGenerator,
    def: &ColumnDefinition,
    inline_primary_key: bool,
) -> QueryResult<String> {
    let mut data_type = def.data_type.trim().to_string();
    if data_type.is_empty() {
        return Err(QueryError::invalid("column definition without a type"));
    }

    let mut auto_increment_keyword = None;
    if def.auto_increment {
        if let Some(serial) = generator.serial_type(&data_type) {
            data_type = serial.to_string();
        } else if let Some(keyword) = generator.auto_increment_keyword() {
            auto_increment_keyword = Some(keyword);
        } else {
            return Err(QueryError::feature(
                format!("auto-increment on {}", data_type),
                generator.name(),
            ));
        }
    }
    let trailing_auto_increment = generator.auto_increment_after_primary_key();
    let primary_key = def.primary_key && inline_primary_key;

    let mut sql = data_type.clone();
    if !def.allow_null {
        sql.push_str(" NOT NULL");
    }
    if let Some(keyword) = auto_increment_keyword.filter(|_| !trailing_auto_increment) {
        sql.push(' ');
        sql.push_str(keyword);
    }
    if let Some(default) = &def.default {
        if !generator.forbids_default(&data_type) {
            sql.push_str(&format!(" DEFAULT {}", default_sql(generator, default)?));
        }
    }
    if def.unique {
        sql.push_str(" UNIQUE");
    }
    if primary_key {
        sql.push_str(" PRIMARY KEY");
    }
    if let Some(keyword) = auto_increment_keyword.filter(|_| trailing_auto_increment) {
        if !primary_key {
            return Err(QueryError::feature(
                format!("{} without an inline PRIMARY KEY", keyword),
                generator.name(),
            ));
        }
        sql.push(' ');
        sql.push_str(keyword);
    }
    if let Some(comment) = &def.comment {
        if !generator.supports_inline_comment() {
            return Err(QueryError::feature("column COMMENT", generator.name()));
        }
        sql.push_str(&format!(" COMMENT {}", generator.string_literal(comment)));
    }
    if let Some(after) = &def.after {
        if !generator.supports_column_placement() {
            return Err(QueryError::feature("column AFTER", generator.name()));
        }
        sql.push_str(&format!(" AFTER {}", generator.quote_identifier(after)));
    }
    if let Some(references) = &def.references {
        sql.push_str(&format!(" REFERENCES {}", generator.quote_path(&references.table)));
        if let Some(key) = &references.key {
            sql.push_str(&format!(" ({})", generator.quote_identifier(key)));
        }
        if let Some(action) = def.on_delete {
            sql.push_str(&format!(" ON DELETE {}", action));
        }
        if let Some(action) = def.on_update {
            sql.push_str(&format!(" ON UPDATE {}", action));
        }
    }
    Ok(sql)
}

fn default_sql(generator: &dyn SqlGenerator, default: &Expr) -> QueryResult<String> {
    match default {
        Expr::Literal(value) => generator.escape_literal(value),
        Expr::Raw(sql) => Ok(sql.clone()),
        Expr::FunctionCall { .. } => {
            let mut ctx = CompileContext::new(generator, Settings::default());
            compile_expr(&mut ctx, default)
        }
        Expr::Column { name, .. } => Err(QueryError::invalid(format!(
            "column reference {} cannot be a default value",
            name
        ))),
    }
}

/// Generate CREATE TABLE SQL.
pub fn build_create_table(
    generator: &dyn SqlGenerator,
    table: &str,
    columns: &IndexMap<String, ColumnDefinition>,
    options: &TableOptions,
) -> QueryResult<String> {
    if columns.is_empty() {
        return Err(QueryError::invalid(format!("table {} has no columns", table)));
    }
    let primary_keys: Vec<&str> = columns
        .iter()
        .filter(|(_, def)| def.primary_key)
        .map(|(name, _)| name.as_str())
        .collect();
    let composite = primary_keys.len() > 1;

    let mut defs = Vec::with_capacity(columns.len() + 1);
    for (name, def) in columns {
        defs.push(format!(
            "{} {}",
            generator.quote_identifier(name),
            column_clause(generator, def, !composite)?
        ));
    }

    if composite {
        defs.push(format!("PRIMARY KEY ({})", quote_list(generator, &primary_keys)));
    }

    for key in &options.unique_keys {
        if key.fields.is_empty() {
            return Err(QueryError::invalid("unique key without fields"));
        }
        let fields: Vec<&str> = key.fields.iter().map(String::as_str).collect();
        let constraint = match &key.name {
            Some(name) => format!("CONSTRAINT {} ", generator.quote_identifier(name)),
            None => String::new(),
        };
        defs.push(format!("{}UNIQUE ({})", constraint, quote_list(generator, &fields)));
    }

    let mut sql = String::from("CREATE TABLE ");
    if options.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&generator.quote_path(table));
    sql.push_str(&format!(" ({})", defs.join(", ")));
    sql.push_str(&generator.table_options(options)?);
    sql.push(';');
    Ok(sql)
}

/// Generate DROP TABLE SQL.
pub fn build_drop_table(
    generator: &dyn SqlGenerator,
    table: &str,
    options: &DropTableOptions,
) -> QueryResult<String> {
    let mut sql = String::from("DROP TABLE ");
    if options.if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&generator.quote_path(table));
    if options.cascade {
        if !generator.supports_drop_cascade() {
            return Err(QueryError::feature("DROP TABLE ... CASCADE", generator.name()));
        }
        sql.push_str(" CASCADE");
    }
    sql.push(';');
    Ok(sql)
}

/// ALTER TABLE ... ADD COLUMN.
pub fn build_add_column(
    generator: &dyn SqlGenerator,
    table: &str,
    column: &str,
    def: &ColumnDefinition,
) -> QueryResult<String> {
    Ok(format!(
        "ALTER TABLE {} ADD COLUMN {} {};",
        generator.quote_path(table),
        generator.quote_identifier(column),
        build_attribute(generator, def)?
    ))
}

/// ALTER TABLE ... DROP COLUMN.
pub fn build_remove_column(generator: &dyn SqlGenerator, table: &str, column: &str) -> String {
    format!(
        "ALTER TABLE {} DROP COLUMN {};",
        generator.quote_path(table),
        generator.quote_identifier(column)
    )
}

fn quote_list(generator: &dyn SqlGenerator, names: &[&str]) -> String {
    names
        .iter()
        .map(|n| generator.quote_identifier(n))
        .collect::<Vec<_>>()
        .join(", ")
}
