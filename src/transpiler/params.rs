use indexmap::IndexMap;

use crate::ast::{TableMeta, Value};
use crate::error::QueryResult;
use crate::transpiler::traits::SqlGenerator;

/// Values collected for parameterized query building.
#[derive(Debug, Default)]
pub struct BindCollector {
    /// Bound values keyed by 1-based ordinal ("1", "2", ...)
    params: IndexMap<String, Value>,
}

impl BindCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: Value, generator: &dyn SqlGenerator) -> String {
        let index = self.params.len() + 1;
        self.params.insert(index.to_string(), value);
        generator.placeholder(index)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.params
    }
}

/// Effective per-call flags (generator config merged with `QueryOptions`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub bind_parameters: bool,
    pub omit_null: bool,
}

/// State threaded through one compilation.
pub struct CompileContext<'a> {
    pub generator: &'a dyn SqlGenerator,
    pub settings: Settings,
    pub binds: BindCollector,
    /// Table whose declared attributes and qualifier apply
    pub table: Option<&'a TableMeta>,
    /// Prefix unqualified columns with the table qualifier
    pub qualify: bool,
}

impl<'a> CompileContext<'a> {
    pub fn new(generator: &'a dyn SqlGenerator, settings: Settings) -> Self {
        Self {
            generator,
            settings,
            binds: BindCollector::new(),
            table: None,
            qualify: false,
        }
    }

    pub fn with_table(mut self, table: &'a TableMeta) -> Self {
        self.table = Some(table);
        self
    }

    /// Emit a literal: placeholder in bind mode, escaped text otherwise.
    /// NULL is always inline.
    pub fn literal(&mut self, value: &Value) -> QueryResult<String> {
        match value {
            Value::Null => Ok("NULL".to_string()),
            Value::Array(items) if self.settings.bind_parameters => {
                let parts = items
                    .iter()
                    .map(|v| self.literal(v))
                    .collect::<QueryResult<Vec<_>>>()?;
                Ok(format!("({})", parts.join(", ")))
            }
            v if self.settings.bind_parameters => Ok(self.bind(v.clone())),
            v => self.generator.escape_literal(v),
        }
    }

    /// Always bind, whatever the mode.
    pub fn bind(&mut self, value: Value) -> String {
        self.binds.add_param(value, self.generator)
    }

    pub fn quote(&self, name: &str) -> String {
        self.generator.quote_identifier(name)
    }

    pub fn finish(self) -> IndexMap<String, Value> {
        self.binds.into_map()
    }
}
