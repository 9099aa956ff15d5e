//! # querygen
//!
//! Dialect-aware SQL generation: structured query descriptors in,
//! injection-safe SQL (plus bind values) out.
//!
//! ## Quick Example
//!
//! ```
//! use querygen::prelude::*;
//!
//! let query = SelectQuery::new("users")
//!     .column("id")
//!     .column("email")
//!     .filter(eq("active", true))
//!     .order_desc("created_at")
//!     .limit(10);
//!
//! let generator = QueryGenerator::new(Dialect::MySQL);
//! let compiled = generator.select_query(&query, &QueryOptions::bind()).unwrap();
//! assert_eq!(
//!     compiled.query,
//!     "SELECT `id`, `email` FROM `users` WHERE `users`.`active` = ? ORDER BY `created_at` DESC LIMIT 10;"
//! );
//! assert_eq!(compiled.bind["1"], Value::Bool(true));
//! ```
//!
//! ## Dialects
//!
//! | Dialect  | Identifiers | Placeholders | Booleans     |
//! |----------|-------------|--------------|--------------|
//! | MySQL    | `` `x` ``   | `?`          | `true/false` |
//! | MariaDB  | `` `x` ``   | `?`          | `true/false` |
//! | Postgres | `"x"`       | `$n`         | `true/false` |
//! | SQLite   | `"x"`       | `?`          | `1/0`        |

pub mod ast;
pub mod config;
pub mod error;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::config::{GeneratorConfig, QueryOptions};
    pub use crate::error::*;
    pub use crate::transpiler::{CompiledQuery, Dialect, QueryGenerator, ToSql};
}

pub use config::{GeneratorConfig, QueryOptions};
pub use error::{QueryError, QueryResult};
pub use transpiler::{CompiledQuery, Dialect, QueryGenerator};
