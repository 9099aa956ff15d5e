//! Ergonomic builder functions for AST nodes.
//!
//! # Example
//! ```
//! use querygen::ast::builders::*;
//! use querygen::ast::SelectQuery;
//!
//! let query = SelectQuery::new("orders")
//!     .column("id")
//!     .aliased(func("COUNT", [col("id")]), "total")
//!     .filter(or([eq("status", "open"), is_null("closed_at")]))
//!     .order_desc("created_at")
//!     .limit(10);
//! assert_eq!(query.attributes.len(), 2);
//! ```

pub mod columns;
pub mod conditions;

pub use columns::{col, func, lit, qualified, raw};
pub use conditions::{
    and, between, cond, eq, gt, gte, is_in, is_null, like, lt, lte, ne, not, not_in, not_like, or,
    raw_cond, regexp,
};
