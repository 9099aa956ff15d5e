//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: SELECT composition, predicates, bind ordering, UPDATE/DELETE/INSERT
//! - `dialects`: quoting, escaping, operators and pagination per dialect
//! - `features`: DDL, bulk insert, duplicate handling, arithmetic updates
//! - `json`: the nested-JSON rewrite

mod dialects;
mod json;
