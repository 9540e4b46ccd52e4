//! Typed builder for parameterized PostgreSQL SELECT queries.
//!
//! Queries are composed from immutable expression trees and rendered to a
//! SQL string plus an ordered list of bind values. The crate never executes
//! anything: the rendered text and values are handed off to whatever
//! database client the application uses.
//!
//! # Architecture
//!
//! - `expr`: expression trees (columns, literals, operators, aggregates,
//!   date functions) and the [`Predicate`] refinement used by WHERE
//! - `stmt`: clause types and the [`SelectQuery`] assembly
//! - `params`: placeholder allocation and bind-value resolution
//! - `render`: SQL string generation
//! - `types`: cast targets for placeholders
//!
//! # Safety
//!
//! Identifiers are always quoted with PostgreSQL's quoting rules, and
//! string values never appear in the SQL text: every string literal or
//! free parameter renders as a `$N` placeholder, so the output is safe to
//! pass to a parameterized-query API as-is.
//!
//! # Example
//!
//! ```
//! use pg_select::{Expr, OrderByExpr, Predicate, SelectQuery};
//!
//! let query = SelectQuery::new(vec![
//!     Expr::column("users", "name"),
//!     Expr::column("users", "email"),
//! ])
//! .with_where(vec![Predicate::eq(
//!     Expr::column("users", "city"),
//!     Expr::text_param(),
//! )])
//! .with_order_by(vec![OrderByExpr::desc(Expr::column("users", "height"))]);
//!
//! assert_eq!(
//!     query.to_sql(),
//!     r#"SELECT "name", "email" FROM "users" WHERE ("city" = $1::text) ORDER BY "height" DESC"#,
//! );
//!
//! let values = query.bindings(vec!["Paris"]).unwrap();
//! assert_eq!(values.len(), 1);
//! ```
//!
//! Rendering the same query value twice produces byte-identical SQL:
//! placeholder numbering starts over on every render, so a query can be
//! rendered and bound any number of times. A query is immutable once built
//! and can be shared freely across threads.

mod error;
mod expr;
mod params;
mod render;
mod stmt;
mod types;

pub use error::*;
pub use expr::*;
pub use params::*;
pub use render::*;
pub use stmt::*;
pub use types::*;

/// Quote a SQL identifier (table or column name).
///
/// Wraps the name in double quotes and doubles any embedded quote
/// characters, so arbitrary identifiers embed safely in SQL text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests;
