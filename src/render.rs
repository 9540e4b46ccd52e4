//! SQL string rendering
//!
//! This module converts expression trees to SQL text. It is the only
//! place in the crate where SQL strings are constructed.
//!
//! # Architecture
//!
//! - [`Render`] trait: implemented by every node that can render itself
//! - [`SqlRenderer`]: the rendering context, owning the output buffer and
//!   the [`ParamContext`] that numbers placeholders for this pass
//!
//! # Safety
//!
//! Identifiers are always quoted. String values never reach the output
//! buffer: they bind to a placeholder index and render as `$N::text`.

use std::fmt::Write;

use crate::expr::{Expr, Ident, Literal};
use crate::params::{BindValue, ParamContext};

/// Default buffer capacity for rendered queries
const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Trait for nodes that can be rendered to SQL.
///
/// Composite nodes render their children recursively through the same
/// renderer, in declaration order, so placeholder numbering follows the
/// left-to-right shape of the tree.
pub trait Render {
    /// Render this node into the given renderer
    fn render(&self, renderer: &mut SqlRenderer);
}

impl Render for Expr {
    fn render(&self, renderer: &mut SqlRenderer) {
        renderer.render_expr(self);
    }
}

impl Render for Ident {
    fn render(&self, renderer: &mut SqlRenderer) {
        renderer.write_ident(self);
    }
}

/// Rendering context: output buffer plus per-pass placeholder state
pub struct SqlRenderer {
    output: String,
    params: ParamContext,
}

impl SqlRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a new renderer with a specific buffer capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            params: ParamContext::new(),
        }
    }

    /// Clear the output buffer and placeholder state.
    ///
    /// A top-level render calls this first, so reusing one renderer across
    /// renders cannot leak placeholder numbering between passes.
    pub fn reset(&mut self) {
        self.output.clear();
        self.params.reset();
    }

    /// The placeholder state accumulated by this pass
    pub fn params(&self) -> &ParamContext {
        &self.params
    }

    /// Take ownership of the rendered SQL string
    pub fn into_sql(self) -> String {
        self.output
    }

    /// Split into the rendered SQL and the placeholder state
    pub fn into_parts(self) -> (String, ParamContext) {
        (self.output, self.params)
    }

    // =========================================================================
    // Expression rendering
    // =========================================================================

    pub(crate) fn render_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Column(col) => {
                self.write_ident(&col.column);
            }

            Expr::AllColumns(table) => {
                self.write_ident(table);
                self.write(".*");
            }

            Expr::Literal(lit) => self.render_literal(lit),

            Expr::Param(sql_type) => {
                let index = self.params.allocate();
                write!(self.output, "${}", index).unwrap();
                self.write("::");
                self.write(sql_type.as_sql());
            }

            Expr::BinaryOp { left, op, right } => {
                self.write("(");
                self.render_expr(left);
                self.write(" ");
                self.write(op.as_sql());
                self.write(" ");
                self.render_expr(right);
                self.write(")");
            }

            Expr::Comparison { left, op, right } => {
                self.write("(");
                self.render_expr(left);
                self.write(" ");
                self.write(op.as_sql());
                self.write(" ");
                self.render_expr(right);
                self.write(")");
            }

            Expr::IsNull { expr, negated } => {
                self.render_expr(expr);
                if *negated {
                    self.write(" IS NOT NULL");
                } else {
                    self.write(" IS NULL");
                }
            }

            Expr::Aggregate { function, column } => {
                self.write(function.as_sql());
                self.write("(");
                self.write_ident(&column.column);
                self.write(")");
            }

            Expr::FnCall { name } => {
                self.write(name);
                self.write("()");
            }

            Expr::DatePart { field, expr } => {
                self.write("date_part('");
                self.write(field.as_sql());
                self.write("', ");
                self.render_expr(expr);
                self.write(")");
            }

            Expr::DateTrunc { precision, expr } => {
                self.write("date_trunc('");
                self.write(precision.as_sql());
                self.write("', ");
                self.render_expr(expr);
                self.write(")");
            }
        }
    }

    fn render_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Integer(n) => write!(self.output, "{}", n).unwrap(),
            Literal::String(s) => {
                // The value goes into the bind list, never the SQL text.
                let index = self.params.bind(BindValue::String(s.clone()));
                write!(self.output, "${}", index).unwrap();
                self.write("::text");
            }
        }
    }

    pub(crate) fn render_expr_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.render_expr(expr);
        }
    }

    // =========================================================================
    // Low-level output methods
    // =========================================================================

    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_ident(&mut self, ident: &Ident) {
        let quoted = ident.quoted();
        self.output.push_str(&quoted);
    }
}

impl Default for SqlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Convenience functions
// =========================================================================

/// Render a single expression to SQL text.
///
/// Placeholder numbering starts at `$1` for this expression alone; any
/// values bound along the way are discarded with the renderer.
pub fn render_expr(expr: &Expr) -> String {
    let mut renderer = SqlRenderer::new();
    renderer.render_expr(expr);
    renderer.into_sql()
}
