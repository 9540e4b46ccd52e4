//! Clause types and query assembly
//!
//! A [`SelectQuery`] holds one clause of each kind. The FROM clause is
//! never stated: it is derived from the relations the other clauses
//! reference, deduplicated in first-seen order. Builder methods consume
//! the query and return a new value with that one clause replaced, so
//! queries are immutable once built.

use indexmap::IndexSet;
use tracing::debug;

use crate::error::BindError;
use crate::expr::{Expr, OrderByExpr, Predicate};
use crate::params::BindValue;
use crate::render::{Render, SqlRenderer};

/// The SELECT list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectList {
    pub exprs: Vec<Expr>,
}

impl SelectList {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self { exprs }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub(crate) fn collect_relations(&self, out: &mut Vec<String>) {
        for expr in &self.exprs {
            expr.collect_relations(out);
        }
    }
}

impl Render for SelectList {
    fn render(&self, renderer: &mut SqlRenderer) {
        if self.is_empty() {
            return;
        }
        renderer.write("SELECT ");
        renderer.render_expr_list(&self.exprs);
    }
}

/// The WHERE clause: predicates conjoined with AND
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    pub predicates: Vec<Predicate>,
}

impl WhereClause {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub(crate) fn collect_relations(&self, out: &mut Vec<String>) {
        for pred in &self.predicates {
            pred.expr().collect_relations(out);
        }
    }
}

impl Render for WhereClause {
    fn render(&self, renderer: &mut SqlRenderer) {
        if self.is_empty() {
            return;
        }
        renderer.write("WHERE ");
        for (i, pred) in self.predicates.iter().enumerate() {
            if i > 0 {
                renderer.write(" AND ");
            }
            pred.expr().render(renderer);
        }
    }
}

/// The GROUP BY clause
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupByClause {
    pub exprs: Vec<Expr>,
}

impl GroupByClause {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self { exprs }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub(crate) fn collect_relations(&self, out: &mut Vec<String>) {
        for expr in &self.exprs {
            expr.collect_relations(out);
        }
    }
}

impl Render for GroupByClause {
    fn render(&self, renderer: &mut SqlRenderer) {
        if self.is_empty() {
            return;
        }
        renderer.write("GROUP BY ");
        renderer.render_expr_list(&self.exprs);
    }
}

/// The ORDER BY clause
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderByClause {
    pub keys: Vec<OrderByExpr>,
}

impl OrderByClause {
    pub fn new(keys: Vec<OrderByExpr>) -> Self {
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn collect_relations(&self, out: &mut Vec<String>) {
        for key in &self.keys {
            key.expr.collect_relations(out);
        }
    }
}

impl Render for OrderByClause {
    fn render(&self, renderer: &mut SqlRenderer) {
        if self.is_empty() {
            return;
        }
        renderer.write("ORDER BY ");
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                renderer.write(", ");
            }
            key.expr.render(renderer);
            renderer.write(" ");
            renderer.write(key.direction.as_sql());
        }
    }
}

/// A SELECT query with all its clauses.
///
/// Built with [`SelectQuery::new`] and the `with_*` methods, each of
/// which replaces its whole clause; calling one a second time discards
/// the first clause rather than merging into it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    select: SelectList,
    where_clause: WhereClause,
    group_by: GroupByClause,
    order_by: OrderByClause,
}

impl SelectQuery {
    /// Create a query from the expressions of its SELECT list
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self {
            select: SelectList::new(exprs),
            ..Default::default()
        }
    }

    /// Replace the WHERE clause
    pub fn with_where(mut self, predicates: Vec<Predicate>) -> Self {
        self.where_clause = WhereClause::new(predicates);
        self
    }

    /// Replace the GROUP BY clause
    pub fn with_group_by(mut self, exprs: Vec<Expr>) -> Self {
        self.group_by = GroupByClause::new(exprs);
        self
    }

    /// Replace the ORDER BY clause
    pub fn with_order_by(mut self, keys: Vec<OrderByExpr>) -> Self {
        self.order_by = OrderByClause::new(keys);
        self
    }

    /// The derived FROM list: relations referenced by the select list,
    /// WHERE, GROUP BY, and ORDER BY clauses in that order, deduplicated
    /// preserving first occurrence.
    pub fn from_relations(&self) -> IndexSet<String> {
        let mut collected = Vec::new();
        self.select.collect_relations(&mut collected);
        self.where_clause.collect_relations(&mut collected);
        self.group_by.collect_relations(&mut collected);
        self.order_by.collect_relations(&mut collected);
        collected.into_iter().collect()
    }

    /// Render into `renderer` as a top-level query.
    ///
    /// Resets the renderer first, so placeholder numbering always starts
    /// at `$1` and repeated renders of the same query are identical.
    pub fn render_into(&self, renderer: &mut SqlRenderer) {
        renderer.reset();
        self.render(renderer);
    }

    /// Render the full SQL text.
    ///
    /// An empty query (no SELECT expressions) renders to the empty
    /// string.
    pub fn to_sql(&self) -> String {
        let mut renderer = SqlRenderer::new();
        self.render_into(&mut renderer);
        let (sql, params) = renderer.into_parts();
        debug!(sql = %sql, placeholders = params.count(), "rendered select query");
        sql
    }

    /// Resolve the ordered bind-value list for the rendered SQL.
    ///
    /// `inputs` supplies one value per free parameter, in the order the
    /// parameters appear left to right in the SQL text. Values bound at
    /// build time (string literals) occupy their own placeholder slots
    /// without consuming inputs.
    pub fn bindings<I>(&self, inputs: I) -> Result<Vec<BindValue>, BindError>
    where
        I: IntoIterator,
        I::Item: Into<BindValue>,
    {
        let mut renderer = SqlRenderer::new();
        self.render_into(&mut renderer);
        let (_, params) = renderer.into_parts();
        let values = params.resolve(inputs)?;
        debug!(
            bound = params.count() - params.free_count(),
            free = params.free_count(),
            "resolved bind values"
        );
        Ok(values)
    }
}

impl Render for SelectQuery {
    fn render(&self, renderer: &mut SqlRenderer) {
        if self.select.is_empty() {
            return;
        }

        self.select.render(renderer);

        let relations = self.from_relations();
        if !relations.is_empty() {
            renderer.write(" FROM ");
            for (i, relation) in relations.iter().enumerate() {
                if i > 0 {
                    renderer.write(", ");
                }
                renderer.write(relation);
            }
        }

        if !self.where_clause.is_empty() {
            renderer.write(" ");
            self.where_clause.render(renderer);
        }

        if !self.group_by.is_empty() {
            renderer.write(" ");
            self.group_by.render(renderer);
        }

        if !self.order_by.is_empty() {
            renderer.write(" ");
            self.order_by.render(renderer);
        }
    }
}
