//! SQL expression types
//!
//! This module defines the expression trees a query is built from:
//! columns, literals, parameters, arithmetic, comparisons, null checks,
//! aggregates, and date/time functions. Expressions are immutable value
//! objects; composite nodes own their children, so trees are built
//! bottom-up and never mutated in place.
//!
//! Every expression knows the relations (tables) it reads from, which is
//! how the FROM clause of a query is derived rather than stated.

use crate::quote_ident;
use crate::types::SqlType;

/// A SQL identifier (table name, column name, etc.)
///
/// Identifiers are always quoted when rendered, so special characters in
/// a name cannot break out of the identifier position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(pub String);

impl Ident {
    /// Create a new identifier from any string-like type
    #[inline]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The double-quoted form embedded in SQL text
    pub fn quoted(&self) -> String {
        quote_ident(&self.0)
    }
}

impl From<String> for Ident {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Reference to a column of a named table.
///
/// The column renders on its own (`"name"`); the table surfaces only
/// through relation collection, which is what populates the FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Owning table
    pub table: Ident,
    /// Column name
    pub column: Ident,
}

impl ColumnRef {
    pub fn new(table: impl Into<Ident>, column: impl Into<Ident>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// SQL literal values
///
/// Integer literals render as decimal text; string literals never appear
/// in the SQL text and instead bind their value to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal
    Integer(i64),
    /// String literal, bound at render time
    String(String),
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    /// Get the SQL representation of this operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// Aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Avg,
    Max,
    Min,
    Sum,
}

impl AggregateFunction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
        }
    }
}

/// Fields extractable with `date_part`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Century,
    Day,
    Decade,
    DayOfWeek,
    DayOfYear,
    Epoch,
    Hour,
    IsoDayOfWeek,
    IsoYear,
    Microseconds,
    Millennium,
    Milliseconds,
    Minute,
    Month,
    Quarter,
    Second,
    Timezone,
    TimezoneHour,
    TimezoneMinute,
    Week,
    Year,
}

impl DateField {
    /// The keyword embedded in `date_part('<field>', ...)`
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Century => "century",
            Self::Day => "day",
            Self::Decade => "decade",
            Self::DayOfWeek => "dow",
            Self::DayOfYear => "doy",
            Self::Epoch => "epoch",
            Self::Hour => "hour",
            Self::IsoDayOfWeek => "isodow",
            Self::IsoYear => "isoyear",
            Self::Microseconds => "microseconds",
            Self::Millennium => "millennium",
            Self::Milliseconds => "milliseconds",
            Self::Minute => "minute",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Second => "second",
            Self::Timezone => "timezone",
            Self::TimezoneHour => "timezone_hour",
            Self::TimezoneMinute => "timezone_minute",
            Self::Week => "week",
            Self::Year => "year",
        }
    }
}

/// Precisions accepted by `date_trunc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    Microseconds,
    Milliseconds,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Decade,
    Century,
    Millennium,
}

impl DatePrecision {
    /// The keyword embedded in `date_trunc('<precision>', ...)`
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::Decade => "decade",
            Self::Century => "century",
            Self::Millennium => "millennium",
        }
    }
}

/// The main expression enum encompassing all SQL expression types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference, rendered unqualified: `"name"`
    Column(ColumnRef),

    /// All columns of a table: `"users".*`
    AllColumns(Ident),

    /// Literal value
    Literal(Literal),

    /// Free parameter: renders a placeholder, value supplied at bind time
    Param(SqlType),

    /// Binary arithmetic: `(left op right)`
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// Comparison: `(left op right)`
    Comparison {
        left: Box<Expr>,
        op: ComparisonOperator,
        right: Box<Expr>,
    },

    /// IS NULL / IS NOT NULL
    IsNull { expr: Box<Expr>, negated: bool },

    /// Aggregate function over a single column: `AVG("age")`
    Aggregate {
        function: AggregateFunction,
        column: ColumnRef,
    },

    /// Zero-arity function call: `now()`
    FnCall { name: &'static str },

    /// `date_part('<field>', <expr>)`
    DatePart { field: DateField, expr: Box<Expr> },

    /// `date_trunc('<precision>', <expr>)`
    DateTrunc {
        precision: DatePrecision,
        expr: Box<Expr>,
    },
}

impl Expr {
    // Convenience constructors

    /// Create a column reference
    pub fn column(table: impl Into<Ident>, column: impl Into<Ident>) -> Self {
        Self::Column(ColumnRef::new(table, column))
    }

    /// Create a whole-table wildcard reference (`"table".*`)
    pub fn all_columns(table: impl Into<Ident>) -> Self {
        Self::AllColumns(table.into())
    }

    /// Create an integer literal
    pub fn int(n: i64) -> Self {
        Self::Literal(Literal::Integer(n))
    }

    /// Create a string literal
    ///
    /// The value is never interpolated into SQL text; it binds to a
    /// placeholder when the query renders.
    pub fn string(s: impl Into<String>) -> Self {
        Self::Literal(Literal::String(s.into()))
    }

    /// Create a free parameter with the given cast type
    pub fn param(sql_type: SqlType) -> Self {
        Self::Param(sql_type)
    }

    /// Create a free text parameter (`$N::text`)
    pub fn text_param() -> Self {
        Self::Param(SqlType::text())
    }

    /// Create a binary arithmetic expression
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a comparison expression
    pub fn comparison(left: Expr, op: ComparisonOperator, right: Expr) -> Self {
        Self::Comparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create an aggregate call over a table column
    pub fn aggregate(function: AggregateFunction, column: ColumnRef) -> Self {
        Self::Aggregate { function, column }
    }

    /// `AVG("col")`
    pub fn avg(column: ColumnRef) -> Self {
        Self::aggregate(AggregateFunction::Avg, column)
    }

    /// `MAX("col")`
    pub fn max(column: ColumnRef) -> Self {
        Self::aggregate(AggregateFunction::Max, column)
    }

    /// `MIN("col")`
    pub fn min(column: ColumnRef) -> Self {
        Self::aggregate(AggregateFunction::Min, column)
    }

    /// `SUM("col")`
    pub fn sum(column: ColumnRef) -> Self {
        Self::aggregate(AggregateFunction::Sum, column)
    }

    /// The zero-arity `now()` call
    pub fn now() -> Self {
        Self::FnCall { name: "now" }
    }

    /// `date_part('<field>', <expr>)`
    pub fn date_part(field: DateField, expr: Expr) -> Self {
        Self::DatePart {
            field,
            expr: Box::new(expr),
        }
    }

    /// `date_trunc('<precision>', <expr>)`
    pub fn date_trunc(precision: DatePrecision, expr: Expr) -> Self {
        Self::DateTrunc {
            precision,
            expr: Box::new(expr),
        }
    }

    /// The quoted relations this expression reads from, in traversal order.
    ///
    /// Only column and wildcard nodes carry a table identity; literals,
    /// parameters, and zero-arity calls report none.
    pub fn relations(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_relations(&mut out);
        out
    }

    pub(crate) fn collect_relations(&self, out: &mut Vec<String>) {
        match self {
            Self::Column(col) => out.push(col.table.quoted()),
            Self::AllColumns(table) => out.push(table.quoted()),
            Self::Literal(_) | Self::Param(_) | Self::FnCall { .. } => {}
            Self::BinaryOp { left, right, .. } | Self::Comparison { left, right, .. } => {
                left.collect_relations(out);
                right.collect_relations(out);
            }
            Self::IsNull { expr, .. } => expr.collect_relations(out),
            Self::Aggregate { column, .. } => out.push(column.table.quoted()),
            Self::DatePart { expr, .. } | Self::DateTrunc { expr, .. } => {
                expr.collect_relations(out)
            }
        }
    }
}

/// A boolean-valued expression, the only thing a WHERE clause accepts.
///
/// Constructed exclusively from comparisons and null checks, so a WHERE
/// clause cannot hold a non-predicate expression. Converts into [`Expr`]
/// for use anywhere a plain expression is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate(Expr);

impl Predicate {
    /// `(a = b)`
    pub fn eq(left: Expr, right: Expr) -> Self {
        Self(Expr::comparison(left, ComparisonOperator::Eq, right))
    }

    /// `(a <> b)`
    pub fn not_eq(left: Expr, right: Expr) -> Self {
        Self(Expr::comparison(left, ComparisonOperator::NotEq, right))
    }

    /// `(a < b)`
    pub fn lt(left: Expr, right: Expr) -> Self {
        Self(Expr::comparison(left, ComparisonOperator::Lt, right))
    }

    /// `(a <= b)`
    pub fn lt_eq(left: Expr, right: Expr) -> Self {
        Self(Expr::comparison(left, ComparisonOperator::LtEq, right))
    }

    /// `(a > b)`
    pub fn gt(left: Expr, right: Expr) -> Self {
        Self(Expr::comparison(left, ComparisonOperator::Gt, right))
    }

    /// `(a >= b)`
    pub fn gt_eq(left: Expr, right: Expr) -> Self {
        Self(Expr::comparison(left, ComparisonOperator::GtEq, right))
    }

    /// `expr IS NULL`
    pub fn is_null(expr: Expr) -> Self {
        Self(Expr::IsNull {
            expr: Box::new(expr),
            negated: false,
        })
    }

    /// `expr IS NOT NULL`
    pub fn is_not_null(expr: Expr) -> Self {
        Self(Expr::IsNull {
            expr: Box::new(expr),
            negated: true,
        })
    }

    /// The underlying expression
    pub fn expr(&self) -> &Expr {
        &self.0
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        p.0
    }
}

/// ORDER BY direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An expression paired with its sort direction, owned by ORDER BY
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: OrderDirection,
}

impl OrderByExpr {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Desc,
        }
    }
}
