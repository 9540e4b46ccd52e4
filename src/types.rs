//! Cast targets for placeholders.
//!
//! Every placeholder renders with a type cast (`$1::text`) so PostgreSQL
//! does not have to infer the parameter's type from context.

/// A SQL type used as the cast suffix of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlType {
    /// Type name as it appears after `::` (e.g. "text", "integer")
    pub name: String,
}

impl SqlType {
    /// Create a type from its SQL name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// PostgreSQL `text`
    pub fn text() -> Self {
        Self::new("text")
    }

    /// PostgreSQL `integer`
    pub fn integer() -> Self {
        Self::new("integer")
    }

    /// PostgreSQL `bigint`
    pub fn bigint() -> Self {
        Self::new("bigint")
    }

    /// PostgreSQL `boolean`
    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    /// PostgreSQL `numeric`
    pub fn numeric() -> Self {
        Self::new("numeric")
    }

    /// PostgreSQL `timestamptz`
    pub fn timestamptz() -> Self {
        Self::new("timestamptz")
    }

    /// PostgreSQL `date`
    pub fn date() -> Self {
        Self::new("date")
    }

    /// PostgreSQL `jsonb`
    pub fn jsonb() -> Self {
        Self::new("jsonb")
    }

    /// The name rendered after `::`
    pub fn as_sql(&self) -> &str {
        &self.name
    }
}

impl Default for SqlType {
    fn default() -> Self {
        Self::text()
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
