//! Placeholder allocation and bind-value resolution
//!
//! Rendering a query allocates one 1-based placeholder index per
//! parameter, in the order parameters are encountered. Indices backed by a
//! string literal record their value here at render time; free-parameter
//! indices record nothing and are satisfied by caller-supplied values when
//! the final bind list is resolved.

use std::collections::BTreeMap;

use crate::error::BindError;

/// A value handed to the database client alongside the rendered SQL
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// JSON value (stored as serde_json::Value)
    Json(serde_json::Value),
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for BindValue {
    fn from(n: i32) -> Self {
        Self::Integer(n as i64)
    }
}

impl From<f64> for BindValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<serde_json::Value> for BindValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Allocates placeholder indices during a render pass and resolves the
/// final bind list afterwards.
///
/// Indices are 1-based (`$1`, `$2`, ...) and strictly increasing within
/// one pass, with no gaps or reuse. The map of recorded values is sparse:
/// only indices backed by a bound literal have an entry.
#[derive(Debug, Default)]
pub struct ParamContext {
    next_index: usize,
    bound: BTreeMap<usize, BindValue>,
}

impl ParamContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next placeholder index without recording a value.
    ///
    /// Used by free parameters, whose value arrives at bind time.
    pub fn allocate(&mut self) -> usize {
        self.next_index += 1;
        self.next_index
    }

    /// Allocate the next placeholder index and record `value` against it.
    ///
    /// Used by string literals, whose value is known at build time.
    pub fn bind(&mut self, value: BindValue) -> usize {
        let index = self.allocate();
        self.bound.insert(index, value);
        index
    }

    /// Clear the counter and all recorded values.
    ///
    /// Called at the start of every top-level render so repeated renders
    /// of the same query produce identical placeholder numbering.
    pub fn reset(&mut self) {
        self.next_index = 0;
        self.bound.clear();
    }

    /// Total placeholders allocated in this pass
    pub fn count(&self) -> usize {
        self.next_index
    }

    /// Placeholders that must be satisfied by external inputs
    pub fn free_count(&self) -> usize {
        self.next_index - self.bound.len()
    }

    /// Check if no placeholders have been allocated
    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    /// Produce the ordered bind list for the rendered SQL.
    ///
    /// Walks indices `1..=count`: an index with a recorded value emits it,
    /// any other index consumes the next external input in order. The
    /// external inputs must therefore match the free parameters one for
    /// one, left to right as they appear in the SQL; any arity mismatch is
    /// an error rather than a silently short or misaligned bind list.
    pub fn resolve<I>(&self, inputs: I) -> Result<Vec<BindValue>, BindError>
    where
        I: IntoIterator,
        I::Item: Into<BindValue>,
    {
        let expected = self.free_count();
        let mut inputs = inputs.into_iter();
        let mut supplied = 0;

        let mut values = Vec::with_capacity(self.next_index);
        for index in 1..=self.next_index {
            match self.bound.get(&index) {
                Some(value) => values.push(value.clone()),
                None => match inputs.next() {
                    Some(input) => {
                        supplied += 1;
                        values.push(input.into());
                    }
                    None => return Err(BindError::NotEnoughValues { expected, supplied }),
                },
            }
        }

        let leftover = inputs.count();
        if leftover > 0 {
            return Err(BindError::TooManyValues {
                expected,
                supplied: supplied + leftover,
            });
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_one_based_and_increasing() {
        let mut ctx = ParamContext::new();
        assert_eq!(ctx.allocate(), 1);
        assert_eq!(ctx.bind(BindValue::String("hello".into())), 2);
        assert_eq!(ctx.allocate(), 3);
        assert_eq!(ctx.count(), 3);
        assert_eq!(ctx.free_count(), 2);
    }

    #[test]
    fn test_reset_clears_counter_and_values() {
        let mut ctx = ParamContext::new();
        ctx.bind(BindValue::Integer(1));
        ctx.allocate();
        ctx.reset();
        assert!(ctx.is_empty());
        assert_eq!(ctx.allocate(), 1);
    }

    #[test]
    fn test_resolve_merges_bound_and_external() {
        let mut ctx = ParamContext::new();
        ctx.bind(BindValue::String("Hello".into()));
        ctx.allocate();
        ctx.allocate();
        ctx.bind(BindValue::Integer(7));

        let values = ctx.resolve(vec!["Joe", "Jane"]).unwrap();
        assert_eq!(
            values,
            vec![
                BindValue::String("Hello".into()),
                BindValue::String("Joe".into()),
                BindValue::String("Jane".into()),
                BindValue::Integer(7),
            ]
        );
    }

    #[test]
    fn test_resolve_under_supply_fails() {
        let mut ctx = ParamContext::new();
        ctx.allocate();
        ctx.allocate();

        let err = ctx.resolve(vec!["only one"]).unwrap_err();
        assert_eq!(
            err,
            BindError::NotEnoughValues {
                expected: 2,
                supplied: 1,
            }
        );
    }

    #[test]
    fn test_resolve_over_supply_fails() {
        let mut ctx = ParamContext::new();
        ctx.allocate();

        let err = ctx.resolve(vec!["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            BindError::TooManyValues {
                expected: 1,
                supplied: 3,
            }
        );
    }

    #[test]
    fn test_bind_value_from() {
        let _: BindValue = true.into();
        let _: BindValue = "hello".into();
        let _: BindValue = 42i32.into();
        let _: BindValue = 42i64.into();
        let _: BindValue = 3.14f64.into();
        let _: BindValue = None::<i32>.into();
        let _: BindValue = Some(42i32).into();
        let _: BindValue = serde_json::json!({"k": 1}).into();
    }
}
