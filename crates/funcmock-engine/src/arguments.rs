//! Argument and result lists as seen by the engine.

use std::fmt::Write as _;

use funcmock_core::{ConversionError, Slot, Value};

use crate::matcher::Matcher;

/// Ordered list of boxed values: the arguments of a call or the results of
/// an expectation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments(Vec<Value>);

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Get the value at `index` converted to `T`.
    ///
    /// A missing index is reported as a null value.
    pub fn get_as<T: Slot>(&self, index: usize) -> Result<T, ConversionError> {
        T::from_value(self.0.get(index).unwrap_or(&Value::Null))
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    /// Compare against a matcher list.
    ///
    /// Returns a per-position report and the number of differences. A
    /// position present on only one side counts as a difference.
    pub fn diff(&self, matchers: &[Matcher]) -> (String, usize) {
        let mut report = String::new();
        let mut differences = 0;

        for i in 0..self.0.len().max(matchers.len()) {
            let actual = self.0.get(i);
            let expected = matchers.get(i);

            let passed = match (expected, actual) {
                (Some(m), Some(v)) => m.matches(v),
                _ => false,
            };
            if !passed {
                differences += 1;
            }

            let actual = actual.map_or_else(|| "(missing)".to_string(), |v| format!("{:?}", v));
            let expected =
                expected.map_or_else(|| "(missing)".to_string(), |m| format!("{:?}", m));
            let verdict = if passed { "PASS" } else { "FAIL" };
            let op = if passed { "matches" } else { "!=" };
            let _ = writeln!(report, "\t{}: {}:  {} {} {}", i, verdict, actual, op, expected);
        }

        (report, differences)
    }

    /// Check whether every matcher accepts its argument and the lengths agree.
    pub fn matches(&self, matchers: &[Matcher]) -> bool {
        self.0.len() == matchers.len()
            && self.0.iter().zip(matchers).all(|(value, m)| m.matches(value))
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{any, eq};

    fn args(values: &[&str]) -> Arguments {
        Arguments::new(values.iter().map(|s| Value::String(s.to_string())).collect())
    }

    #[test]
    fn typed_access() {
        let a = Arguments::new(vec![Value::String("x".into()), Value::Int(4)]);
        assert_eq!(a.get_as::<String>(0).unwrap(), "x");
        assert_eq!(a.get_as::<i32>(1).unwrap(), 4);
        assert!(a.get_as::<bool>(1).is_err());
        assert_eq!(a.get_as::<Option<i32>>(5).unwrap(), None);
        assert!(a.get(2).is_none());
    }

    #[test]
    fn diff_counts_mismatches() {
        let (_, n) = args(&["a", "b"]).diff(&[eq("a"), eq("b")]);
        assert_eq!(n, 0);

        let (report, n) = args(&["a", "c"]).diff(&[eq("a"), eq("b")]);
        assert_eq!(n, 1);
        assert!(report.contains("0: PASS"));
        assert!(report.contains("1: FAIL:  \"c\" != \"b\""));
    }

    #[test]
    fn diff_counts_missing_positions() {
        let (report, n) = args(&["a"]).diff(&[eq("a"), any()]);
        assert_eq!(n, 1);
        assert!(report.contains("(missing)"));

        let (_, n) = args(&["a", "b"]).diff(&[]);
        assert_eq!(n, 2);
    }

    #[test]
    fn matches_requires_equal_length() {
        assert!(args(&[]).matches(&[]));
        assert!(args(&["a"]).matches(&[any()]));
        assert!(!args(&["a"]).matches(&[any(), any()]));
    }

    #[test]
    fn display_lists_values() {
        assert_eq!(args(&["1", "2"]).to_string(), "\"1\", \"2\"");
        assert_eq!(Arguments::default().to_string(), "");
    }
}
