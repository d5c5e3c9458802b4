//! Registered expectations and the handle used to configure them.

use std::fmt;
use std::sync::Arc;

use funcmock_core::{IntoValues, Value};

use crate::arguments::Arguments;
use crate::matcher::Matcher;
use crate::mock::Mock;

pub(crate) type Hook = Arc<dyn Fn(&Arguments) + Send + Sync>;

/// How many more calls an expectation may answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repeat {
    Unlimited,
    Remaining(usize),
    Exhausted,
}

/// One `on(...)` registration.
#[derive(Clone)]
pub(crate) struct Expectation {
    pub(crate) id: u64,
    pub(crate) method: String,
    pub(crate) matchers: Vec<Matcher>,
    pub(crate) returns: Vec<Value>,
    pub(crate) repeat: Repeat,
    pub(crate) total_calls: usize,
    pub(crate) optional: bool,
    pub(crate) hook: Option<Hook>,
    pub(crate) panic_message: Option<String>,
}

impl Expectation {
    pub(crate) fn new(id: u64, method: &str, matchers: Vec<Matcher>) -> Self {
        Self {
            id,
            method: method.to_string(),
            matchers,
            returns: Vec::new(),
            repeat: Repeat::Unlimited,
            total_calls: 0,
            optional: false,
            hook: None,
            panic_message: None,
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.repeat == Repeat::Exhausted
    }

    /// Account for one answered call.
    pub(crate) fn consume(&mut self) {
        self.repeat = match self.repeat {
            Repeat::Remaining(1) => Repeat::Exhausted,
            Repeat::Remaining(n) => Repeat::Remaining(n - 1),
            other => other,
        };
        self.total_calls += 1;
    }

    /// Render the matcher list as call arguments.
    pub(crate) fn describe_arguments(&self) -> String {
        self.matchers
            .iter()
            .map(|m| format!("{:?}", m))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("method", &self.method)
            .field("matchers", &self.matchers)
            .field("returns", &self.returns)
            .field("repeat", &self.repeat)
            .field("total_calls", &self.total_calls)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered expectation.
///
/// Returned by [`Mock::on`]; every method configures the same expectation
/// and returns the handle for chaining:
///
/// ```ignore
/// mock.on("func", ("a", "b")).returns(("a b", None::<MyError>)).once();
/// ```
pub struct Call<'m> {
    mock: &'m Mock,
    id: u64,
}

impl<'m> Call<'m> {
    pub(crate) fn new(mock: &'m Mock, id: u64) -> Self {
        Self { mock, id }
    }

    /// Set the values returned when this expectation matches.
    ///
    /// Result positions left out, or given as `None`, are answered with the
    /// declared type's zero value.
    pub fn returns(self, values: impl IntoValues) -> Self {
        let values = values.into_values();
        self.mock.update(self.id, |exp| exp.returns = values);
        self
    }

    /// Answer exactly one call.
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Answer exactly two calls.
    pub fn twice(self) -> Self {
        self.times(2)
    }

    /// Answer exactly `n` calls; `0` means unlimited.
    pub fn times(self, n: usize) -> Self {
        let repeat = if n == 0 {
            Repeat::Unlimited
        } else {
            Repeat::Remaining(n)
        };
        self.mock.update(self.id, |exp| exp.repeat = repeat);
        self
    }

    /// Do not require this expectation to be called.
    pub fn maybe(self) -> Self {
        self.mock.update(self.id, |exp| exp.optional = true);
        self
    }

    /// Run `hook` with the call's arguments each time this expectation matches.
    pub fn run<F>(self, hook: F) -> Self
    where
        F: Fn(&Arguments) + Send + Sync + 'static,
    {
        let hook: Hook = Arc::new(hook);
        self.mock.update(self.id, |exp| exp.hook = Some(hook));
        self
    }

    /// Panic with `message` each time this expectation matches.
    ///
    /// The call is recorded before the panic.
    pub fn panics(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.mock
            .update(self.id, |exp| exp.panic_message = Some(message));
        self
    }

    /// Remove this expectation.
    pub fn unset(self) {
        self.mock.remove(self.id);
    }
}

impl fmt::Debug for Call<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_counts_down_to_exhausted() {
        let mut exp = Expectation::new(0, "func", vec![]);
        exp.repeat = Repeat::Remaining(2);

        exp.consume();
        assert_eq!(exp.repeat, Repeat::Remaining(1));
        assert!(!exp.is_exhausted());

        exp.consume();
        assert!(exp.is_exhausted());
        assert_eq!(exp.total_calls, 2);
    }

    #[test]
    fn unlimited_never_exhausts() {
        let mut exp = Expectation::new(0, "func", vec![]);
        for _ in 0..5 {
            exp.consume();
        }
        assert_eq!(exp.repeat, Repeat::Unlimited);
        assert_eq!(exp.total_calls, 5);
    }
}
