//! The expectation engine.

use std::fmt;
use std::sync::Arc;

use funcmock_core::{IntoValues, Value};
use parking_lot::{Mutex, MutexGuard};

use crate::arguments::Arguments;
use crate::call::{Call, Expectation};
use crate::error::MockError;
use crate::matcher::{IntoMatchers, Matcher};
use crate::reporter::Reporter;
use crate::test_data::TestData;

/// Exclusive access to a mock's [`TestData`].
pub type TestDataGuard<'a> = MutexGuard<'a, TestData>;

/// A call the mock answered.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub method: String,
    pub arguments: Arguments,
    pub returns: Arguments,
}

#[derive(Default)]
struct MockState {
    expectations: Vec<Expectation>,
    calls: Vec<CallRecord>,
    reporter: Option<Arc<dyn Reporter>>,
    next_id: u64,
}

impl MockState {
    /// First expectation, in registration order, that can answer the call.
    fn find_expected(&self, method: &str, arguments: &Arguments) -> Option<usize> {
        self.expectations.iter().position(|exp| {
            exp.method == method && !exp.is_exhausted() && arguments.matches(&exp.matchers)
        })
    }

    /// Explain why no expectation answers the call.
    fn unmatched(&self, method: &str, arguments: &Arguments) -> MockError {
        let closest = self
            .expectations
            .iter()
            .filter(|exp| exp.method == method)
            .map(|exp| (exp, arguments.diff(&exp.matchers)))
            .min_by_key(|(_, (_, differences))| *differences);

        match closest {
            None => MockError::Unexpected {
                method: method.to_string(),
                arguments: arguments.clone(),
            },
            Some((exp, (_, 0))) => MockError::Exhausted {
                method: method.to_string(),
                arguments: arguments.clone(),
                times: exp.total_calls,
            },
            Some((exp, (diff, _))) => MockError::Mismatch {
                method: method.to_string(),
                arguments: arguments.clone(),
                closest: exp.describe_arguments(),
                diff,
            },
        }
    }

    fn was_called_with(&self, method: &str, matchers: &[Matcher]) -> bool {
        self.calls
            .iter()
            .any(|call| call.method == method && call.arguments.matches(matchers))
    }

    fn describe_calls(&self, method: &str) -> String {
        let lines: Vec<String> = self
            .calls
            .iter()
            .filter(|call| call.method == method)
            .map(|call| format!("\t{}({})", call.method, call.arguments))
            .collect();
        if lines.is_empty() {
            "\t(none)".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Records calls and answers them from registered expectations.
///
/// Expectations are keyed by a method name and matched in registration order.
/// All state sits behind one lock, which is never held while hooks run or
/// failures are reported.
#[derive(Default)]
pub struct Mock {
    state: Mutex<MockState>,
    test_data: Mutex<TestData>,
}

impl Mock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the reporter that receives failures of unanswerable calls.
    ///
    /// Without one, such calls panic with the failure text.
    pub fn test(&self, reporter: Arc<dyn Reporter>) {
        self.state.lock().reporter = Some(reporter);
    }

    /// Register an expectation for `method` called with `matchers`.
    pub fn on(&self, method: &str, matchers: impl IntoMatchers) -> Call<'_> {
        let matchers = matchers.into_matchers();
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        tracing::debug!(
            target: "funcmock",
            method,
            arguments = matchers.len(),
            "registered expectation"
        );
        state
            .expectations
            .push(Expectation::new(id, method, matchers));
        Call::new(self, id)
    }

    pub(crate) fn update(&self, id: u64, f: impl FnOnce(&mut Expectation)) {
        let mut state = self.state.lock();
        if let Some(exp) = state.expectations.iter_mut().find(|exp| exp.id == id) {
            f(exp);
        }
    }

    pub(crate) fn remove(&self, id: u64) {
        self.state.lock().expectations.retain(|exp| exp.id != id);
    }

    /// Answer a call.
    ///
    /// Finds the first expectation for `method` whose matchers accept the
    /// arguments and which still has calls left, records the call and returns
    /// a copy of the expectation's results.
    ///
    /// # Panics
    ///
    /// If no expectation answers the call, the failure is reported to the
    /// bound reporter, which must abort; without a reporter this panics.
    pub fn method_called(&self, method: &str, arguments: Vec<Value>) -> Arguments {
        let arguments = Arguments::new(arguments);

        let mut state = self.state.lock();
        let Some(index) = state.find_expected(method, &arguments) else {
            let failure = state.unmatched(method, &arguments);
            let reporter = state.reporter.clone();
            drop(state);

            tracing::warn!(target: "funcmock", method, %arguments, "unexpected call");
            fail(reporter, failure.to_string());
        };

        let exp = &mut state.expectations[index];
        exp.consume();
        let returns = Arguments::new(exp.returns.clone());
        let hook = exp.hook.clone();
        let panic_message = exp.panic_message.clone();

        state.calls.push(CallRecord {
            method: method.to_string(),
            arguments: arguments.clone(),
            returns: returns.clone(),
        });
        drop(state);

        tracing::trace!(target: "funcmock", method, %arguments, %returns, "answered call");

        if let Some(hook) = hook {
            hook(&arguments);
        }
        if let Some(message) = panic_message {
            panic!("{}", message);
        }
        returns
    }

    /// Every answered call, in order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state.lock().calls.clone()
    }

    /// Check that every expectation was met.
    ///
    /// An expectation is met when it was called (or is `maybe()`), and any
    /// `times(n)` budget is used up. Each unmet expectation is reported.
    pub fn assert_expectations(&self, t: &dyn Reporter) -> bool {
        let mut passed = Vec::new();
        let mut failed = Vec::new();
        {
            let state = self.state.lock();
            for exp in &state.expectations {
                let call = format!("{}({})", exp.method, exp.describe_arguments());
                let never_called = !exp.optional
                    && exp.total_calls == 0
                    && !state.was_called_with(&exp.method, &exp.matchers);

                if never_called {
                    failed.push(format!("FAIL:\t{}", call));
                } else if let crate::call::Repeat::Remaining(n) = exp.repeat {
                    failed.push(format!("FAIL:\t{} (expected {} more call(s))", call, n));
                } else {
                    passed.push(format!("PASS:\t{}", call));
                }
            }
        }

        for message in &passed {
            t.logf(message);
        }
        for message in &failed {
            t.errorf(message);
        }
        if !failed.is_empty() {
            t.errorf(&format!(
                "FAIL: {} out of {} expectation(s) were met.\n\tThe code you are testing needs to make {} more call(s).",
                passed.len(),
                passed.len() + failed.len(),
                failed.len()
            ));
        }
        failed.is_empty()
    }

    /// Check that `method` was called with arguments accepted by `matchers`.
    pub fn assert_called(
        &self,
        t: &dyn Reporter,
        method: &str,
        matchers: impl IntoMatchers,
    ) -> bool {
        let matchers = matchers.into_matchers();
        let (called, recorded) = {
            let state = self.state.lock();
            (
                state.was_called_with(method, &matchers),
                state.describe_calls(method),
            )
        };

        if !called {
            t.errorf(&format!(
                "funcmock: {}({}) should have been called but was not.\n\nrecorded calls:\n{}",
                method,
                describe(&matchers),
                recorded
            ));
        }
        called
    }

    /// Check that `method` was never called with arguments accepted by `matchers`.
    pub fn assert_not_called(
        &self,
        t: &dyn Reporter,
        method: &str,
        matchers: impl IntoMatchers,
    ) -> bool {
        let matchers = matchers.into_matchers();
        let called = self.state.lock().was_called_with(method, &matchers);

        if called {
            t.errorf(&format!(
                "funcmock: {}({}) should not have been called.",
                method,
                describe(&matchers)
            ));
        }
        !called
    }

    /// Check that `method` was answered exactly `expected` times.
    pub fn assert_number_of_calls(&self, t: &dyn Reporter, method: &str, expected: usize) -> bool {
        let actual = self
            .state
            .lock()
            .calls
            .iter()
            .filter(|call| call.method == method)
            .count();

        if actual != expected {
            t.errorf(&format!(
                "funcmock: expected {} call(s) to {}, got {}.",
                expected, method, actual
            ));
        }
        actual == expected
    }

    /// Check whether a call to `method` with `arguments` would be answered.
    ///
    /// Nothing is recorded and no failure is reported.
    pub fn is_method_callable(
        &self,
        t: &dyn Reporter,
        method: &str,
        arguments: impl IntoValues,
    ) -> bool {
        let arguments = Arguments::new(arguments.into_values());
        let callable = self.state.lock().find_expected(method, &arguments).is_some();
        if !callable {
            t.logf(&format!("{}({}) is not callable", method, arguments));
        }
        callable
    }

    /// Scratch storage for the test.
    pub fn test_data(&self) -> TestDataGuard<'_> {
        self.test_data.lock()
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Mock")
            .field("expectations", &state.expectations)
            .field("calls", &state.calls.len())
            .finish_non_exhaustive()
    }
}

fn describe(matchers: &[Matcher]) -> String {
    matchers
        .iter()
        .map(|m| format!("{:?}", m))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Report a failure and abort the calling thread.
fn fail(reporter: Option<Arc<dyn Reporter>>, message: String) -> ! {
    match reporter {
        Some(t) => {
            t.errorf(&message);
            t.fail_now()
        }
        None => panic!("{}", message),
    }
}
