//! Failure reporting through a bound reporter.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use funcmock::{IntoValue, Mock, Reporter, any, for_fn};

const EXAMPLE_PANIC_MESSAGE: &str = "example panic message";

/// A reporter that is itself a mock, so the reports can be asserted on.
#[derive(Default)]
struct MockT {
    mock: Mock,
}

impl Reporter for MockT {
    fn logf(&self, message: &str) {
        self.mock.method_called("logf", vec![message.into_boxed_value()]);
    }

    fn errorf(&self, message: &str) {
        self.mock.method_called("errorf", vec![message.into_boxed_value()]);
    }

    fn fail_now(&self) -> ! {
        self.mock.method_called("fail_now", vec![]);
        panic!("{}", EXAMPLE_PANIC_MESSAGE);
    }
}

fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default()
}

#[test]
fn test_unmatched_call_is_reported_then_aborted() {
    let t = Arc::new(MockT::default());
    t.mock.on("errorf", (any(),));
    t.mock.on("fail_now", ());

    let builder = for_fn::<dyn Fn(String, String) -> (String, Option<String>)>();
    builder.test(t.clone());

    let result = catch_unwind(AssertUnwindSafe(|| builder.called(("a", "b"))));
    assert_eq!(panic_text(result.unwrap_err()), EXAMPLE_PANIC_MESSAGE);

    assert!(t.mock.assert_expectations(&funcmock::Panicking));
    assert!(t.mock.assert_number_of_calls(&funcmock::Panicking, "errorf", 1));
    assert!(t.mock.assert_number_of_calls(&funcmock::Panicking, "fail_now", 1));
    assert!(builder.calls().is_empty());
}

#[test]
fn test_materialized_call_reports_closest_expectation() {
    let t = Arc::new(MockT::default());
    t.mock.on("errorf", (any(),));
    t.mock.on("fail_now", ());

    let builder = for_fn::<dyn Fn(String, String) -> String>();
    builder.on(("1", "2")).returns("1 2");
    builder.test(t.clone());

    let f = builder.build();
    let result = catch_unwind(AssertUnwindSafe(|| f("x".into(), "2".into())));
    assert!(result.is_err());

    let reports = t.mock.calls();
    let message: String = reports[0].arguments.get_as(0).unwrap();
    assert!(message.contains("closest expectation"));
    assert!(message.contains("0: FAIL:  \"x\" != \"1\""));
    assert!(message.contains("1: PASS:  \"2\" matches \"2\""));
}

#[test]
fn test_assertion_failures_do_not_abort() {
    let t = MockT::default();
    t.mock.on("errorf", (any(),));
    t.mock.on("logf", (any(),)).maybe();

    let builder = for_fn::<dyn Fn(i32)>();
    builder.on((1i32,)).returns(());

    assert!(!builder.assert_expectations(&t));
    assert!(!builder.assert_called(&t, (1i32,)));
    assert!(!builder.assert_number_of_calls(&t, 1));
    assert!(builder.assert_not_called(&t, (1i32,)));

    // one line per unmet expectation plus a summary, then one per assertion
    assert!(t.mock.assert_number_of_calls(&funcmock::Panicking, "errorf", 4));
}

#[test]
fn test_is_callable_logs_without_failing() {
    let t = MockT::default();
    t.mock.on("logf", (any(),));

    let builder = for_fn::<dyn Fn(i32)>();
    assert!(!builder.is_callable(&t, (1i32,)));

    assert!(t.mock.assert_number_of_calls(&funcmock::Panicking, "logf", 1));
    assert!(t.mock.assert_number_of_calls(&funcmock::Panicking, "errorf", 0));
}
