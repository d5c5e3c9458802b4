//! Failure reporting contexts.

/// Receives assertion failures from a mock.
///
/// This is the engine's view of the running test: failed assertions are
/// reported through [`errorf`](Reporter::errorf), and a call that cannot be
/// answered is reported and then aborted with [`fail_now`](Reporter::fail_now).
pub trait Reporter: Send + Sync {
    /// Informational output, e.g. satisfied expectations.
    fn logf(&self, message: &str) {
        tracing::debug!(target: "funcmock", "{}", message);
    }

    /// Record a failure without stopping.
    fn errorf(&self, message: &str);

    /// Stop the current test. Must not return.
    fn fail_now(&self) -> !;
}

/// Reporter that panics on the first failure.
///
/// Suitable for plain `#[test]` functions, where a panic fails the test.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panicking;

impl Reporter for Panicking {
    fn errorf(&self, message: &str) {
        panic!("{}", message);
    }

    fn fail_now(&self) -> ! {
        panic!("funcmock: test failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "boom")]
    fn panicking_errorf_panics_with_message() {
        Panicking.errorf("boom");
    }

    #[test]
    #[should_panic(expected = "test failed")]
    fn panicking_fail_now_panics() {
        Panicking.fail_now();
    }
}
