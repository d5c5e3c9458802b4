//! The function mock builder.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use funcmock_core::{FunctionTypeDescriptor, IntoValues};
use funcmock_engine::{
    Arguments, Call, CallRecord, IntoMatchers, Matcher, Mock, Reporter, TestDataGuard,
};

use crate::CALL_SITE;
use crate::signature::{CallAdapter, FnSample, Signature};

/// Builds recording test doubles of the function type `F`.
///
/// `F` is written as a trait object type, e.g.
/// `dyn Fn(String, String) -> Result<String, MyError>`. Expectations are
/// registered with [`on`](Self::on), and [`build`](Self::build) hands out
/// callables of type `Box<F>` that answer from those expectations. All
/// callables built from one builder, and all clones of it, share the same
/// expectations and call history.
///
/// Only function types can be mocked:
///
/// ```compile_fail
/// let builder = funcmock::Builder::<i32>::new();
/// ```
pub struct Builder<F: ?Sized + Signature> {
    mock: Arc<Mock>,
    signature: FunctionTypeDescriptor,
    _marker: PhantomData<fn() -> Box<F>>,
}

impl<F: ?Sized + Signature> Builder<F> {
    /// Create a builder with no expectations.
    pub fn new() -> Self {
        let signature = F::descriptor();
        tracing::debug!(target: "funcmock", %signature, "created function mock");

        Self {
            mock: Arc::new(Mock::new()),
            signature,
            _marker: PhantomData,
        }
    }

    /// Register an expectation for calls whose arguments match `matchers`.
    ///
    /// Plain values match by equality; see [`any`](crate::any),
    /// [`of_type`](crate::of_type) and [`matched_by`](crate::matched_by) for
    /// looser matchers.
    pub fn on(&self, matchers: impl IntoMatchers) -> Call<'_> {
        self.mock.on(CALL_SITE, matchers)
    }

    /// Register an expectation from a prepared matcher list.
    pub fn on_args(&self, matchers: Vec<Matcher>) -> Call<'_> {
        self.mock.on(CALL_SITE, matchers)
    }

    /// Materialize a callable of type `F`.
    ///
    /// Each call records its arguments and returns the values of the first
    /// matching expectation. Result positions the expectation left empty are
    /// filled with the zero value of their declared type.
    pub fn build(&self) -> Box<F> {
        F::materialize(CallAdapter::new(self.mock.clone()))
    }

    /// Assert that every registered expectation was met.
    pub fn assert_expectations(&self, t: &dyn Reporter) -> bool {
        self.mock.assert_expectations(t)
    }

    /// Assert that the function was called with matching arguments.
    pub fn assert_called(&self, t: &dyn Reporter, matchers: impl IntoMatchers) -> bool {
        self.mock.assert_called(t, CALL_SITE, matchers)
    }

    /// Assert that the function was never called with matching arguments.
    pub fn assert_not_called(&self, t: &dyn Reporter, matchers: impl IntoMatchers) -> bool {
        self.mock.assert_not_called(t, CALL_SITE, matchers)
    }

    /// Assert that the function was called exactly `expected` times.
    pub fn assert_number_of_calls(&self, t: &dyn Reporter, expected: usize) -> bool {
        self.mock.assert_number_of_calls(t, CALL_SITE, expected)
    }

    /// Check whether a call with `arguments` would currently be answered.
    pub fn is_callable(&self, t: &dyn Reporter, arguments: impl IntoValues) -> bool {
        self.mock.is_method_callable(t, CALL_SITE, arguments)
    }

    /// Bind the reporter that receives failures of unanswerable calls.
    pub fn test(&self, reporter: Arc<dyn Reporter>) {
        self.mock.test(reporter);
    }

    /// Call the mock directly and get the raw results.
    pub fn called(&self, arguments: impl IntoValues) -> Arguments {
        self.mock.method_called(CALL_SITE, arguments.into_values())
    }

    /// Every answered call, in order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.mock.calls()
    }

    /// Scratch storage for the test.
    pub fn test_data(&self) -> TestDataGuard<'_> {
        self.mock.test_data()
    }

    /// The engine behind this builder.
    pub fn mock(&self) -> &Arc<Mock> {
        &self.mock
    }

    pub fn signature(&self) -> &FunctionTypeDescriptor {
        &self.signature
    }

    /// Render `F`, e.g. `fn(String, String) -> (String, Option<MyError>)`.
    pub fn type_name(&self) -> String {
        self.signature.to_string()
    }
}

impl<F: ?Sized + Signature> Default for Builder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized + Signature> Clone for Builder<F> {
    fn clone(&self) -> Self {
        Self {
            mock: self.mock.clone(),
            signature: self.signature.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F: ?Sized + Signature> fmt::Display for Builder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.signature, f)
    }
}

impl<F: ?Sized + Signature> fmt::Debug for Builder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("signature", &self.signature.to_string())
            .field("mock", &self.mock)
            .finish()
    }
}

/// Create a builder for the function type `F`.
pub fn for_fn<F: ?Sized + Signature>() -> Builder<F> {
    Builder::new()
}

/// Create a builder for the type of `sample`.
///
/// `sample` is only used to infer the function type and is never called.
/// Any callable works: a fn item, a closure or a `dyn Fn`. The inferred type
/// is always the plain `dyn Fn(A, ..) -> R`; use [`for_fn`] to mock a
/// `+ Send + Sync` function type.
///
/// ```
/// fn real(name: String) -> usize {
///     name.len()
/// }
///
/// let builder = funcmock::like(&real);
/// builder.on(("bob",)).returns(42usize);
///
/// let f: Box<dyn Fn(String) -> usize> = builder.build();
/// assert_eq!(f("bob".to_string()), 42);
/// ```
pub fn like<S, M>(_sample: &S) -> Builder<S::Function>
where
    S: ?Sized + FnSample<M>,
{
    Builder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Panicking, any, impl_native_slot};

    #[derive(Debug, Clone, PartialEq)]
    struct Oops(&'static str);

    impl_native_slot!(Oops);

    type Greet = dyn Fn(String, String) -> (String, Option<Oops>);

    #[test]
    fn build_answers_from_expectations() {
        let builder = Builder::<Greet>::new();
        builder.on(("1", "2")).returns(("1 2", None::<Oops>));

        let greet = builder.build();
        assert_eq!(greet("1".into(), "2".into()), ("1 2".to_string(), None));
        assert!(builder.assert_number_of_calls(&Panicking, 1));
    }

    #[test]
    fn clones_share_the_mock() {
        let builder = Builder::<Greet>::new();
        let clone = builder.clone();
        clone.on((any(), any())).returns(("x", Oops("e")));

        let greet = builder.build();
        assert_eq!(
            greet("a".into(), "b".into()),
            ("x".to_string(), Some(Oops("e")))
        );
        assert_eq!(clone.calls().len(), 1);
        assert!(Arc::ptr_eq(builder.mock(), clone.mock()));
    }

    #[test]
    fn like_infers_from_closures_and_trait_objects() {
        let closure = |a: String, b: String| (a + &b, None::<Oops>);
        let builder = like(&closure);
        assert_eq!(builder.signature(), Builder::<Greet>::new().signature());

        let boxed: Box<Greet> = Box::new(closure);
        let builder = like(&boxed);
        builder.on(("1", "2")).returns(("mocked", None::<Oops>));
        assert_eq!(
            builder.build()("1".into(), "2".into()),
            ("mocked".to_string(), None)
        );
    }

    #[test]
    fn display_renders_signature() {
        let builder = for_fn::<Greet>();
        assert_eq!(builder.to_string(), "fn(String, String) -> (String, Option<Oops>)");
        assert_eq!(builder.type_name(), builder.to_string());
        assert_eq!(builder.signature().param_count(), 2);
    }

    #[test]
    fn called_returns_raw_results() {
        let builder = Builder::<Greet>::new();
        builder.on(("a", "b")).returns(("a", Oops("test")));

        let out = builder.called(("a", "b"));
        assert_eq!(out.get_as::<String>(0).unwrap(), "a");
        assert_eq!(out.get_as::<Oops>(1).unwrap(), Oops("test"));
    }
}
