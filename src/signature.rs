//! Function types a mock can stand in for.
//!
//! [`Signature`] is implemented for `dyn Fn(A, B, ..) -> R` trait objects of
//! up to eight parameters, in three flavours: plain, `+ Send` and
//! `+ Send + Sync`. Every parameter must be a [`Slot`] and the return type
//! must be [`Returns`]. Anything else is not a function type and cannot be
//! mocked.

use std::any::type_name;
use std::sync::Arc;

use funcmock_core::{
    FunctionFlags, FunctionTypeDescriptor, Params, Returns, Slot, TypeDescriptor, Value,
};
use funcmock_engine::Mock;

use crate::CALL_SITE;

/// A function type that can be materialized over a [`Mock`].
pub trait Signature: 'static {
    /// Describe the parameter and return types.
    fn descriptor() -> FunctionTypeDescriptor;

    /// Build a callable of this type that forwards every call to `adapter`.
    fn materialize(adapter: CallAdapter) -> Box<Self>;
}

/// Maps any callable to the plain `dyn Fn` type it can be mocked as.
///
/// `Marker` is the `fn(A, ..) -> R` pointer type of the call signature; it
/// only exists so one impl per arity can coexist and is always inferred.
pub trait FnSample<Marker> {
    /// The mockable function type.
    type Function: ?Sized + Signature;
}

/// Forwards calls from a materialized callable to the engine.
#[derive(Clone)]
pub struct CallAdapter {
    mock: Arc<Mock>,
}

impl CallAdapter {
    pub(crate) fn new(mock: Arc<Mock>) -> Self {
        Self { mock }
    }

    /// Answer one call and rebuild the declared return value.
    ///
    /// Result slots the expectation left empty become zero values.
    ///
    /// # Panics
    ///
    /// Panics if no expectation answers the call (after notifying the bound
    /// reporter), or if a configured result does not convert to its declared
    /// type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn invoke<R: Returns>(&self, arguments: Vec<Value>) -> R {
        tracing::trace!(
            target: "funcmock",
            arguments = arguments.len(),
            returns = type_name::<R>(),
            "invoking function mock"
        );

        let results = self.mock.method_called(CALL_SITE, arguments);
        match R::from_results(results.values()) {
            Ok(value) => value,
            Err(err) => panic!(
                "funcmock: cannot return {} from ({}): {}",
                type_name::<R>(),
                results,
                err
            ),
        }
    }
}

impl std::fmt::Debug for CallAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallAdapter").finish_non_exhaustive()
    }
}

macro_rules! impl_signature {
    (@impl [$($bounds:tt)*] $thread_safe:literal; $($ty:ident: $arg:ident),*) => {
        impl<$($ty,)* R> Signature for dyn Fn($($ty),*) -> R $($bounds)*
        where
            $($ty: Slot,)*
            R: Returns + 'static,
        {
            fn descriptor() -> FunctionTypeDescriptor {
                let mut flags = FunctionFlags::empty();
                if <($($ty,)*) as Params>::is_variadic() {
                    flags |= FunctionFlags::VARIADIC;
                }
                if $thread_safe {
                    flags |= FunctionFlags::THREAD_SAFE;
                }

                FunctionTypeDescriptor::new(
                    TypeDescriptor::function::<Self>(),
                    <($($ty,)*) as Params>::descriptors(),
                    R::slots(),
                    type_name::<R>(),
                    flags,
                )
            }

            fn materialize(adapter: CallAdapter) -> Box<Self> {
                Box::new(move |$($arg: $ty),*| adapter.invoke::<R>(vec![$($arg.into_value()),*]))
            }
        }
    };
    ($($ty:ident: $arg:ident),*) => {
        impl_signature!(@impl [] false; $($ty: $arg),*);
        impl_signature!(@impl [+ Send] false; $($ty: $arg),*);
        impl_signature!(@impl [+ Send + Sync] true; $($ty: $arg),*);

        impl<Func, $($ty,)* R> FnSample<fn($($ty),*) -> R> for Func
        where
            Func: Fn($($ty),*) -> R + ?Sized,
            $($ty: Slot,)*
            R: Returns + 'static,
        {
            type Function = dyn Fn($($ty),*) -> R;
        }
    };
}

impl_signature!();
impl_signature!(A: a);
impl_signature!(A: a, B: b);
impl_signature!(A: a, B: b, C: c);
impl_signature!(A: a, B: b, C: c, D: d);
impl_signature!(A: a, B: b, C: c, D: d, E: e);
impl_signature!(A: a, B: b, C: c, D: d, E: e, F: f);
impl_signature!(A: a, B: b, C: c, D: d, E: e, F: f, G: g);
impl_signature!(A: a, B: b, C: c, D: d, E: e, F: f, G: g, H: h);

#[cfg(test)]
mod tests {
    use super::*;
    use funcmock_core::{Rest, TypeKind};

    type Plain = dyn Fn(String, i32) -> (String, Option<u8>);
    type Shared = dyn Fn(String, Rest<i32>) -> bool + Send + Sync;

    #[test]
    fn descriptor_lists_params_and_slots() {
        let desc = <Plain as Signature>::descriptor();
        assert_eq!(desc.param_count(), 2);
        assert_eq!(desc.return_count(), 2);
        assert_eq!(desc.params()[0].kind(), TypeKind::Text);
        assert_eq!(desc.returns()[1].kind(), TypeKind::Nullable);
        assert_eq!(desc.ty().kind(), TypeKind::Function);
        assert!(!desc.is_variadic());
        assert!(!desc.is_thread_safe());
    }

    #[test]
    fn descriptor_flags() {
        let desc = <Shared as Signature>::descriptor();
        assert!(desc.is_variadic());
        assert!(desc.is_thread_safe());
        assert_eq!(desc.to_string(), "fn(String, ...Rest<i32>) -> bool");

        let send_only = <dyn Fn() + Send as Signature>::descriptor();
        assert!(!send_only.is_thread_safe());
        assert_eq!(send_only.to_string(), "fn()");
    }

    #[test]
    fn materialized_callable_forwards_to_mock() {
        let mock = Arc::new(Mock::new());
        mock.on(CALL_SITE, ("x", 1i32)).returns(("ok", 7u8));

        let f = <Plain as Signature>::materialize(CallAdapter::new(mock.clone()));
        assert_eq!(f("x".to_string(), 1), ("ok".to_string(), Some(7)));
        assert_eq!(mock.calls().len(), 1);
    }

    #[test]
    #[should_panic(expected = "cannot return")]
    fn mismatched_result_panics() {
        let mock = Arc::new(Mock::new());
        mock.on(CALL_SITE, ()).returns("not a number");

        let f = <dyn Fn() -> i32 as Signature>::materialize(CallAdapter::new(mock));
        f();
    }
}
