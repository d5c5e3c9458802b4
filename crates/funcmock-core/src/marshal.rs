//! Marshalling whole argument lists and result lists.
//!
//! - [`Params`]: the parameter types of a function, as a tuple
//! - [`IntoValues`]: a tuple of values boxed into an ordered `Vec<Value>`
//! - [`Returns`]: a declared return type rebuilt from a generic result list,
//!   zero-filling every slot that was left empty

use crate::descriptor::TypeDescriptor;
use crate::error::ConversionError;
use crate::slot::{IntoValue, Slot};
use crate::value::Value;

/// A function's parameter types, as a tuple.
pub trait Params {
    /// Descriptors of the parameter types, in order.
    fn descriptors() -> Vec<TypeDescriptor>;

    /// Whether the last parameter is a [`Rest`](crate::Rest).
    fn is_variadic() -> bool;
}

/// An ordered list of values: call arguments, or an expectation's results.
///
/// Implemented for `()` (empty), any single value, and tuples of up to eight
/// values. Use `None` in a nullable position to register an explicit nil.
pub trait IntoValues {
    fn into_values(self) -> Vec<Value>;
}

/// A declared return type that can be rebuilt from a generic result list.
///
/// Shapes:
/// - `()`: no slots, results are ignored
/// - any `Slot + Default` type: one slot
/// - tuples: one slot per element
/// - `Result<T, E>`: the `(value, error)` pair; a non-null error slot yields
///   `Err`, otherwise `Ok` with the value slot
///
/// A registered result must convert to its slot's declared type or the call
/// panics. Numeric slots are lenient where nothing is lost: integers convert
/// across widths and signedness when the value fits, an integer fills a float
/// slot when it is exactly representable, and an `f64` fills an `f32` slot
/// when it is in range.
pub trait Returns: Sized {
    /// Descriptors of the individual result slots.
    fn slots() -> Vec<TypeDescriptor>;

    /// Rebuild the value from a result list.
    fn from_results(results: &[Value]) -> Result<Self, ConversionError>;
}

/// Read result slot `index` as `T`, falling back to `T`'s zero value.
///
/// A missing slot and an explicit `Null` both become `T::default()`; for
/// `Option<T>` that is `None`, so absence stays absence.
pub fn result_slot<T: Slot + Default>(
    results: &[Value],
    index: usize,
) -> Result<T, ConversionError> {
    match results.get(index) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::from_value(value),
    }
}

impl IntoValues for () {
    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl<T: IntoValue> IntoValues for T {
    fn into_values(self) -> Vec<Value> {
        vec![self.into_boxed_value()]
    }
}

impl Returns for () {
    fn slots() -> Vec<TypeDescriptor> {
        Vec::new()
    }

    fn from_results(_results: &[Value]) -> Result<Self, ConversionError> {
        Ok(())
    }
}

impl<T: Slot + Default> Returns for T {
    fn slots() -> Vec<TypeDescriptor> {
        vec![TypeDescriptor::of::<T>()]
    }

    fn from_results(results: &[Value]) -> Result<Self, ConversionError> {
        result_slot(results, 0)
    }
}

impl<T: Slot + Default, E: Slot> Returns for Result<T, E> {
    fn slots() -> Vec<TypeDescriptor> {
        vec![TypeDescriptor::of::<T>(), TypeDescriptor::of::<Option<E>>()]
    }

    fn from_results(results: &[Value]) -> Result<Self, ConversionError> {
        match results.get(1) {
            Some(error) if !error.is_null() => E::from_value(error).map(Err),
            _ => result_slot(results, 0).map(Ok),
        }
    }
}

macro_rules! impl_tuples {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name: Slot),+> Params for ($($name,)+) {
            fn descriptors() -> Vec<TypeDescriptor> {
                vec![$(TypeDescriptor::of::<$name>()),+]
            }

            fn is_variadic() -> bool {
                let rest: &[bool] = &[$($name::IS_REST),+];
                rest.last().copied().unwrap_or(false)
            }
        }

        impl<$($name: IntoValue),+> IntoValues for ($($name,)+) {
            fn into_values(self) -> Vec<Value> {
                vec![$(self.$idx.into_boxed_value()),+]
            }
        }

        impl<$($name: Slot + Default),+> Returns for ($($name,)+) {
            fn slots() -> Vec<TypeDescriptor> {
                vec![$(TypeDescriptor::of::<$name>()),+]
            }

            fn from_results(results: &[Value]) -> Result<Self, ConversionError> {
                Ok(($(result_slot::<$name>(results, $idx)?,)+))
            }
        }
    };
}

impl Params for () {
    fn descriptors() -> Vec<TypeDescriptor> {
        Vec::new()
    }

    fn is_variadic() -> bool {
        false
    }
}

impl_tuples!(A: 0);
impl_tuples!(A: 0, B: 1);
impl_tuples!(A: 0, B: 1, C: 2);
impl_tuples!(A: 0, B: 1, C: 2, D: 3);
impl_tuples!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuples!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuples!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuples!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
