//! The [`Slot`] trait: types that can be passed to or returned from a mock.
//!
//! This module provides the conversions between Rust values and [`Value`]:
//! - [`Slot::into_value`]: box a Rust value, losslessly
//! - [`Slot::from_value`]: get the Rust value back out
//!
//! ## Supported Types
//!
//! - Integers: `i8`..`i64`, `isize`, `u8`..`u64`, `usize`
//! - Floats: `f32`, `f64`
//! - `bool`, `char`, `String`
//! - `Option<T>` (nullable), `Vec<T>`, `Box<T>`, `Arc<T>`, [`Rest<T>`]
//! - [`Value`] itself
//!
//! User types opt in with `#[derive(Slot)]` or [`impl_native_slot!`](crate::impl_native_slot).

use std::sync::Arc;

use crate::descriptor::TypeKind;
use crate::error::ConversionError;
use crate::value::Value;

/// A type that can cross the mocked call boundary.
pub trait Slot: Sized + Send + Sync + 'static {
    /// Broad category of the type, used by descriptors.
    const KIND: TypeKind;

    /// Whether this type marks a trailing variadic parameter.
    const IS_REST: bool = false;

    /// Diagnostic name of the type.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Box this value.
    fn into_value(self) -> Value;

    /// Extract a value of this type.
    ///
    /// Returns a `ConversionError` if the value holds an incompatible type.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Conversion into a [`Value`] for anything accepted where a value is expected.
///
/// Implemented for every [`Slot`] and for `&str`, so string literals can be
/// used when registering expectations for `String` parameters.
pub trait IntoValue {
    /// Convert into a boxed value.
    fn into_boxed_value(self) -> Value;
}

impl<T: Slot> IntoValue for T {
    fn into_boxed_value(self) -> Value {
        self.into_value()
    }
}

impl IntoValue for &str {
    fn into_boxed_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_slot_int {
    ($variant:ident, $wide:ty, $($ty:ty),*) => {
        $(
            impl Slot for $ty {
                const KIND: TypeKind = TypeKind::Numeric;

                fn into_value(self) -> Value {
                    Value::$variant(self as $wide)
                }

                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value.as_i128() {
                        Some(v) => <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                            value: v,
                            target_type: stringify!($ty),
                        }),
                        None if value.is_null() => Err(ConversionError::UnexpectedNull {
                            target_type: stringify!($ty),
                        }),
                        None => Err(ConversionError::TypeMismatch {
                            expected: stringify!($ty),
                            actual: value.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_slot_int!(Int, i64, i8, i16, i32, i64, isize);
impl_slot_int!(UInt, u64, u8, u16, u32, u64, usize);

// ============================================================================
// Scalar implementations
// ============================================================================

/// Integers widen to `f64` only when the conversion is exact, so a result
/// registered as `7i32` can fill an `f64` slot but `u64::MAX` cannot.
impl Slot for f64 {
    const KIND: TypeKind = TypeKind::Numeric;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(_) | Value::UInt(_) => {
                let Some(v) = value.as_i128() else {
                    return Err(ConversionError::mismatch::<f64>(value.type_name()));
                };
                let widened = v as f64;
                if widened as i128 == v {
                    Ok(widened)
                } else {
                    Err(ConversionError::FloatConversion {
                        value: widened,
                        target_type: "f64",
                    })
                }
            }
            Value::Null => Err(ConversionError::UnexpectedNull { target_type: "f64" }),
            _ => Err(ConversionError::mismatch::<f64>(value.type_name())),
        }
    }
}

impl Slot for f32 {
    const KIND: TypeKind = TypeKind::Numeric;

    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let v = match f64::from_value(value) {
            Ok(v) => v,
            Err(ConversionError::TypeMismatch { actual, .. }) => {
                return Err(ConversionError::mismatch::<f32>(actual));
            }
            Err(ConversionError::UnexpectedNull { .. }) => {
                return Err(ConversionError::UnexpectedNull { target_type: "f32" });
            }
            Err(err) => return Err(err),
        };

        // Infinities and NaN carry over; finite values must fit
        if !v.is_finite() || (f32::MIN as f64..=f32::MAX as f64).contains(&v) {
            Ok(v as f32)
        } else {
            Err(ConversionError::FloatConversion {
                value: v,
                target_type: "f32",
            })
        }
    }
}

macro_rules! impl_slot_scalar {
    ($ty:ty, $variant:ident, $kind:ident) => {
        impl Slot for $ty {
            const KIND: TypeKind = TypeKind::$kind;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Result<Self, ConversionError> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    _ => Err(ConversionError::mismatch::<$ty>(value.type_name())),
                }
            }
        }
    };
}

impl_slot_scalar!(bool, Bool, Bool);
impl_slot_scalar!(char, Char, Text);
impl_slot_scalar!(String, String, Text);

// ============================================================================
// Wrapper implementations
// ============================================================================

impl<T: Slot> Slot for Option<T> {
    const KIND: TypeKind = TypeKind::Nullable;

    fn into_value(self) -> Value {
        match self {
            Some(v) => match v.into_value() {
                // Keep `Some(None)` apart from `None`
                inner @ (Value::Null | Value::Present(_)) => Value::Present(Box::new(inner)),
                inner => inner,
            },
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            Value::Present(inner) => T::from_value(inner).map(Some),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Slot> Slot for Vec<T> {
    const KIND: TypeKind = TypeKind::Aggregate;

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(Slot::into_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => Err(ConversionError::mismatch::<Self>(value.type_name())),
        }
    }
}

impl<T: Slot> Slot for Box<T> {
    const KIND: TypeKind = T::KIND;

    fn into_value(self) -> Value {
        (*self).into_value()
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: Slot + Clone> Slot for Arc<T> {
    const KIND: TypeKind = T::KIND;

    fn into_value(self) -> Value {
        Arc::unwrap_or_clone(self).into_value()
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        T::from_value(value).map(Arc::new)
    }
}

impl Slot for Value {
    const KIND: TypeKind = TypeKind::Dynamic;

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

/// Trailing variadic parameter.
///
/// A function declared as `dyn Fn(String, Rest<i32>)` is described as variadic.
/// All rest arguments are boxed together as one [`Value::List`], so an
/// expectation matches them with a single list matcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rest<T>(pub Vec<T>);

impl<T> From<Vec<T>> for Rest<T> {
    fn from(items: Vec<T>) -> Self {
        Rest(items)
    }
}

impl<T: Slot> Slot for Rest<T> {
    const KIND: TypeKind = TypeKind::Aggregate;
    const IS_REST: bool = true;

    fn into_value(self) -> Value {
        self.0.into_value()
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Vec::<T>::from_value(value).map(Rest)
    }
}

/// Implement [`Slot`] for types carried as [`Value::Native`].
///
/// The types must be `Clone + PartialEq + Debug + Send + Sync + 'static`.
///
/// ```
/// use funcmock_core::{Slot, Value, impl_native_slot};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct UserId(u32);
///
/// impl_native_slot!(UserId);
///
/// let value = UserId(7).into_value();
/// assert_eq!(UserId::from_value(&value).unwrap(), UserId(7));
/// ```
#[macro_export]
macro_rules! impl_native_slot {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Slot for $ty {
                const KIND: $crate::TypeKind = $crate::TypeKind::Native;

                fn into_value(self) -> $crate::Value {
                    $crate::Value::native(self)
                }

                fn from_value(value: &$crate::Value) -> ::core::result::Result<Self, $crate::ConversionError> {
                    value.native_cloned::<Self>()
                }
            }
        )+
    };
}
