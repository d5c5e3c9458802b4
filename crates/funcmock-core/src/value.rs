//! Generic value type that crosses the call boundary.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ConversionError;

/// A boxed argument or return value.
///
/// Every argument a mocked function receives is turned into a `Value` before
/// it reaches the expectation engine, and every registered return value is
/// stored as one. Primitives get their own variants so they can be matched and
/// printed without knowing the original Rust type; anything else is carried as
/// a [`NativeBox`].
///
/// `Null` is the absent marker. A `Null` result slot is replaced with the
/// declared type's zero value when the result is handed back to the caller.
/// `Present` marks an `Option` that holds a value which itself boxes to
/// `Null` (`Some(None)`), so nested absence is not confused with absence.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent / nil
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integers (i8 through i64 and isize)
    Int(i64),
    /// Unsigned integers (u8 through u64 and usize)
    UInt(u64),
    /// Floating point value (f32, f64 both stored as f64)
    Float(f64),
    /// Single character
    Char(char),
    /// Owned string
    String(String),
    /// Ordered sequence (`Vec<T>`, variadic rest arguments)
    List(Vec<Value>),
    /// Any other registered type
    Native(NativeBox),
    /// `Some` around a value that is itself absent
    Present(Box<Value>),
}

impl Value {
    /// Box an arbitrary comparable value.
    pub fn native<T: NativeValue + Clone>(value: T) -> Self {
        Value::Native(NativeBox::new(value))
    }

    /// Get a human-readable name for the kind of data held.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Native(native) => native.type_name(),
            Value::Present(_) => "some",
        }
    }

    /// Check if this value is the absent marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the native payload as `T`, if that is what this value holds.
    pub fn native_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Native(native) => native.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Clone the native payload out as `T`.
    pub fn native_cloned<T: Any + Clone>(&self) -> Result<T, ConversionError> {
        self.native_ref::<T>()
            .cloned()
            .ok_or_else(|| ConversionError::mismatch::<T>(self.type_name()))
    }

    /// Get the integer payload widened to `i128`, for either signedness.
    pub(crate) fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(*v as i128),
            Value::UInt(v) => Some(*v as i128),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Native(native) => fmt::Debug::fmt(native, f),
            Value::Present(inner) => write!(f, "Some({:?})", inner),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Present(a), Value::Present(b)) => a == b,
            // Signedness is a storage detail; 5i32 and 5u64 are the same argument
            (a, b) => match (a.as_i128(), b.as_i128()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/// Object-safe view of a value stored in [`Value::Native`].
///
/// Implemented for every `Any + Debug + PartialEq + Send + Sync` type, so
/// user types only need the usual derives.
pub trait NativeValue: Any + fmt::Debug + Send + Sync {
    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compare against another native value of possibly different type.
    fn eq_native(&self, other: &dyn NativeValue) -> bool;

    /// Rust type name of the concrete value.
    fn native_type_name(&self) -> &'static str;
}

impl<T> NativeValue for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_native(&self, other: &dyn NativeValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn native_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Shared, type-erased native value.
///
/// Cloning shares the payload; the payload is never mutated after boxing.
#[derive(Clone)]
pub struct NativeBox {
    inner: Arc<dyn NativeValue>,
}

impl NativeBox {
    /// Box a value.
    pub fn new<T: NativeValue>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Borrow the payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Check whether the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_any().is::<T>()
    }

    /// Rust type name of the payload.
    pub fn type_name(&self) -> &'static str {
        self.inner.native_type_name()
    }
}

impl PartialEq for NativeBox {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_native(other.inner.as_ref())
    }
}

impl fmt::Debug for NativeBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_ref(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn value_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::Int(0).type_name(), "int");
        assert_eq!(Value::UInt(0).type_name(), "uint");
        assert_eq!(Value::Float(0.0).type_name(), "float");
        assert_eq!(Value::String(String::new()).type_name(), "string");
        assert_eq!(Value::List(vec![]).type_name(), "list");
        assert!(Value::native(Point { x: 1, y: 2 }).type_name().ends_with("Point"));
        assert_eq!(Value::Present(Box::new(Value::Null)).type_name(), "some");
    }

    #[test]
    fn default_is_null() {
        assert!(Value::default().is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn integers_compare_across_signedness() {
        assert_eq!(Value::Int(5), Value::UInt(5));
        assert_ne!(Value::Int(-1), Value::UInt(u64::MAX));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn present_null_is_not_null() {
        let nested = Value::Present(Box::new(Value::Null));
        assert!(!nested.is_null());
        assert_ne!(nested, Value::Null);
        assert_eq!(nested, Value::Present(Box::new(Value::Null)));
        assert_eq!(format!("{:?}", nested), "Some(null)");
    }

    #[test]
    fn native_values_compare_by_payload() {
        let a = Value::native(Point { x: 1, y: 2 });
        let b = Value::native(Point { x: 1, y: 2 });
        let c = Value::native(Point { x: 2, y: 1 });
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Same bits, different type
        assert_ne!(Value::native(1u8), Value::native(1i8));
    }

    #[test]
    fn native_cloned_downcasts() {
        let value = Value::native(Point { x: 3, y: 4 });
        assert_eq!(value.native_cloned::<Point>().unwrap(), Point { x: 3, y: 4 });
        assert!(value.native_cloned::<String>().is_err());
        assert!(Value::Int(1).native_cloned::<Point>().is_err());
    }

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", Value::String("a".into())), "\"a\"");
        assert_eq!(format!("{:?}", Value::Int(-3)), "-3");
        assert_eq!(
            format!("{:?}", Value::List(vec![Value::Bool(true), Value::Null])),
            "[true, null]"
        );
        assert_eq!(
            format!("{:?}", Value::native(Point { x: 1, y: 2 })),
            "Point { x: 1, y: 2 }"
        );
    }
}
