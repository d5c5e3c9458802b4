//! Argument matchers used by expectations and call assertions.

use std::fmt;
use std::sync::Arc;

use funcmock_core::{IntoValue, Slot, Value, short_type_name};

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Matches one argument of a call.
#[derive(Clone)]
pub enum Matcher {
    /// The argument must equal this value.
    Eq(Value),
    /// Any argument matches.
    Anything,
    /// The argument must convert to the named type.
    OfType {
        type_name: &'static str,
        accepts: fn(&Value) -> bool,
    },
    /// The argument must convert to the named type and satisfy a predicate.
    MatchedBy {
        type_name: &'static str,
        predicate: Predicate,
    },
}

impl Matcher {
    /// Test a single argument.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Matcher::Eq(expected) => expected == value,
            Matcher::Anything => true,
            Matcher::OfType { accepts, .. } => accepts(value),
            Matcher::MatchedBy { predicate, .. } => predicate(value),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Eq(value) => write!(f, "{:?}", value),
            Matcher::Anything => write!(f, "any()"),
            Matcher::OfType { type_name, .. } => {
                write!(f, "of_type::<{}>()", short_type_name(type_name))
            }
            Matcher::MatchedBy { type_name, .. } => {
                write!(f, "matched_by(|{}|)", short_type_name(type_name))
            }
        }
    }
}

/// Match an argument equal to `value`.
pub fn eq<T: IntoValue>(value: T) -> Matcher {
    Matcher::Eq(value.into_boxed_value())
}

/// Match any argument.
pub fn any() -> Matcher {
    Matcher::Anything
}

/// Match any argument that converts to `T`.
pub fn of_type<T: Slot>() -> Matcher {
    Matcher::OfType {
        type_name: T::type_name(),
        accepts: |value| T::from_value(value).is_ok(),
    }
}

/// Match an argument that converts to `T` and satisfies `predicate`.
///
/// ```
/// use funcmock_engine::matched_by;
/// use funcmock_core::Value;
///
/// let short = matched_by(|s: &String| s.len() < 4);
/// assert!(short.matches(&Value::String("abc".into())));
/// assert!(!short.matches(&Value::String("abcd".into())));
/// assert!(!short.matches(&Value::Int(1)));
/// ```
pub fn matched_by<T, F>(predicate: F) -> Matcher
where
    T: Slot,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Matcher::MatchedBy {
        type_name: T::type_name(),
        predicate: Arc::new(move |value| T::from_value(value).is_ok_and(|v| predicate(&v))),
    }
}

/// Conversion into a [`Matcher`].
///
/// Plain values become equality matchers; matchers pass through.
pub trait IntoMatcher {
    fn into_matcher(self) -> Matcher;
}

impl IntoMatcher for Matcher {
    fn into_matcher(self) -> Matcher {
        self
    }
}

impl<T: IntoValue> IntoMatcher for T {
    fn into_matcher(self) -> Matcher {
        Matcher::Eq(self.into_boxed_value())
    }
}

/// An ordered list of argument matchers.
///
/// Implemented for tuples of up to eight [`IntoMatcher`] values and for
/// `Vec<Matcher>`.
pub trait IntoMatchers {
    fn into_matchers(self) -> Vec<Matcher>;
}

impl IntoMatchers for () {
    fn into_matchers(self) -> Vec<Matcher> {
        Vec::new()
    }
}

impl IntoMatchers for Vec<Matcher> {
    fn into_matchers(self) -> Vec<Matcher> {
        self
    }
}

macro_rules! impl_into_matchers {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name: IntoMatcher),+> IntoMatchers for ($($name,)+) {
            fn into_matchers(self) -> Vec<Matcher> {
                vec![$(self.$idx.into_matcher()),+]
            }
        }
    };
}

impl_into_matchers!(A: 0);
impl_into_matchers!(A: 0, B: 1);
impl_into_matchers!(A: 0, B: 1, C: 2);
impl_into_matchers!(A: 0, B: 1, C: 2, D: 3);
impl_into_matchers!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_into_matchers!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_into_matchers!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_into_matchers!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_matches_equal_values() {
        let m = eq("a");
        assert!(m.matches(&Value::String("a".into())));
        assert!(!m.matches(&Value::String("b".into())));
        assert!(eq(3u8).matches(&Value::Int(3)));
    }

    #[test]
    fn anything_matches_everything() {
        assert!(any().matches(&Value::Null));
        assert!(any().matches(&Value::List(vec![])));
    }

    #[test]
    fn of_type_checks_convertibility() {
        let m = of_type::<String>();
        assert!(m.matches(&Value::String("x".into())));
        assert!(!m.matches(&Value::Int(1)));

        let small = of_type::<u8>();
        assert!(small.matches(&Value::Int(200)));
        assert!(!small.matches(&Value::Int(300)));
    }

    #[test]
    fn tuples_convert_in_order() {
        let matchers = ("a", any(), 3i32).into_matchers();
        assert_eq!(matchers.len(), 3);
        assert!(matchers[0].matches(&Value::String("a".into())));
        assert!(matchers[1].matches(&Value::Bool(false)));
        assert!(matchers[2].matches(&Value::Int(3)));
        assert!(().into_matchers().is_empty());
    }

    #[test]
    fn debug_descriptions() {
        assert_eq!(format!("{:?}", eq("a")), "\"a\"");
        assert_eq!(format!("{:?}", any()), "any()");
        assert_eq!(format!("{:?}", of_type::<String>()), "of_type::<String>()");
        assert_eq!(
            format!("{:?}", matched_by(|n: &i32| *n > 0)),
            "matched_by(|i32|)"
        );
    }
}
