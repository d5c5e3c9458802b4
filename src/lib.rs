//! Recording test doubles for any function type.
//!
//! Name a function type, register what it should return for which
//! arguments, and build a callable of exactly that type to hand to the code
//! under test. Every call is recorded and can be asserted on afterwards.
//!
//! ```
//! use funcmock::{Builder, Panicking, impl_native_slot};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct LookupError(String);
//! impl_native_slot!(LookupError);
//!
//! type Lookup = dyn Fn(String, String) -> Result<String, LookupError>;
//!
//! let lookup = Builder::<Lookup>::new();
//! lookup.on(("eu", "alice")).returns(("alice@eu", None::<LookupError>));
//! lookup.on(("us", "bob")).returns((None::<String>, LookupError("gone".into())));
//!
//! let f = lookup.build();
//! assert_eq!(f("eu".into(), "alice".into()), Ok("alice@eu".to_string()));
//! assert_eq!(f("us".into(), "bob".into()), Err(LookupError("gone".into())));
//!
//! assert!(lookup.assert_expectations(&Panicking));
//! assert!(lookup.assert_number_of_calls(&Panicking, 2));
//! ```
//!
//! # Return values
//!
//! A return type is rebuilt slot by slot from the registered results. Any
//! slot that was not registered, or was registered as `None`, becomes the
//! zero value of its declared type (`Default::default()`).
//!
//! # Features
//!
//! - `derive` (default): `#[derive(Slot)]` for carrying user types
//! - `profiling`: instrument the call path with `profiling` scopes

mod builder;
mod signature;

pub use builder::{Builder, for_fn, like};
pub use signature::{CallAdapter, FnSample, Signature};

pub use funcmock_core::{
    ConversionError, FunctionFlags, FunctionTypeDescriptor, IntoValue, IntoValues, NativeBox,
    NativeValue, Params, Rest, Returns, Slot, TypeDescriptor, TypeKind, Value, impl_native_slot,
    result_slot, short_type_name,
};
pub use funcmock_engine::{
    Arguments, Call, CallRecord, IntoMatcher, IntoMatchers, Matcher, Mock, MockError, Panicking,
    Reporter, TestData, TestDataGuard, any, eq, matched_by, of_type,
};

#[cfg(feature = "derive")]
pub use funcmock_macros::Slot;

/// Method name under which every function mock registers and answers calls.
pub const CALL_SITE: &str = "func";
