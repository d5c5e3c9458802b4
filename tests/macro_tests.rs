//! Integration tests for `#[derive(Slot)]`.

#![cfg(feature = "derive")]

use funcmock::{Slot, TypeKind, Value, for_fn};

/// Test basic `#[derive(Slot)]` usage.
#[derive(Debug, Clone, PartialEq, Slot)]
struct UserId(u64);

#[test]
fn test_simple_slot_derive() {
    assert_eq!(UserId::KIND, TypeKind::Native);
    assert!(UserId::type_name().ends_with("UserId"));

    let value = UserId(7).into_value();
    assert_eq!(value, Value::native(UserId(7)));
    assert_eq!(UserId::from_value(&value).unwrap(), UserId(7));
}

/// Test `#[derive(Slot)]` with a custom name.
#[derive(Debug, Clone, PartialEq, Slot)]
#[slot(name = "ParseError")]
struct ParseFailure {
    line: u32,
    reason: String,
}

#[test]
fn test_slot_derive_with_name() {
    assert_eq!(ParseFailure::type_name(), "ParseError");

    assert!(ParseFailure::from_value(&Value::Int(1)).is_err());
    assert_eq!(for_fn::<dyn Fn(ParseFailure)>().to_string(), "fn(ParseError)");
}

/// Test `#[derive(Slot)]` on a generic enum.
#[derive(Debug, Clone, PartialEq, Default, Slot)]
enum Reply<T> {
    Ready(T),
    #[default]
    Pending,
}

#[test]
fn test_slot_derive_generic() {
    let value = Reply::Ready(3u8).into_value();
    assert_eq!(Reply::<u8>::from_value(&value).unwrap(), Reply::Ready(3));
    assert!(Reply::<String>::from_value(&value).is_err());
    assert_eq!(
        Reply::<u8>::from_value(&Reply::<u8>::Pending.into_value()).unwrap(),
        Reply::Pending
    );
}

#[test]
fn test_derived_types_cross_the_call_boundary() {
    let builder = for_fn::<dyn Fn(UserId) -> Result<Reply<String>, ParseFailure>>();
    builder
        .on((UserId(1),))
        .returns((Reply::Ready("alice".to_string()), None::<ParseFailure>));
    builder.on((UserId(2),)).returns((
        None::<Reply<String>>,
        ParseFailure {
            line: 3,
            reason: "bad".into(),
        },
    ));

    let f = builder.build();
    assert_eq!(f(UserId(1)), Ok(Reply::Ready("alice".to_string())));
    assert_eq!(
        f(UserId(2)),
        Err(ParseFailure {
            line: 3,
            reason: "bad".into()
        })
    );
}
