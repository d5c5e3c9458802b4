//! Core types shared by the funcmock crates.
//!
//! ## Key Types
//!
//! - [`Value`]: generic, comparable representation of an argument or result
//! - [`Slot`]: a Rust type that can be boxed into and out of a [`Value`]
//! - [`Params`], [`IntoValues`], [`Returns`]: whole-list marshalling
//! - [`FunctionTypeDescriptor`]: introspectable shape of a function type

mod descriptor;
mod error;
mod marshal;
mod slot;
mod value;

pub use descriptor::{
    FunctionFlags, FunctionTypeDescriptor, TypeDescriptor, TypeKind, short_type_name,
};
pub use error::ConversionError;
pub use marshal::{IntoValues, Params, Returns, result_slot};
pub use slot::{IntoValue, Rest, Slot};
pub use value::{NativeBox, NativeValue, Value};
