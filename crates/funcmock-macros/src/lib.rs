//! funcmock Proc Macros
//!
//! - `#[derive(Slot)]` - carry a user type through mock arguments and results
//!
//! # Example
//!
//! ```ignore
//! use funcmock::Slot;
//!
//! #[derive(Debug, Clone, PartialEq, Slot)]
//! #[slot(name = "ParseError")]
//! pub struct MyError(String);
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_slot;

/// Derive the `Slot` trait for a type.
///
/// The type is boxed as a native value, so it must be
/// `Clone + PartialEq + Debug + Send + Sync + 'static`.
///
/// # Attributes
///
/// - `#[slot(name = "...")]` - Override the name shown in failure messages
#[proc_macro_derive(Slot, attributes(slot))]
pub fn derive_slot(input: TokenStream) -> TokenStream {
    derive_slot::derive_slot_impl(input)
}
