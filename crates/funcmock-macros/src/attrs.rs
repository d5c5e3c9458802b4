//! Attribute parsing for the derive macros.

use syn::{Attribute, LitStr};

/// Parsed `#[slot(...)]` attributes on a type.
#[derive(Debug, Default)]
pub struct SlotAttrs {
    /// Override name for failure messages (default: Rust type path)
    pub name: Option<String>,
}

impl SlotAttrs {
    /// Parse attributes from a list of `#[slot(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("slot") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error(format!(
                        "unknown slot attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )))
                }
            })?;
        }

        Ok(result)
    }
}
