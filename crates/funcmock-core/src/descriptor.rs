//! Type and function-type descriptors.
//!
//! A [`FunctionTypeDescriptor`] is the introspectable shape of a mocked
//! function: its ordered parameter types, ordered return slots and flags. It
//! is built once per builder and never changes.

use std::any::TypeId;
use std::fmt;

use bitflags::bitflags;

use crate::slot::Slot;

/// Broad category of a type.
///
/// The category decides nothing at call time (zero values come from
/// `Default`); it exists so descriptors can be inspected and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `bool`
    Bool,
    /// Integers and floats
    Numeric,
    /// `String`, `char`
    Text,
    /// `Option<T>`: absence is preserved as `None`
    Nullable,
    /// `Vec<T>` and other collections
    Aggregate,
    /// User types carried as native values
    Native,
    /// An already boxed `Value`
    Dynamic,
    /// A callable type
    Function,
}

/// Description of a single type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe a slot type.
    pub fn of<T: Slot>() -> Self {
        Self {
            name: T::type_name(),
            type_id: TypeId::of::<T>(),
            kind: T::KIND,
        }
    }

    /// Describe any type with an explicit kind.
    pub fn with_kind<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind,
        }
    }

    /// Describe a callable type.
    pub fn function<F: ?Sized + 'static>() -> Self {
        Self::with_kind::<F>(TypeKind::Function)
    }

    /// Full Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped.
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Check if this describes a callable.
    pub fn is_function(&self) -> bool {
        self.kind == TypeKind::Function
    }
}

bitflags! {
    /// Properties of a function type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FunctionFlags: u8 {
        /// The last parameter collects the remaining arguments
        const VARIADIC = 1 << 0;
        /// The callable is `Send + Sync`
        const THREAD_SAFE = 1 << 1;
    }
}

/// Shape of a mocked function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTypeDescriptor {
    ty: TypeDescriptor,
    params: Vec<TypeDescriptor>,
    returns: Vec<TypeDescriptor>,
    output: &'static str,
    flags: FunctionFlags,
}

impl FunctionTypeDescriptor {
    /// Create a descriptor.
    ///
    /// `output` is the declared return type's name; `returns` lists the
    /// individual result slots it is assembled from.
    ///
    /// # Panics
    ///
    /// Panics if `ty` does not describe a function. Describing a mock over a
    /// non-callable type is a usage bug, never a runtime condition.
    pub fn new(
        ty: TypeDescriptor,
        params: Vec<TypeDescriptor>,
        returns: Vec<TypeDescriptor>,
        output: &'static str,
        flags: FunctionFlags,
    ) -> Self {
        if !ty.is_function() {
            panic!(
                "type must be a function, got {} ({:?})",
                ty.name(),
                ty.kind()
            );
        }

        Self {
            ty,
            params,
            returns,
            output,
            flags,
        }
    }

    /// Descriptor of the function type itself.
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    pub fn returns(&self) -> &[TypeDescriptor] {
        &self.returns
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn return_count(&self) -> usize {
        self.returns.len()
    }

    pub fn flags(&self) -> FunctionFlags {
        self.flags
    }

    pub fn is_variadic(&self) -> bool {
        self.flags.contains(FunctionFlags::VARIADIC)
    }

    pub fn is_thread_safe(&self) -> bool {
        self.flags.contains(FunctionFlags::THREAD_SAFE)
    }
}

impl fmt::Display for FunctionTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if self.is_variadic() && i + 1 == self.params.len() {
                write!(f, "...")?;
            }
            write!(f, "{}", param.short_name())?;
        }
        write!(f, ")")?;

        if self.output != "()" {
            write!(f, " -> {}", short_type_name(self.output))?;
        }
        Ok(())
    }
}

/// Strip module paths from a Rust type name.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut word = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            word.clear();
        } else if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            out.push_str(&word);
            word.clear();
            out.push(c);
        }
    }
    out.push_str(&word);
    out
}
