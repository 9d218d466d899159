//! The closed set of primitive values an entry can hold.
//!
//! # Why an enum? (for beginners)
//!
//! A configuration entry may hold an integer, a float or a string, but only
//! ever one of them at a time.  A Rust `enum` with a payload per variant is a
//! *tagged union*: the compiler stores which variant is active next to the
//! payload, so the "type tag" can never disagree with the data it describes.
//!
//! The [`Primitive`] trait connects each Rust type (`u32`, `String`, ...) to
//! its variant so callers can write `value.get::<u32>()` and get a typed
//! result, or a [`StoreError::TypeMismatch`] when the active variant differs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{ParseValueError, StoreError};

// ── Value types ───────────────────────────────────────────────────────────────

/// Identifies which variant of [`Value`] is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Str,
}

impl ValueType {
    /// Every supported type, in declaration order.
    pub const ALL: [ValueType; 7] = [
        ValueType::I32,
        ValueType::I64,
        ValueType::U32,
        ValueType::U64,
        ValueType::F32,
        ValueType::F64,
        ValueType::Str,
    ];

    /// Returns the 3-character tag written after `->` in the text format.
    pub fn tag(self) -> &'static str {
        match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::U32 => "u32",
            ValueType::U64 => "u64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Str => "str",
        }
    }

    /// Maps a type tag back to its type.  Returns `None` for unknown tags.
    ///
    /// ```rust
    /// use scfg_core::ValueType;
    ///
    /// assert_eq!(ValueType::from_tag("u64"), Some(ValueType::U64));
    /// assert_eq!(ValueType::from_tag("bool"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        ValueType::ALL.into_iter().find(|ty| ty.tag() == tag)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Value ─────────────────────────────────────────────────────────────────────

/// A single typed configuration value.
///
/// Serializes as `{"type": "<tag>", "value": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
}

impl Value {
    /// Returns the type of the active variant.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::U32(_) => ValueType::U32,
            Value::U64(_) => ValueType::U64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::Str(_) => ValueType::Str,
        }
    }

    /// Returns a copy of the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TypeMismatch`] if `T` is not the active type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scfg_core::{StoreError, Value, ValueType};
    ///
    /// let value = Value::from(8080u32);
    /// assert_eq!(value.get::<u32>(), Ok(8080));
    /// assert_eq!(
    ///     value.get::<i64>(),
    ///     Err(StoreError::TypeMismatch { expected: ValueType::I64, actual: ValueType::U32 })
    /// );
    /// ```
    pub fn get<T: Primitive>(&self) -> Result<T, StoreError> {
        T::from_value(self).ok_or(StoreError::TypeMismatch {
            expected: T::TYPE,
            actual: self.value_type(),
        })
    }

    /// Returns a mutable reference to the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TypeMismatch`] if `T` is not the active type.
    pub fn get_mut<T: Primitive>(&mut self) -> Result<&mut T, StoreError> {
        let actual = self.value_type();
        T::from_value_mut(self).ok_or(StoreError::TypeMismatch {
            expected: T::TYPE,
            actual,
        })
    }

    /// Replaces the payload and the active type in one step.
    pub fn set(&mut self, value: impl Into<Value>) {
        *self = value.into();
    }

    /// Parses `raw` as a value of `value_type`.
    ///
    /// Numbers use the standard library parsers, so anything [`Display`]
    /// writes parses back to the same value.  Strings are taken verbatim.
    ///
    /// [`Display`]: fmt::Display
    ///
    /// # Errors
    ///
    /// Returns [`ParseValueError`] if `raw` is not a valid number of the
    /// requested type (including out-of-range values).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scfg_core::{Value, ValueType};
    ///
    /// assert_eq!(Value::parse(ValueType::I32, "-5"), Ok(Value::I32(-5)));
    /// assert!(Value::parse(ValueType::U32, "-5").is_err());
    /// ```
    pub fn parse(value_type: ValueType, raw: &str) -> Result<Value, ParseValueError> {
        Ok(match value_type {
            ValueType::I32 => Value::I32(parse_number(value_type, raw)?),
            ValueType::I64 => Value::I64(parse_number(value_type, raw)?),
            ValueType::U32 => Value::U32(parse_number(value_type, raw)?),
            ValueType::U64 => Value::U64(parse_number(value_type, raw)?),
            ValueType::F32 => Value::F32(parse_number(value_type, raw)?),
            ValueType::F64 => Value::F64(parse_number(value_type, raw)?),
            ValueType::Str => Value::Str(raw.to_string()),
        })
    }

    /// Borrows the payload of a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the payload in the form used by the text format.
    ///
    /// Numbers use the standard library's shortest round-trip representation;
    /// strings are written verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

fn parse_number<T>(value_type: ValueType, raw: &str) -> Result<T, ParseValueError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ParseValueError {
        value_type,
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

// ── Typed access ──────────────────────────────────────────────────────────────

mod sealed {
    pub trait Sealed {}
}

/// A Rust type that maps onto exactly one [`Value`] variant.
///
/// Implemented for `i32`, `i64`, `u32`, `u64`, `f32`, `f64` and `String`.
/// The trait is sealed: the set of types is fixed.
pub trait Primitive: Sized + Into<Value> + sealed::Sealed {
    /// The variant this type is stored as.
    const TYPE: ValueType;

    /// Extracts a copy of the payload if `value` holds this type.
    fn from_value(value: &Value) -> Option<Self>;

    /// Borrows the payload mutably if `value` holds this type.
    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const TYPE: ValueType = ValueType::$variant;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_primitive! {
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
