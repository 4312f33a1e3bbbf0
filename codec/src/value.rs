//! Dynamic values and the type descriptors that classify them.
//!
//! Every [crate::Codec] reports the [Type] it produces on decode and accepts on encode.
//! Composite codecs use these descriptors to validate their children at construction time,
//! and the [crate::Bridge] uses them to allocate zero values for a named type.
//!
//! Callers that work with native Rust types convert to and from [Value] through the
//! [IntoValue] and [FromValue] traits.

use crate::Error;
use num_bigint::BigInt;
use std::fmt;

/// Identifier of an oracle within a committee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OracleId(pub u8);

impl From<u8> for OracleId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for OracleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oracle-{}", self.0)
    }
}

/// Semantic type of the values a codec produces and consumes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    OracleId,
    BigInt,
    String,
    /// A sequence whose length is part of the type.
    Array(usize, Box<Type>),
    /// A sequence whose length is part of the value.
    Slice(Box<Type>),
    /// Named members in declaration order.
    Record(Vec<(String, Type)>),
    /// A non-null owned reference.
    Pointer(Box<Type>),
    Empty,
}

impl Type {
    /// Returns true if values of this type are fixed-width native integers.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Type::I8
                | Type::I16
                | Type::I32
                | Type::I64
                | Type::U8
                | Type::U16
                | Type::U32
                | Type::U64
        )
    }

    /// Allocates the zero value of this type.
    pub fn zero(&self) -> Value {
        match self {
            Type::Bool => Value::Bool(false),
            Type::I8 => Value::I8(0),
            Type::I16 => Value::I16(0),
            Type::I32 => Value::I32(0),
            Type::I64 => Value::I64(0),
            Type::U8 => Value::U8(0),
            Type::U16 => Value::U16(0),
            Type::U32 => Value::U32(0),
            Type::U64 => Value::U64(0),
            Type::F32 => Value::F32(0.0),
            Type::F64 => Value::F64(0.0),
            Type::OracleId => Value::OracleId(OracleId::default()),
            Type::BigInt => Value::BigInt(BigInt::default()),
            Type::String => Value::String(String::new()),
            Type::Array(len, elem) => Value::List(vec![elem.zero(); *len]),
            Type::Slice(_) => Value::List(Vec::new()),
            Type::Record(fields) => Value::Record(
                fields
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.zero()))
                    .collect(),
            ),
            Type::Pointer(_) => Value::Pointer(None),
            Type::Empty => Value::Empty,
        }
    }
}

/// A dynamically typed value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    OracleId(OracleId),
    BigInt(BigInt),
    String(String),
    /// Elements of an array or a slice.
    List(Vec<Value>),
    Record(Fields),
    /// `None` is the null reference.
    Pointer(Option<Box<Value>>),
    Empty,
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::OracleId(_) => "oracle id",
            Value::BigInt(_) => "big int",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Pointer(_) => "pointer",
            Value::Empty => "empty",
        }
    }

    /// Returns the value of a native integer variant.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::I8(v) => Some(i128::from(*v)),
            Value::I16(v) => Some(i128::from(*v)),
            Value::I32(v) => Some(i128::from(*v)),
            Value::I64(v) => Some(i128::from(*v)),
            Value::U8(v) => Some(i128::from(*v)),
            Value::U16(v) => Some(i128::from(*v)),
            Value::U32(v) => Some(i128::from(*v)),
            Value::U64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Builds a native integer value of type `ty`, if `ty` is an integer type that can hold `v`.
    pub fn integer(ty: &Type, v: i128) -> Option<Value> {
        match ty {
            Type::I8 => i8::try_from(v).ok().map(Value::I8),
            Type::I16 => i16::try_from(v).ok().map(Value::I16),
            Type::I32 => i32::try_from(v).ok().map(Value::I32),
            Type::I64 => i64::try_from(v).ok().map(Value::I64),
            Type::U8 => u8::try_from(v).ok().map(Value::U8),
            Type::U16 => u16::try_from(v).ok().map(Value::U16),
            Type::U32 => u32::try_from(v).ok().map(Value::U32),
            Type::U64 => u64::try_from(v).ok().map(Value::U64),
            _ => None,
        }
    }
}

/// Ordered (name, value) members of a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Appends a member, replacing any existing member with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder-style [Fields::insert].
    pub fn with(mut self, name: impl Into<String>, value: impl IntoValue) -> Self {
        self.insert(name, value.into_value());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Removes and returns the member called `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let idx = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(idx).1)
    }

    /// Removes `name` and converts it to `T`, failing if it is missing or of the wrong kind.
    pub fn take_as<T: FromValue>(&mut self, name: &str) -> Result<T, Error> {
        let value = self
            .take(name)
            .ok_or_else(|| Error::InvalidType(format!("missing field {name}")))?;
        T::from_value(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Conversion of a native value into a [Value].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Conversion of a [Value] into a native value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Error>;
}

fn mismatch(expected: &str, found: &Value) -> Error {
    Error::InvalidType(format!("expected {expected}, found {}", found.kind()))
}

macro_rules! impl_value {
    ($type:ty, $variant:ident) => {
        impl IntoValue for $type {
            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl FromValue for $type {
            #[inline]
            fn from_value(value: Value) -> Result<Self, Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(mismatch(stringify!($type), &other)),
                }
            }
        }
    };
}

impl_value!(bool, Bool);
impl_value!(i8, I8);
impl_value!(i16, I16);
impl_value!(i32, I32);
impl_value!(i64, I64);
impl_value!(u8, U8);
impl_value!(u16, U16);
impl_value!(u32, U32);
impl_value!(u64, U64);
impl_value!(f32, F32);
impl_value!(f64, F64);
impl_value!(OracleId, OracleId);
impl_value!(BigInt, BigInt);
impl_value!(String, String);
impl_value!(Fields, Record);

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Empty
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Empty => Ok(()),
            other => Err(mismatch("empty", &other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl<T: IntoValue, const N: usize> IntoValue for [T; N] {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: Value) -> Result<Self, Error> {
        let items = Vec::<T>::from_value(value)?;
        let len = items.len();
        items
            .try_into()
            .map_err(|_| Error::InvalidType(format!("expected {N} elements, found {len}")))
    }
}

impl<T: IntoValue> IntoValue for Box<T> {
    fn into_value(self) -> Value {
        Value::Pointer(Some(Box::new((*self).into_value())))
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Pointer(Some(inner)) => Ok(Box::new(T::from_value(*inner)?)),
            Value::Pointer(None) => Err(Error::InvalidType("nil pointer".into())),
            other => Err(mismatch("pointer", &other)),
        }
    }
}
