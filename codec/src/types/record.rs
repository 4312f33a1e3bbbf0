//! Codec for records of named fields.
//!
//! Fields are encoded back to back in declaration order, with no names, tags, or padding on
//! the wire. Values are exchanged as [Fields]; native Rust structs take part by implementing
//! [crate::IntoValue] and [crate::FromValue].

use crate::{Codec, Error, Fields, SharedCodec, Type, Value};
use bytes::BytesMut;
use std::collections::HashSet;

/// Encodes an ordered list of named fields.
#[derive(Clone, Debug)]
pub struct Record {
    fields: Vec<(String, SharedCodec)>,
}

impl Record {
    /// Creates a record codec, rejecting empty or duplicate field names.
    pub fn new<S: Into<String>>(
        fields: impl IntoIterator<Item = (S, SharedCodec)>,
    ) -> Result<Self, Error> {
        let fields: Vec<(String, SharedCodec)> = fields
            .into_iter()
            .map(|(name, codec)| (name.into(), codec))
            .collect();
        let mut seen = HashSet::with_capacity(fields.len());
        for (name, _) in &fields {
            if name.is_empty() {
                return Err(Error::InvalidConfig("field name is empty".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidConfig(format!("duplicate field {name}")));
            }
        }
        Ok(Self { fields })
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Codec for Record {
    fn value_type(&self) -> Type {
        Type::Record(
            self.fields
                .iter()
                .map(|(name, codec)| (name.clone(), codec.value_type()))
                .collect(),
        )
    }

    fn write(&self, value: &Value, buf: &mut BytesMut) -> Result<(), Error> {
        let Value::Record(input) = value else {
            return Err(Error::InvalidType(format!(
                "expected record, found {}",
                value.kind()
            )));
        };
        if input.len() != self.fields.len() {
            return Err(Error::InvalidType(format!(
                "expected {} fields, found {}",
                self.fields.len(),
                input.len()
            )));
        }
        for (name, codec) in &self.fields {
            let field = input
                .get(name)
                .ok_or_else(|| Error::InvalidType(format!("missing field {name}")))?;
            codec.write(field, buf)?;
        }
        Ok(())
    }

    fn read(&self, buf: &mut &[u8]) -> Result<Value, Error> {
        let mut output = Fields::with_capacity(self.fields.len());
        for (name, codec) in &self.fields {
            output.insert(name.as_str(), codec.read(buf)?);
        }
        Ok(Value::Record(output))
    }

    fn size(&self, _: usize) -> Result<usize, Error> {
        self.fixed_size()
    }

    fn min_size(&self) -> usize {
        self.fields
            .iter()
            .fold(0usize, |total, (_, codec)| total.saturating_add(codec.min_size()))
    }

    fn fixed_size(&self) -> Result<usize, Error> {
        self.fields.iter().try_fold(0usize, |total, (_, codec)| {
            total
                .checked_add(codec.fixed_size()?)
                .ok_or_else(|| Error::InvalidType("record size overflows usize".into()))
        })
    }

    fn size_at_top_level(&self, num_items: usize) -> Result<usize, Error> {
        self.fixed_size()?
            .checked_mul(num_items)
            .ok_or_else(|| Error::InvalidType("record size overflows usize".into()))
    }
}
