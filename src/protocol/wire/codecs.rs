mod boolean;
mod clob;

pub use boolean::BoolParameter;
pub use clob::ClobParameter;

use super::{Clob, ClobHandle, ColumnDescriptor, Parameter, WireValue};
use crate::{protocol::CodecContext, Error};
use std::fmt;
use tracing::{event, Level};

/// The application-level shape a decode should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A boolean value.
    Bool,
    /// A streamed character large object.
    Clob,
}

/// A value decoded from one column.
#[derive(Debug)]
pub enum DecodedValue {
    Bool(bool),
    Clob(ClobHandle),
}

impl DecodedValue {
    pub fn into_bool(self) -> Option<bool> {
        match self {
            DecodedValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_clob(self) -> Option<ClobHandle> {
        match self {
            DecodedValue::Clob(handle) => Some(handle),
            _ => None,
        }
    }
}

/// A value bound by the application, before a codec turns it into a
/// [`Parameter`].
///
/// Encoder selection goes by the runtime shape of the value, not by column
/// metadata.
pub enum BoundValue {
    Bool(bool),
    Clob(Box<dyn Clob>),
}

impl BoundValue {
    /// Wraps a streamed character object for binding.
    pub fn clob<C>(value: C) -> Self
    where
        C: Clob + 'static,
    {
        BoundValue::Clob(Box::new(value))
    }

    pub(crate) fn shape_name(&self) -> &'static str {
        match self {
            BoundValue::Bool(_) => "bool",
            BoundValue::Clob(_) => "clob",
        }
    }
}

impl fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            BoundValue::Clob(_) => f.write_str("Clob(..)"),
        }
    }
}

impl From<bool> for BoundValue {
    fn from(value: bool) -> Self {
        BoundValue::Bool(value)
    }
}

impl From<Box<dyn Clob>> for BoundValue {
    fn from(value: Box<dyn Clob>) -> Self {
        BoundValue::Clob(value)
    }
}

/// One registered converter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Fixed-width scalar coercion, including the string-to-boolean rules.
    Boolean,
    /// Streamed character large objects.
    Clob,
}

impl Codec {
    /// True if this codec can decode a column of the given declared type
    /// into `target`.
    pub fn can_decode(&self, column: &ColumnDescriptor, target: TargetKind) -> bool {
        match self {
            Codec::Boolean => boolean::can_decode(column, target),
            Codec::Clob => clob::can_decode(column, target),
        }
    }

    /// Decodes one value. Pure; holds no state between calls.
    pub fn decode(
        &self,
        value: &WireValue,
        column: &ColumnDescriptor,
        cx: &CodecContext,
    ) -> crate::Result<DecodedValue> {
        match self {
            Codec::Boolean => Ok(DecodedValue::Bool(boolean::decode(value, column)?)),
            Codec::Clob => Ok(DecodedValue::Clob(clob::decode(value, column, cx)?)),
        }
    }

    /// True if this codec can encode a value of the given runtime shape.
    pub fn can_encode(&self, value: &BoundValue) -> bool {
        match self {
            Codec::Boolean => boolean::can_encode(value),
            Codec::Clob => clob::can_encode(value),
        }
    }

    /// Turns a bound value into a serializable [`Parameter`].
    pub fn encode(&self, value: BoundValue, cx: &CodecContext) -> crate::Result<Parameter> {
        match self {
            Codec::Boolean => boolean::encode(value),
            Codec::Clob => clob::encode(value, cx),
        }
    }
}

/// The ordered codec registry.
///
/// Registration order is precedence: the first codec whose capability
/// predicate matches wins, so more specific codecs must be registered before
/// more general ones. The order is fixed at construction, never recomputed.
#[derive(Debug, Clone)]
pub struct Codecs {
    registry: Vec<Codec>,
}

impl Codecs {
    /// The default registry.
    pub fn new() -> Self {
        Self {
            registry: vec![Codec::Boolean, Codec::Clob],
        }
    }

    /// Selects the first registered codec able to decode `column` as
    /// `target`.
    pub fn select_decoder(
        &self,
        column: &ColumnDescriptor,
        target: TargetKind,
    ) -> crate::Result<&Codec> {
        self.registry
            .iter()
            .find(|codec| codec.can_decode(column, target))
            .ok_or_else(|| {
                Error::UnsupportedConversion(
                    format!(
                        "no codec can decode a `{}` column as {:?}",
                        column.r#type().name(),
                        target
                    )
                    .into(),
                )
            })
    }

    /// Selects the first registered codec able to encode `value`.
    pub fn select_encoder(&self, value: &BoundValue) -> crate::Result<&Codec> {
        self.registry
            .iter()
            .find(|codec| codec.can_encode(value))
            .ok_or_else(|| {
                Error::UnsupportedConversion(
                    format!("no codec can encode a {} value", value.shape_name()).into(),
                )
            })
    }

    /// Decodes one column value with the first matching codec.
    pub fn decode(
        &self,
        value: &WireValue,
        column: &ColumnDescriptor,
        target: TargetKind,
        cx: &CodecContext,
    ) -> crate::Result<DecodedValue> {
        let codec = self.select_decoder(column, target)?;

        event!(
            Level::TRACE,
            "Decoding a {} column as {:?}",
            column.r#type().name(),
            target,
        );

        codec.decode(value, column, cx)
    }

    /// Encodes one bound value with the first matching codec.
    pub fn encode(&self, value: BoundValue, cx: &CodecContext) -> crate::Result<Parameter> {
        let codec = self.select_encoder(&value)?;

        codec.encode(value, cx)
    }
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}
