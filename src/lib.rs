//! Value codecs for the MySQL client protocol (4.1 and later).
//!
//! This crate is the value-coercion layer of a driver: it turns raw result
//! bytes into application values and bound application values into
//! serializable parameters, for both the binary and the text protocol. The
//! transport hands every decode a [`WireValue`] with its [`ColumnDescriptor`]
//! and gets back a [`DecodedValue`]; every encode turns a [`BoundValue`] into
//! a [`Parameter`] the transport serializes later. Codec selection is the job
//! of the ordered [`Codecs`] registry.

#[macro_use]
mod macros;

pub mod error;
mod protocol;

pub(crate) use error::Error;
pub use protocol::{
    wire::{
        BoolParameter, BoundValue, Clob, ClobHandle, ClobParameter, Codec, Codecs,
        ColumnDescriptor, ColumnFlag, ColumnTag, DecodedValue, Parameter, ParameterWriter,
        StreamClob, TargetKind, WireValue,
    },
    CodecContext, Collation, ServerVersion,
};

/// An alias for a result that holds this module's error type as the error.
pub type Result<T> = std::result::Result<T, Error>;
