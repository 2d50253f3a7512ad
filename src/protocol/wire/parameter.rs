use super::{
    codecs::{BoolParameter, ClobParameter},
    ColumnTag,
};
use crate::{protocol::Collation, Error};
use bytes::{BufMut, Bytes, BytesMut};

/// A statement parameter ready to be serialized onto the wire.
///
/// The declared wire type is fixed when the parameter is built and stays the
/// same across execution retries.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// A boolean, one of two shared constants.
    Bool(BoolParameter),
    /// A single-use streamed character large object.
    Clob(ClobParameter),
}

impl Parameter {
    /// The wire type tag announced for this parameter.
    pub fn r#type(&self) -> ColumnTag {
        match self {
            // a BIT parameter carries a length-prefixed payload of at least
            // two bytes; TINYINT holds the same information in exactly one
            Parameter::Bool(_) => ColumnTag::Tiny,
            Parameter::Clob(_) => ColumnTag::LongBlob,
        }
    }

    /// Serializes the parameter for the binary protocol, taking the
    /// destination buffer from `allocator`.
    pub async fn write_binary(&self, allocator: &mut BytesMut) -> crate::Result<Bytes> {
        match self {
            Parameter::Bool(param) => {
                let mut buf = allocator.split_off(allocator.len());
                buf.put_u8(param.value() as u8);

                Ok(buf.freeze())
            }
            Parameter::Clob(_) => Err(Error::Protocol(
                "large character objects have no binary parameter encoding".into(),
            )),
        }
    }

    /// Serializes the parameter for the text protocol.
    pub async fn write_text(&self, writer: &mut ParameterWriter<'_>) -> crate::Result<()> {
        match self {
            Parameter::Bool(param) => {
                writer.write_int(if param.value() { 1 } else { 0 });
                Ok(())
            }
            Parameter::Clob(param) => param.write_text(writer).await,
        }
    }

    /// Releases an unwritten parameter's resources.
    ///
    /// The statement layer calls this for every parameter still pending when
    /// an execution is cancelled. After a completed write it is a no-op.
    pub fn discard(&self) {
        if let Parameter::Clob(param) = self {
            param.discard();
        }
    }
}

/// Writes text-protocol parameter literals into the outbound statement
/// buffer.
///
/// Quoting and escaping of string literals belong to the statement assembly
/// layer; this writer only renders values through the right character set.
#[derive(Debug)]
pub struct ParameterWriter<'a> {
    dst: &'a mut BytesMut,
}

impl<'a> ParameterWriter<'a> {
    pub fn new(dst: &'a mut BytesMut) -> Self {
        Self { dst }
    }

    /// Writes a decimal integer literal.
    pub fn write_int(&mut self, value: i64) {
        self.dst.extend_from_slice(value.to_string().as_bytes());
    }

    /// Encodes `text` with `collation`'s character set and appends it.
    pub fn write_str(&mut self, text: &str, collation: Collation) -> crate::Result<()> {
        let mut encoder = collation.encoding()?.new_encoder();
        let len = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .ok_or_else(|| Error::Encoding("string too large to encode".into()))?;

        let mut bytes = Vec::with_capacity(len);
        let (res, _) =
            encoder.encode_from_utf8_to_vec_without_replacement(text, &mut bytes, true);

        if let encoding_rs::EncoderResult::Unmappable(_) = res {
            return Err(Error::Encoding("unrepresentable character".into()));
        }

        self.dst.extend_from_slice(&bytes);

        Ok(())
    }
}
