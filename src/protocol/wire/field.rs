use crate::Error;
use bytes::Bytes;

/// One column or parameter value as it came off the wire.
///
/// The payload either sits in a single receive buffer, or spans several
/// reference-counted segments when the server split the value across network
/// frames. The protocol flag records whether the value was produced by the
/// binary or the text protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireValue {
    payload: FieldPayload,
    binary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldPayload {
    Plain(Bytes),
    Chunked(Vec<Bytes>),
}

impl WireValue {
    /// A value held in one contiguous receive buffer.
    pub fn plain(bytes: Bytes, binary: bool) -> Self {
        Self {
            payload: FieldPayload::Plain(bytes),
            binary,
        }
    }

    /// A value split across several receive buffer segments.
    pub fn chunked(segments: Vec<Bytes>, binary: bool) -> Self {
        Self {
            payload: FieldPayload::Chunked(segments),
            binary,
        }
    }

    /// True if the value came through the binary protocol.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// The payload as one contiguous slice. Multi-segment values have no
    /// contiguous form; only the large-object codecs accept those.
    pub fn as_bytes(&self) -> crate::Result<&[u8]> {
        match &self.payload {
            FieldPayload::Plain(bytes) => Ok(bytes),
            FieldPayload::Chunked(_) => Err(Error::Protocol(
                "expected a contiguous field value".into(),
            )),
        }
    }

    /// Retains every payload segment for a decoded large-object handle.
    pub(crate) fn retain_segments(&self) -> Vec<Bytes> {
        match &self.payload {
            FieldPayload::Plain(bytes) => vec![bytes.clone()],
            FieldPayload::Chunked(segments) => segments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_exposes_bytes() {
        let value = WireValue::plain(Bytes::from_static(b"abc"), true);
        assert_eq!(b"abc", value.as_bytes().unwrap());
        assert!(value.is_binary());
    }

    #[test]
    fn chunked_value_has_no_contiguous_form() {
        let value = WireValue::chunked(
            vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")],
            false,
        );
        assert!(value.as_bytes().is_err());
    }

    #[test]
    fn retain_clones_every_segment() {
        let value = WireValue::chunked(
            vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")],
            false,
        );
        let segments = value.retain_segments();
        assert_eq!(2, segments.len());
        assert_eq!(b"ab", &segments[0][..]);
    }
}
