use crate::{
    protocol::{Collation, ServerVersion},
    Error,
};
use bytes::Bytes;
use futures_util::{
    stream::{self, BoxStream},
    Stream, StreamExt, TryStreamExt,
};

/// A streamed character large object, supplied by the application as a
/// statement parameter.
///
/// The object is consumed destructively: either its chunk stream is drained
/// once by a parameter write, or [`discard`](Clob::discard) tells the source
/// to release its resources without producing the content.
pub trait Clob: Send {
    /// The sequence of character chunks making up the value.
    fn stream(self: Box<Self>) -> BoxStream<'static, crate::Result<String>>;

    /// Releases the source's resources without reading the content.
    fn discard(self: Box<Self>);
}

/// Adapts any chunk stream into a [`Clob`].
///
/// Discarding drops the stream, which is the cancellation signal for any
/// upstream producer.
pub struct StreamClob {
    chunks: BoxStream<'static, crate::Result<String>>,
}

impl StreamClob {
    pub fn new<S>(chunks: S) -> Self
    where
        S: Stream<Item = crate::Result<String>> + Send + 'static,
    {
        Self {
            chunks: Box::pin(chunks),
        }
    }
}

impl Clob for StreamClob {
    fn stream(self: Box<Self>) -> BoxStream<'static, crate::Result<String>> {
        self.chunks
    }

    fn discard(self: Box<Self>) {}
}

impl From<String> for StreamClob {
    fn from(content: String) -> Self {
        Self::new(stream::iter([Ok(content)]))
    }
}

/// A decoded character large object.
///
/// The handle retains the receive buffer segments backing the value instead
/// of copying them out. Dropping the handle, or the chunk stream made from
/// it, releases every retained segment exactly once.
#[derive(Debug)]
pub struct ClobHandle {
    segments: Vec<Bytes>,
    collation: Collation,
    version: ServerVersion,
}

impl ClobHandle {
    pub(crate) fn retain(
        segments: Vec<Bytes>,
        collation: Collation,
        version: ServerVersion,
    ) -> Self {
        Self {
            segments,
            collation,
            version,
        }
    }

    /// The collation of the column the value was read from.
    pub fn collation(&self) -> Collation {
        self.collation
    }

    /// The version of the server that produced the value. Historical servers
    /// need version-specific charset handling when the chunks are decoded.
    pub fn server_version(&self) -> ServerVersion {
        self.version
    }

    /// The decoded character chunks, one per retained segment.
    ///
    /// The stream consumes the handle and cannot be restarted; once it is
    /// exhausted or dropped, the retained segments are released.
    pub fn chunks(self) -> impl Stream<Item = crate::Result<String>> + Send {
        let collation = self.collation;

        stream::iter(self.segments).map(move |segment| decode_chunk(&segment, collation))
    }

    /// Drains [`chunks`](Self::chunks) into a single string.
    pub async fn read_to_string(self) -> crate::Result<String> {
        self.chunks()
            .try_fold(String::new(), |mut acc, chunk| async move {
                acc.push_str(&chunk);
                Ok(acc)
            })
            .await
    }
}

fn decode_chunk(segment: &[u8], collation: Collation) -> crate::Result<String> {
    let encoding = collation.encoding()?;
    let (text, _, had_errors) = encoding.decode(segment);

    if had_errors {
        return Err(Error::Encoding(
            "large object payload is not valid for its collation".into(),
        ));
    }

    Ok(text.into_owned())
}
