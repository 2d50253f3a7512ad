use crate::{
    protocol::{
        wire::{
            BoundValue, Clob, ClobHandle, ColumnDescriptor, ColumnTag, Parameter, ParameterWriter,
            TargetKind, WireValue,
        },
        CodecContext, Collation,
    },
    Error,
};
use futures_util::TryStreamExt;
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Mutex, PoisonError},
};

/// Matches a large-object or JSON column holding text, when the caller asks
/// for a streamed character object.
pub(crate) fn can_decode(column: &ColumnDescriptor, target: TargetKind) -> bool {
    if target != TargetKind::Clob || column.collation().is_binary() {
        return false;
    }

    column.r#type().is_lob() || column.r#type() == ColumnTag::Json
}

/// Both protocols lay out a large object's raw bytes the same way, so one
/// path serves binary and text results alike.
pub(crate) fn decode(
    value: &WireValue,
    column: &ColumnDescriptor,
    cx: &CodecContext,
) -> crate::Result<ClobHandle> {
    Ok(ClobHandle::retain(
        value.retain_segments(),
        column.collation(),
        cx.server_version(),
    ))
}

pub(crate) fn can_encode(value: &BoundValue) -> bool {
    matches!(value, BoundValue::Clob(_))
}

pub(crate) fn encode(value: BoundValue, cx: &CodecContext) -> crate::Result<Parameter> {
    match value {
        BoundValue::Clob(clob) => Ok(Parameter::Clob(ClobParameter::new(clob, cx.collation()))),
        other => Err(Error::UnsupportedConversion(
            format!(
                "cannot encode a {} value as a large object parameter",
                other.shape_name()
            )
            .into(),
        )),
    }
}

/// A single-use parameter wrapping a streamed character object and the
/// session collation it will be rendered with.
///
/// The wrapped value is claimed by at most one writer over the parameter's
/// lifetime; a second write, or a write after a discard, fails with
/// [`Error::InvalidParameterState`].
pub struct ClobParameter {
    value: Mutex<Option<Box<dyn Clob>>>,
    collation: Collation,
}

impl ClobParameter {
    pub(crate) fn new(value: Box<dyn Clob>, collation: Collation) -> Self {
        Self {
            value: Mutex::new(Some(value)),
            collation,
        }
    }

    // The claim is the only synchronization over the value: whichever of
    // write and discard exchanges it out first owns it.
    fn claim(&self) -> Option<Box<dyn Clob>> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) async fn write_text(&self, writer: &mut ParameterWriter<'_>) -> crate::Result<()> {
        let clob = self.claim().ok_or(Error::InvalidParameterState(
            "clob has been written or discarded, cannot write twice".into(),
        ))?;

        let mut chunks = clob.stream();

        while let Some(chunk) = chunks.try_next().await? {
            writer.write_str(&chunk, self.collation)?;
        }

        Ok(())
    }

    pub(crate) fn discard(&self) {
        if let Some(clob) = self.claim() {
            clob.discard();
        }
    }
}

impl fmt::Debug for ClobParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClobParameter")
            .field("collation", &self.collation)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ClobParameter {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        let ours = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        let theirs = other.value.lock().unwrap_or_else(PoisonError::into_inner);

        match (ours.as_deref(), theirs.as_deref()) {
            // both claimed: identity has collapsed to the empty state
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::addr_eq(a as *const dyn Clob, b as *const dyn Clob),
            _ => false,
        }
    }
}

impl Eq for ClobParameter {}

impl Hash for ClobParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let value = self.value.lock().unwrap_or_else(PoisonError::into_inner);

        match value.as_deref() {
            Some(clob) => ((clob as *const dyn Clob) as *const () as usize).hash(state),
            None => 0usize.hash(state),
        }
    }
}
