use crate::Error;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// A character collation, identified the way the wire protocol identifies it.
///
/// Every text value travels with a collation id, either in its column
/// definition or negotiated for the session during the handshake. The id
/// determines the character set used to interpret the value's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collation {
    id: u16,
}

impl Collation {
    /// The id of the `binary` pseudo-collation. Values carrying it are raw
    /// bytes, not text.
    pub const BINARY_ID: u16 = 63;

    /// The `binary` pseudo-collation.
    pub const BINARY: Collation = Collation::new(Self::BINARY_ID);

    /// `latin1_swedish_ci`, the historical server default.
    pub const LATIN1_SWEDISH_CI: Collation = Collation::new(8);

    /// `utf8mb4_general_ci`.
    pub const UTF8MB4_GENERAL_CI: Collation = Collation::new(45);

    pub const fn new(id: u16) -> Self {
        Self { id }
    }

    /// Get the collation's id.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// True for the `binary` pseudo-collation.
    pub fn is_binary(&self) -> bool {
        self.id == Self::BINARY_ID
    }

    /// The character encoding used to interpret text under this collation.
    ///
    /// The `latin1` family maps to windows-1252, which is what the server
    /// actually stores for it. Unknown ids fall back to UTF-8, the modern
    /// server default.
    pub fn encoding(&self) -> crate::Result<&'static Encoding> {
        match self.id {
            Self::BINARY_ID => Err(Error::Encoding(
                "the binary collation does not describe a character set".into(),
            )),
            5 | 8 | 15 | 31 | 47 | 48 | 49 | 94 => Ok(WINDOWS_1252),
            _ => Ok(UTF_8),
        }
    }
}
