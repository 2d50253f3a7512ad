use super::Collation;
use crate::Error;

/// The per-connection state the codecs need: the server version announced in
/// the handshake and the session character collation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecContext {
    version: ServerVersion,
    collation: Collation,
}

impl CodecContext {
    pub fn new(version: ServerVersion, collation: Collation) -> Self {
        Self { version, collation }
    }

    /// The version of the server this connection talks to.
    pub fn server_version(&self) -> ServerVersion {
        self.version
    }

    /// The collation negotiated for the session.
    pub fn collation(&self) -> Collation {
        self.collation
    }
}

/// A server version, such as `8.0.35`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    major: u16,
    minor: u16,
    patch: u16,
}

impl ServerVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a handshake version banner such as `8.0.35-0ubuntu0.22.04.1`.
    ///
    /// Each group is read up to its first non-digit; missing groups are zero.
    pub fn parse(banner: &str) -> crate::Result<Self> {
        let mut parts = banner.splitn(3, '.');

        match parts.next().and_then(leading_number) {
            Some(major) => {
                let minor = parts.next().and_then(leading_number).unwrap_or(0);
                let patch = parts.next().and_then(leading_number).unwrap_or(0);

                Ok(Self::new(major, minor, patch))
            }
            None => Err(Error::Protocol(
                format!("invalid server version banner: {}", banner).into(),
            )),
        }
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }

    pub fn patch(&self) -> u16 {
        self.patch
    }
}

fn leading_number(part: &str) -> Option<u16> {
    let end = part
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(part.len());

    part[..end].parse().ok()
}
