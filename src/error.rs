//! Error module
pub use std::io::ErrorKind as IoErrorKind;
use std::{borrow::Cow, convert::Infallible, io};
use thiserror::Error;

/// A unified error enum that contains several errors that might occurr during
/// the lifecycle of this driver
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("An error occured during the attempt of performing I/O: {}", message)]
    /// An error occured when performing I/O to the server.
    Io {
        /// A list specifying general categories of I/O error.
        kind: IoErrorKind,
        /// The error description.
        message: String,
    },
    #[error("Protocol error: {}", _0)]
    /// An error happened during the request or response parsing.
    Protocol(Cow<'static, str>),
    #[error("Encoding error: {}", _0)]
    /// Server responded with encoding not supported.
    Encoding(Cow<'static, str>),
    #[error("Unsupported conversion: {}", _0)]
    /// No registered codec matches the requested conversion.
    UnsupportedConversion(Cow<'static, str>),
    #[error("Cannot coerce the value: {} [SQLSTATE {}]", message, sqlstate)]
    /// A value's textual or numeric form does not satisfy the target type's
    /// grammar. Non-transient; retrying the statement cannot succeed.
    DataCoercion {
        /// The SQLSTATE-style code signalled to the caller.
        sqlstate: &'static str,
        /// The description, carrying the offending literal.
        message: String,
    },
    #[error("Invalid parameter state: {}", _0)]
    /// A single-use parameter was written twice, or written after a discard.
    /// Indicates an execution sequencing bug in the caller.
    InvalidParameterState(Cow<'static, str>),
    #[error("UTF-8 error")]
    /// Tried to convert data to UTF-8 that was not valid.
    Utf8,
}

impl Error {
    /// Returns the SQLSTATE-style code, if the error carries one.
    pub fn sqlstate(&self) -> Option<&'static str> {
        match self {
            Error::DataCoercion { sqlstate, .. } => Some(sqlstate),
            _ => None,
        }
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Self::Io {
            kind: err.kind(),
            message: format!("{}", err),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Error {
        Error::Utf8
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_err: std::string::FromUtf8Error) -> Error {
        Error::Utf8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_io() {
        let err = Error::Io {
            kind: IoErrorKind::ConnectionRefused,
            message: "refused".into(),
        };
        assert!(format!("{}", err).contains("refused"));
    }

    #[test]
    fn error_display_protocol() {
        let err = Error::Protocol("bad protocol".into());
        assert!(format!("{}", err).contains("bad protocol"));
    }

    #[test]
    fn error_display_encoding() {
        let err = Error::Encoding("bad enc".into());
        assert!(format!("{}", err).contains("bad enc"));
    }

    #[test]
    fn error_display_unsupported_conversion() {
        let err = Error::UnsupportedConversion("no codec".into());
        assert!(format!("{}", err).contains("no codec"));
    }

    #[test]
    fn error_display_data_coercion() {
        let err = Error::DataCoercion {
            sqlstate: "22018",
            message: "the value 'Banana' cannot be decoded".into(),
        };
        let s = format!("{}", err);
        assert!(s.contains("Banana") && s.contains("22018"));
    }

    #[test]
    fn error_display_invalid_parameter_state() {
        let err = Error::InvalidParameterState("written twice".into());
        assert!(format!("{}", err).contains("written twice"));
    }

    #[test]
    fn error_sqlstate_for_coercion() {
        let err = Error::DataCoercion {
            sqlstate: "22018",
            message: "nope".into(),
        };
        assert_eq!(Some("22018"), err.sqlstate());
    }

    #[test]
    fn error_sqlstate_none_for_others() {
        assert_eq!(None, Error::Utf8.sqlstate());
        assert_eq!(None, Error::Protocol("x".into()).sqlstate());
    }

    #[test]
    fn error_from_io() {
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(e, Error::Io { .. }));
    }

    #[test]
    fn error_from_utf8_error() {
        let e: Error = std::str::from_utf8(b"\xff").unwrap_err().into();
        assert!(matches!(e, Error::Utf8));
    }

    #[test]
    fn error_from_string_utf8() {
        let e: Error = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert!(matches!(e, Error::Utf8));
    }

    #[test]
    fn error_clone_and_eq() {
        let e1 = Error::Utf8;
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }

    #[test]
    fn error_debug() {
        let err = Error::InvalidParameterState("test".into());
        let s = format!("{:?}", err);
        assert!(s.contains("InvalidParameterState"));
    }
}
