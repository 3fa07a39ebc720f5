use std::fmt;

use serde::ser;

/// Errors that can occur while encoding a value.
///
/// The infallible [`QueryEncoder::encode`](crate::QueryEncoder::encode)
/// entry points swallow these; they surface only through the `try_`
/// variants.
#[derive(Debug)]
pub enum Error {
    /// Error raised by a `Serialize` implementation.
    Custom(String),
    /// The value cannot be used in this position, e.g. a sequence used
    /// as a map key.
    Unsupported,
    /// A [`Date`](crate::Date) outside the representable timestamp
    /// range.
    DateOutOfRange,
    /// A [`DateEncodingStrategy::Formatted`](crate::DateEncodingStrategy::Formatted)
    /// format string that chrono cannot render.
    InvalidDateFormat,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Custom(msg) => write!(f, "{msg}"),
            Error::Unsupported => write!(f, "unsupported value"),
            Error::DateOutOfRange => write!(f, "date out of range"),
            Error::InvalidDateFormat => write!(f, "invalid date format string"),
        }
    }
}

impl std::error::Error for Error {}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}
