use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::ser::{self, Serialize, Serializer};

use crate::error::{Error, Result};

/// Sentinel newtype-struct name used to smuggle dates through the
/// `Serialize` contract so the encoder can intercept them and apply the
/// active strategy. The payload is the timestamp in epoch milliseconds.
pub(crate) const TOKEN: &str = "$url_query_encoder::private::Date";

/// A date value for query encoding.
///
/// Wraps a UTC timestamp; how it renders is decided by the encoder's
/// [`DateEncodingStrategy`], not by the value itself.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use url_query_encoder::Date;
///
/// let date = Date::from(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap());
/// ```
///
/// Serializing a `Date` with any other serializer produces its epoch
/// milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(pub DateTime<Utc>);

impl<Tz: TimeZone> From<DateTime<Tz>> for Date {
    fn from(date: DateTime<Tz>) -> Self {
        Date(date.with_timezone(&Utc))
    }
}

impl From<SystemTime> for Date {
    fn from(time: SystemTime) -> Self {
        Date(time.into())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(TOKEN, &self.0.timestamp_millis())
    }
}

/// How [`Date`] values are rendered.
#[derive(Clone, Default)]
pub enum DateEncodingStrategy {
    /// RFC 3339 with the UTC `Z` designator, whole seconds. The
    /// default.
    #[default]
    Iso8601,
    /// Decimal seconds since the Unix epoch, e.g. `978307200.0`.
    SecondsSinceEpoch,
    /// Integer milliseconds since the Unix epoch.
    MillisecondsSinceEpoch,
    /// A chrono `strftime` format string.
    Formatted(String),
    /// An arbitrary formatting function.
    Custom(Arc<dyn Fn(DateTime<Utc>) -> String + Send + Sync>),
}

impl fmt::Debug for DateEncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iso8601 => f.write_str("Iso8601"),
            Self::SecondsSinceEpoch => f.write_str("SecondsSinceEpoch"),
            Self::MillisecondsSinceEpoch => f.write_str("MillisecondsSinceEpoch"),
            Self::Formatted(format) => f.debug_tuple("Formatted").field(format).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl DateEncodingStrategy {
    pub(crate) fn format_millis(&self, millis: i64) -> Result<String> {
        match self {
            Self::Iso8601 => Ok(to_date(millis)?.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::SecondsSinceEpoch => {
                let mut buffer = ryu::Buffer::new();
                Ok(buffer.format(millis as f64 / 1000.0).to_owned())
            }
            Self::MillisecondsSinceEpoch => {
                let mut buffer = itoa::Buffer::new();
                Ok(buffer.format(millis).to_owned())
            }
            Self::Formatted(format) => {
                use std::fmt::Write as _;

                // chrono reports a bad specifier through the Display
                // impl, not at construction; going through `write!`
                // keeps that an error instead of a panic.
                let mut out = String::new();
                write!(out, "{}", to_date(millis)?.format(format))
                    .map_err(|_| Error::InvalidDateFormat)?;
                Ok(out)
            }
            Self::Custom(with) => Ok(with(to_date(millis)?)),
        }
    }
}

fn to_date(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(Error::DateOutOfRange)
}

/// Recovers the epoch-millisecond payload of the sentinel newtype.
pub(crate) fn extract_millis<T: ?Sized + Serialize>(value: &T) -> Result<i64> {
    value.serialize(MillisSerializer)
}

struct MillisSerializer;

macro_rules! millis_unsupported {
    ($($meth:ident: $ty:ty,)*) => {
        $(
            fn $meth(self, _v: $ty) -> Result<i64> {
                Err(Error::Unsupported)
            }
        )*
    };
}

impl Serializer for MillisSerializer {
    type Ok = i64;
    type Error = Error;
    type SerializeSeq = ser::Impossible<i64, Error>;
    type SerializeTuple = ser::Impossible<i64, Error>;
    type SerializeTupleStruct = ser::Impossible<i64, Error>;
    type SerializeTupleVariant = ser::Impossible<i64, Error>;
    type SerializeMap = ser::Impossible<i64, Error>;
    type SerializeStruct = ser::Impossible<i64, Error>;
    type SerializeStructVariant = ser::Impossible<i64, Error>;

    fn serialize_i64(self, v: i64) -> Result<i64> {
        Ok(v)
    }

    millis_unsupported! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
    }

    fn serialize_none(self) -> Result<i64> {
        Err(Error::Unsupported)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<i64> {
        Err(Error::Unsupported)
    }

    fn serialize_unit(self) -> Result<i64> {
        Err(Error::Unsupported)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<i64> {
        Err(Error::Unsupported)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<i64> {
        Err(Error::Unsupported)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<i64> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<i64> {
        Err(Error::Unsupported)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::Unsupported)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::Unsupported)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::Unsupported)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::Unsupported)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::Unsupported)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::Unsupported)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::Unsupported)
    }
}
