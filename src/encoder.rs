//! The accumulating query encoder.

use serde::ser;

use crate::config::{Config, EncodeOptions};
use crate::date::DateEncodingStrategy;
use crate::encode::encode;
use crate::error::Result;
use crate::ser::ValueSerializer;

/// One name/value pair of the output. Several items may share a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    /// `None` renders as a bare name with no `=`. The encoder itself
    /// only ever produces `Some` values; `None` is accepted in
    /// caller-built lists fed to
    /// [`QueryEncoder::percent_encoded_data`].
    pub value: Option<String>,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// Encodes `Serialize` values into an ordered list of query items.
///
/// The encoder is an accumulator: every `encode` call appends to the
/// same item list, in call order, and nothing is ever removed or
/// reordered. Defaults set on the encoder apply to every call;
/// [`EncodeOptions`] overrides apply to a single call.
///
/// ```
/// use std::collections::HashMap;
///
/// use url_query_encoder::QueryEncoder;
///
/// let mut encoder = QueryEncoder::new().explode(false).delimiter("|");
/// encoder.encode(&HashMap::from([("id", vec![3, 4, 5])]));
///
/// assert_eq!(encoder.query(), "id=3|4|5");
/// assert_eq!(encoder.percent_encoded_query(), "id=3%7C4%7C5");
/// ```
///
/// Encoding takes `&mut self`, so one instance cannot be shared across
/// threads mid-call; use one encoder per thread when encoding
/// concurrently.
#[derive(Debug, Default)]
pub struct QueryEncoder {
    defaults: Config,
    items: Vec<QueryItem>,
}

impl QueryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default `explode` behavior. On by default.
    pub fn explode(mut self, explode: bool) -> Self {
        self.defaults.explode = explode;
        self
    }

    /// Sets the default delimiter used when `explode` is off. `","` by
    /// default.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.defaults.delimiter = delimiter.into();
        self
    }

    /// Encode object fields as `key[field]=value` instead of bare
    /// `field=value`. Off by default.
    pub fn deep_object(mut self, deep_object: bool) -> Self {
        self.defaults.is_deep_object = deep_object;
        self
    }

    /// Sets the strategy for [`Date`](crate::Date) values. By default,
    /// [`DateEncodingStrategy::Iso8601`].
    pub fn date_encoding_strategy(mut self, strategy: DateEncodingStrategy) -> Self {
        self.defaults.date_strategy = strategy;
        self
    }

    /// Encodes `value` with the encoder's defaults, appending to the
    /// accumulated items.
    ///
    /// Best-effort: a failing `Serialize` implementation leaves
    /// whatever items were appended before the failure in place and is
    /// otherwise ignored. Use [`QueryEncoder::try_encode`] to observe
    /// the error.
    pub fn encode<T: ser::Serialize>(&mut self, value: &T) {
        self.encode_with(value, EncodeOptions::new());
    }

    /// Encodes `value` with per-call overrides. Best-effort, like
    /// [`QueryEncoder::encode`].
    pub fn encode_with<T: ser::Serialize>(&mut self, value: &T, options: EncodeOptions) {
        let _ = self.try_encode_with(value, options);
    }

    /// Fallible variant of [`QueryEncoder::encode`]. Items appended
    /// before an error remain in place.
    pub fn try_encode<T: ser::Serialize>(&mut self, value: &T) -> Result<()> {
        self.try_encode_with(value, EncodeOptions::new())
    }

    /// Fallible variant of [`QueryEncoder::encode_with`].
    pub fn try_encode_with<T: ser::Serialize>(
        &mut self,
        value: &T,
        options: EncodeOptions,
    ) -> Result<()> {
        let config = self.defaults.resolve(&options);
        let mut serializer = ValueSerializer::new(&mut self.items, &config);
        value.serialize(&mut serializer)
    }

    /// The accumulated items, in insertion order.
    pub fn items(&self) -> &[QueryItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<QueryItem> {
        self.items
    }

    /// The query as a raw, unencoded `name=value&...` string. Empty
    /// when nothing has been encoded.
    pub fn query(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&item.name);
            if let Some(value) = &item.value {
                out.push('=');
                out.push_str(value);
            }
        }
        out
    }

    /// The query with names and values percent-encoded per the RFC 3986
    /// query-component rules.
    pub fn percent_encoded_query(&self) -> String {
        encoded_query(&self.items)
    }

    /// Builds the percent-encoded byte payload for an arbitrary item
    /// list, without going through an encoder instance.
    pub fn percent_encoded_data(items: &[QueryItem]) -> Vec<u8> {
        encoded_query(items).into_bytes()
    }
}

fn encoded_query(items: &[QueryItem]) -> String {
    let mut out = String::new();
    for item in items {
        if !out.is_empty() {
            out.push('&');
        }
        for part in encode(&item.name) {
            out.push_str(part);
        }
        if let Some(value) = &item.value {
            out.push('=');
            for part in encode(value) {
                out.push_str(part);
            }
        }
    }
    out
}

/// One-shot encoding with the default configuration, returning the
/// percent-encoded query.
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Query {
///     name: String,
///     age: u8,
/// }
///
/// let query = Query {
///     name: "Alice".to_owned(),
///     age: 24,
/// };
///
/// assert_eq!(url_query_encoder::to_string(&query).unwrap(), "name=Alice&age=24");
/// ```
pub fn to_string<T: ser::Serialize>(value: &T) -> Result<String> {
    let mut encoder = QueryEncoder::new();
    encoder.try_encode(value)?;
    Ok(encoder.percent_encoded_query())
}
