use crate::date::DateEncodingStrategy;

/// Effective configuration for a single `encode` call.
///
/// The encoder keeps one of these as its defaults; per-call overrides
/// produce a resolved copy so the defaults themselves are never
/// touched.
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) explode: bool,
    pub(crate) delimiter: String,
    pub(crate) is_deep_object: bool,
    pub(crate) date_strategy: DateEncodingStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            explode: true,
            delimiter: ",".to_owned(),
            is_deep_object: false,
            date_strategy: DateEncodingStrategy::default(),
        }
    }
}

impl Config {
    pub(crate) fn resolve(&self, options: &EncodeOptions) -> Config {
        Config {
            explode: options.explode.unwrap_or(self.explode),
            delimiter: options
                .delimiter
                .clone()
                .unwrap_or_else(|| self.delimiter.clone()),
            is_deep_object: options.is_deep_object.unwrap_or(self.is_deep_object),
            date_strategy: self.date_strategy.clone(),
        }
    }
}

/// Per-call overrides for
/// [`QueryEncoder::encode_with`](crate::QueryEncoder::encode_with).
///
/// Unset fields fall back to the encoder's defaults. Overrides apply to
/// one call only.
///
/// ```
/// use url_query_encoder::EncodeOptions;
///
/// let options = EncodeOptions::new().explode(false).delimiter("|");
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    explode: Option<bool>,
    delimiter: Option<String>,
    is_deep_object: Option<bool>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a multi-valued field yields one item per value (`true`,
    /// the default) or a single delimiter-joined item (`false`).
    pub fn explode(mut self, explode: bool) -> Self {
        self.explode = Some(explode);
        self
    }

    /// Delimiter joining values when `explode` is off. `","` by
    /// default; use `" "` for `spaceDelimited` and `"|"` for
    /// `pipeDelimited`.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Encode object fields as `key[field]=value` instead of bare
    /// `field=value`.
    pub fn deep_object(mut self, deep_object: bool) -> Self {
        self.is_deep_object = Some(deep_object);
        self
    }
}
