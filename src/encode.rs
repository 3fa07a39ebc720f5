use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, PercentEncode, utf8_percent_encode};

/// Characters percent-encoded in names and values.
///
/// Everything RFC 3986 allows in a query component stays literal: the
/// unreserved characters, the sub-delims, and `:` `@` `/` `?`. In
/// particular `,` survives (delimiter-joined values stay readable)
/// while space, `|`, `[`, `]`, `"`, `#`, `<`, `>`, and control
/// characters become `%XX` escapes.
///
/// Note that `&` and `=` are query-legal and therefore not escaped
/// here, matching RFC 3986 component formatters; values containing
/// them are the caller's concern.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?');

pub(crate) fn encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, QUERY_SET)
}
