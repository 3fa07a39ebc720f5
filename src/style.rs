//! Resolution of coding paths into query items.

use std::borrow::Cow;

use crate::config::Config;
use crate::encoder::QueryItem;

/// Appends one scalar to the output, or merges it into the last item.
///
/// `path` is the chain of keys from the root of the `encode` call down
/// to the scalar; `path[0]` is the top-level query key. The style rules
/// key off its depth:
///
/// * `explode` on, depth 2 (a field of an object one level under the
///   top key): the field becomes its own parameter, named `path[1]`,
///   or `path[0][path[1]]` with `deep_object`. The top key alone is
///   dropped.
/// * `explode` on, otherwise: a new item named `path[0]` per value.
/// * `explode` off, depth 2: the object linearizes into a single
///   `key=field1,val1,field2,val2` item, always comma-joined.
/// * `explode` off, otherwise: values join into a single item using the
///   configured delimiter.
///
/// The depth-2 check is an exact match: the styles are only defined for
/// one level of object nesting, so deeper scalars fall into the
/// "otherwise" branches and collapse onto the top-level key.
///
/// Merging only ever inspects the literal last item, so depth-first
/// traversal order is what keeps unrelated keys from folding into each
/// other.
pub(crate) fn append(
    items: &mut Vec<QueryItem>,
    path: &[Cow<'static, str>],
    value: &str,
    config: &Config,
) {
    let Some(top) = path.first() else {
        // A scalar at the root has no key to attach to.
        return;
    };
    let top: &str = top;

    if config.explode {
        if path.len() == 2 {
            let field: &str = &path[1];
            if config.is_deep_object {
                items.push(QueryItem::new(format!("{top}[{field}]"), value));
            } else {
                items.push(QueryItem::new(field, value));
            }
        } else {
            items.push(QueryItem::new(top, value));
        }
        return;
    }

    let (value, delimiter) = if path.len() == 2 {
        let field: &str = &path[1];
        (Cow::Owned(format!("{field},{value}")), ",")
    } else {
        (Cow::Borrowed(value), config.delimiter.as_str())
    };

    match items.last_mut() {
        Some(last) if last.name == top => {
            last.value = Some(match last.value.take() {
                Some(existing) => format!("{existing}{delimiter}{value}"),
                None => value.into_owned(),
            });
        }
        _ => items.push(QueryItem::new(top, value.into_owned())),
    }
}
