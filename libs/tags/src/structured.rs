//! Helpers for ids that are composed of several fields.
//!
//! Canonical tag strings use `-` to separate the kind from the payload, and
//! several kinds carry a `/` inside their id. These helpers translate between
//! the two forms and handle the `_`-joined, `%5f`-escaped encoding used by
//! cloud credentials.

use std::borrow::Cow;

/// Separator between fields of an escaped composite payload.
pub const FIELD_SEPARATOR: char = '_';

/// Escaped form of a literal [`FIELD_SEPARATOR`] inside a field.
pub const ESCAPED_FIELD_SEPARATOR: &str = "%5f";

/// Replaces the last `/` with `-`.
///
/// Used by kinds whose id ends in `/<number>` and whose leading part may
/// itself contain hyphens (units, storage instances).
pub fn last_slash_to_hyphen(id: &str) -> Cow<'_, str> {
    match id.rfind('/') {
        Some(i) if i > 0 => Cow::Owned(format!("{}-{}", &id[..i], &id[i + 1..])),
        _ => Cow::Borrowed(id),
    }
}

/// Replaces the last `-` with `/`, inverting [`last_slash_to_hyphen`].
pub fn last_hyphen_to_slash(suffix: &str) -> Cow<'_, str> {
    match suffix.rfind('-') {
        Some(i) if i > 0 => Cow::Owned(format!("{}/{}", &suffix[..i], &suffix[i + 1..])),
        _ => Cow::Borrowed(suffix),
    }
}

/// Replaces every `/` with `-`.
///
/// Only safe for grammars that cannot contain `-` themselves (machine ids,
/// machine-scoped volumes and filesystems).
pub fn slashes_to_hyphens(id: &str) -> Cow<'_, str> {
    if id.contains('/') {
        Cow::Owned(id.replace('/', "-"))
    } else {
        Cow::Borrowed(id)
    }
}

/// Replaces every `-` with `/`, inverting [`slashes_to_hyphens`].
pub fn hyphens_to_slashes(suffix: &str) -> Cow<'_, str> {
    if suffix.contains('-') {
        Cow::Owned(suffix.replace('-', "/"))
    } else {
        Cow::Borrowed(suffix)
    }
}

/// Escapes literal field separators so the field can be joined with others.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(FIELD_SEPARATOR) {
        Cow::Owned(field.replace(FIELD_SEPARATOR, ESCAPED_FIELD_SEPARATOR))
    } else {
        Cow::Borrowed(field)
    }
}

/// Inverts [`escape_field`].
pub fn unescape_field(field: &str) -> Cow<'_, str> {
    if field.contains(ESCAPED_FIELD_SEPARATOR) {
        Cow::Owned(field.replace(ESCAPED_FIELD_SEPARATOR, "_"))
    } else {
        Cow::Borrowed(field)
    }
}

/// Escapes each field and joins them with [`FIELD_SEPARATOR`].
pub fn join_escaped<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(&escape_field(field));
    }
    out
}

/// Splits `payload` on unescaped field separators and unescapes each field.
///
/// Splitting happens first: escaped separators contain no `_`, so they
/// survive the split and are only restored afterwards. Returns `None` unless
/// exactly `N` fields are present.
pub fn split_escaped<const N: usize>(payload: &str) -> Option<[String; N]> {
    let mut fields = payload.split(FIELD_SEPARATOR);
    let mut out: [String; N] = std::array::from_fn(|_| String::new());
    for slot in out.iter_mut() {
        *slot = unescape_field(fields.next()?).into_owned();
    }
    if fields.next().is_some() {
        return None;
    }
    Some(out)
}

/// Splits `id` around the single occurrence of `marker`.
///
/// Returns `None` if the marker is absent or occurs more than once.
pub fn split_marker<'a>(id: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let (prefix, suffix) = id.split_once(marker)?;
    if suffix.contains(marker) {
        return None;
    }
    Some((prefix, suffix))
}
