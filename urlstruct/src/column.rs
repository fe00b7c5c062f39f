//! Column naming helpers shared by field table construction and lookup.

/// Separates a column from its operator suffix, e.g. `author_id__gte`.
pub const OPERATOR_DELIMITER: &str = "__";

/// Name of the marker field that carries the record's table name.
pub const TABLE_NAME_FIELD: &str = "table_name";

const LEGACY_PREFIX: &str = ":";
const LEGACY_MULTI_SUFFIX: &str = "[]";

/// Splits `key` on the first `delimiter` into `(column, operator)`.
///
/// The operator is empty when the delimiter does not occur.
pub fn split_column_operator<'a>(key: &'a str, delimiter: &str) -> (&'a str, &'a str) {
    match key.split_once(delimiter) {
        Some((column, op)) => (column, op),
        None => (key, ""),
    }
}

/// Strips the legacy `:` prefix and `[]` multi-value suffix from a lookup key.
pub fn normalize_key(key: &str) -> &str {
    let key = key.strip_prefix(LEGACY_PREFIX).unwrap_or(key);
    key.strip_suffix(LEGACY_MULTI_SUFFIX).unwrap_or(key)
}

/// Converts a declared field name into its column name.
///
/// Upper-case ASCII letters are lower-cased; an underscore is inserted before
/// one that follows a lower-case letter or starts a new word (`AuthorID` is
/// `author_id`, `HTTPServer` is `http_server`). Snake-case names pass through.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 5);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let starts_word = i > 0
                && i + 1 < chars.len()
                && (chars[i - 1].is_ascii_lowercase() || chars[i + 1].is_ascii_lowercase());
            if starts_word {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Removes one pair of surrounding single quotes, as in `'books'`.
pub fn unquote(name: &str) -> &str {
    name.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(name)
}
