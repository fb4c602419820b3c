pub(crate) fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_lowercase()
    } else {
        value.to_lowercase()
    }
}

pub(crate) fn normalize_upper(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_uppercase()
    } else {
        value.to_uppercase()
    }
}

pub(crate) fn equals_ignore_case(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        normalize_lower(a) == normalize_lower(b)
    }
}

/// Splits a comma separated header or setting value into trimmed entries.
///
/// Empty segments are kept so that `"a,,b"` yields three entries, matching the
/// way configured lists are compared against request lists.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|part| part.trim().to_string()).collect()
}

pub(crate) fn join_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|value| value.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
