use crate::request::CorsRequest;
use crate::result::CorsError;
use crate::setting::{Setting, SettingValue};
use crate::util::{join_list, split_list};
use tracing::trace;

/// Resolves a string/list setting into its header-ready form.
///
/// Strings are split on commas and trimmed. With `single` set the result must
/// hold exactly one entry (or be an int); otherwise entries are joined with
/// `", "`. `false` and `null` mean "nothing configured" and yield `""`.
pub fn resolve_item(
    setting: &Setting,
    key: &str,
    request: &dyn CorsRequest,
    single: bool,
) -> Result<String, CorsError> {
    let value = setting.value_for(request);
    trace!(setting = key, kind = %value.kind(), single, "resolving setting");

    let entries = match value {
        SettingValue::Null | SettingValue::Bool(false) => return Ok(String::new()),
        SettingValue::Bool(true) => {
            return Err(CorsError::InvalidSettingValue {
                key: key.to_string(),
            });
        }
        SettingValue::Int(value) => return Ok(value.to_string()),
        SettingValue::Str(value) => split_list(&value),
        SettingValue::List(items) => string_items(key, items)?,
        other => {
            return Err(CorsError::InvalidSettingType {
                key: key.to_string(),
                expected: "string or array",
                actual: other.kind(),
            });
        }
    };

    if single {
        let mut entries = entries;
        if entries.len() == 1 {
            return Ok(entries.remove(0));
        }
        return Err(CorsError::ExpectedSingleValue {
            key: key.to_string(),
        });
    }

    Ok(join_list(&entries))
}

pub(crate) fn string_items(key: &str, items: Vec<SettingValue>) -> Result<Vec<String>, CorsError> {
    items
        .into_iter()
        .map(|item| match item {
            SettingValue::Str(value) => Ok(value),
            other => Err(CorsError::InvalidSettingType {
                key: key.to_string(),
                expected: "string",
                actual: other.kind(),
            }),
        })
        .collect()
}

/// Resolves a setting that must be exactly a bool once any callback has run.
pub fn resolve_bool(
    setting: &Setting,
    key: &str,
    request: &dyn CorsRequest,
) -> Result<bool, CorsError> {
    match setting.value_for(request) {
        SettingValue::Bool(value) => Ok(value),
        other => Err(CorsError::InvalidSettingType {
            key: key.to_string(),
            expected: "bool",
            actual: other.kind(),
        }),
    }
}

/// Resolves the preflight cache duration in seconds.
pub fn resolve_max_age(
    setting: &Setting,
    key: &str,
    request: &dyn CorsRequest,
) -> Result<u64, CorsError> {
    match setting.value_for(request) {
        SettingValue::Int(value) if value < 0 => Err(CorsError::NegativeMaxAge { value }),
        SettingValue::Int(value) => Ok(value.unsigned_abs()),
        other => Err(CorsError::InvalidSettingType {
            key: key.to_string(),
            expected: "int",
            actual: other.kind(),
        }),
    }
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;
