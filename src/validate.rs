use crate::constants::key;
use crate::setting::{Setting, SettingKind, SettingValue};
use crate::settings::Settings;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

const LIST_KINDS: &[SettingKind] = &[
    SettingKind::String,
    SettingKind::Array,
    SettingKind::Callable,
];
const INT_KINDS: &[SettingKind] = &[SettingKind::Int, SettingKind::Callable];
const BOOL_KINDS: &[SettingKind] = &[SettingKind::Bool, SettingKind::Callable];

/// Why a settings entry was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    WrongType,
    EmptyArray,
    NonStringItem { index: usize, kind: SettingKind },
    NegativeInt(i64),
    /// A setting callback was given where a rejection handler is expected.
    HandlerSignature,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::WrongType => f.write_str("unexpected type"),
            InvalidReason::EmptyArray => f.write_str("array is empty"),
            InvalidReason::NonStringItem { index, kind } => {
                write!(f, "array item {} is {}, expected string", index, kind)
            }
            InvalidReason::NegativeInt(value) => write!(f, "int value {} is too low", value),
            InvalidReason::HandlerSignature => f.write_str(
                "setting callbacks cannot act as the bad origin handler, install one with Settings::bad_origin_handler",
            ),
        }
    }
}

/// Configuration-time rejection of a settings map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "unable to validate settings for {key}: {reason} (got {actual}; allowed types: {})",
    join_kinds(.allowed)
)]
pub struct SettingsInvalid {
    pub key: String,
    pub actual: SettingKind,
    pub allowed: Vec<SettingKind>,
    pub reason: InvalidReason,
}

impl SettingsInvalid {
    pub(crate) fn new(
        key: &str,
        actual: SettingKind,
        allowed: &[SettingKind],
        reason: InvalidReason,
    ) -> Self {
        Self {
            key: key.to_string(),
            actual,
            allowed: allowed.to_vec(),
            reason,
        }
    }
}

fn join_kinds(kinds: &[SettingKind]) -> String {
    kinds
        .iter()
        .map(SettingKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Allowed kinds for each recognized key, in validation order.
pub fn schema() -> [(&'static str, &'static [SettingKind]); 6] {
    [
        (key::ORIGIN, LIST_KINDS),
        (key::EXPOSE_HEADERS, LIST_KINDS),
        (key::ALLOW_METHODS, LIST_KINDS),
        (key::ALLOW_HEADERS, LIST_KINDS),
        (key::MAX_AGE, INT_KINDS),
        (key::ALLOW_CREDENTIALS, BOOL_KINDS),
    ]
}

/// Validates every recognized key of `settings`, reporting the first failure.
///
/// Callbacks always pass here; the values they produce are checked when
/// resolved against a request.
pub fn validate(settings: &Settings) -> Result<(), SettingsInvalid> {
    for (name, allowed) in schema() {
        if let Some(setting) = settings.get(name) {
            validate_setting(name, setting, allowed)?;
        }
    }
    debug!("CORS settings validated");
    Ok(())
}

/// Checks one entry against its allowed type set.
pub fn validate_setting(
    name: &str,
    setting: &Setting,
    allowed: &[SettingKind],
) -> Result<(), SettingsInvalid> {
    let kind = setting.kind();
    let result = if !allowed.contains(&kind) {
        Err(InvalidReason::WrongType)
    } else {
        match setting {
            Setting::Dynamic(_) => Ok(()),
            Setting::Literal(value) => validate_literal(value),
        }
    };

    result.map_err(|reason| {
        warn!(setting = name, actual = %kind, %reason, "rejecting CORS settings");
        SettingsInvalid::new(name, kind, allowed, reason)
    })
}

fn validate_literal(value: &SettingValue) -> Result<(), InvalidReason> {
    match value {
        SettingValue::List(items) => {
            if items.is_empty() {
                return Err(InvalidReason::EmptyArray);
            }
            match items
                .iter()
                .enumerate()
                .find(|(_, item)| !matches!(item, SettingValue::Str(_)))
            {
                Some((index, item)) => Err(InvalidReason::NonStringItem {
                    index,
                    kind: item.kind(),
                }),
                None => Ok(()),
            }
        }
        SettingValue::Int(value) if *value < 0 => Err(InvalidReason::NegativeInt(*value)),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
