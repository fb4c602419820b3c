use crate::constants::{key, method};
use crate::request::CorsRequest;
use crate::result::CorsError;
use crate::setting::{Setting, SettingKind, SettingValue};
use crate::validate::{InvalidReason, SettingsInvalid};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Invoked with the request and every origin pattern tried when the origin
/// does not match; the returned error becomes the rejection.
pub type BadOriginHandlerFn = dyn Fn(&dyn CorsRequest, &[String]) -> CorsError + Send + Sync;

/// Policy configuration for the CORS engine.
///
/// Every recognized key is always present; [`Settings::default`] supplies the
/// values used for keys a caller does not override. Unknown keys supplied
/// through [`Settings::merge`] are kept untouched in a side table.
#[derive(Clone)]
pub struct Settings {
    pub origin: Setting,
    pub expose_headers: Setting,
    pub allow_methods: Setting,
    pub allow_headers: Setting,
    pub max_age: Setting,
    pub allow_credentials: Setting,
    pub bad_origin_handler: Option<Arc<BadOriginHandlerFn>>,
    pub extra: IndexMap<String, Setting>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: Setting::literal("*"),
            expose_headers: Setting::literal(""),
            allow_methods: Setting::literal(
                [
                    method::GET,
                    method::HEAD,
                    method::PUT,
                    method::POST,
                    method::DELETE,
                ]
                .join(","),
            ),
            allow_headers: Setting::literal(""),
            max_age: Setting::literal(0_i64),
            allow_credentials: Setting::literal(false),
            bad_origin_handler: None,
            extra: IndexMap::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, value: impl Into<Setting>) -> Self {
        self.origin = value.into();
        self
    }

    pub fn expose_headers(mut self, value: impl Into<Setting>) -> Self {
        self.expose_headers = value.into();
        self
    }

    pub fn allow_methods(mut self, value: impl Into<Setting>) -> Self {
        self.allow_methods = value.into();
        self
    }

    pub fn allow_headers(mut self, value: impl Into<Setting>) -> Self {
        self.allow_headers = value.into();
        self
    }

    pub fn max_age(mut self, value: impl Into<Setting>) -> Self {
        self.max_age = value.into();
        self
    }

    pub fn allow_credentials(mut self, value: impl Into<Setting>) -> Self {
        self.allow_credentials = value.into();
        self
    }

    pub fn bad_origin_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn CorsRequest, &[String]) -> CorsError + Send + Sync + 'static,
    {
        self.bad_origin_handler = Some(Arc::new(handler));
        self
    }

    /// Looks up a setting by its configuration name, including passthrough keys.
    pub fn get(&self, name: &str) -> Option<&Setting> {
        match name {
            key::ORIGIN => Some(&self.origin),
            key::EXPOSE_HEADERS => Some(&self.expose_headers),
            key::ALLOW_METHODS => Some(&self.allow_methods),
            key::ALLOW_HEADERS => Some(&self.allow_headers),
            key::MAX_AGE => Some(&self.max_age),
            key::ALLOW_CREDENTIALS => Some(&self.allow_credentials),
            other => self.extra.get(other),
        }
    }

    /// Overlays `entries` onto these settings: supplied keys replace the
    /// current value, omitted keys keep theirs.
    ///
    /// The result is not validated; the engine validates it as a whole when
    /// it is installed.
    pub fn merge<I, K>(mut self, entries: I) -> Result<Self, SettingsInvalid>
    where
        I: IntoIterator<Item = (K, Setting)>,
        K: Into<String>,
    {
        for (name, setting) in entries {
            let name = name.into();
            match name.as_str() {
                key::ORIGIN => self.origin = setting,
                key::EXPOSE_HEADERS => self.expose_headers = setting,
                key::ALLOW_METHODS => self.allow_methods = setting,
                key::ALLOW_HEADERS => self.allow_headers = setting,
                key::MAX_AGE => self.max_age = setting,
                key::ALLOW_CREDENTIALS => self.allow_credentials = setting,
                key::BAD_ORIGIN_HANDLER => {
                    let reason = match setting {
                        Setting::Dynamic(_) => InvalidReason::HandlerSignature,
                        Setting::Literal(_) => InvalidReason::WrongType,
                    };
                    return Err(SettingsInvalid::new(
                        key::BAD_ORIGIN_HANDLER,
                        setting.kind(),
                        &[SettingKind::Callable],
                        reason,
                    ));
                }
                _ => {
                    self.extra.insert(name, setting);
                }
            }
        }
        Ok(self)
    }

    /// Builds settings from a JSON object merged over the defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self, SettingsInvalid> {
        match SettingValue::from(value) {
            SettingValue::Map(entries) => Self::from_map(entries),
            other => Err(SettingsInvalid::new(
                "settings",
                other.kind(),
                &[SettingKind::Object],
                InvalidReason::WrongType,
            )),
        }
    }

    pub fn from_map(entries: IndexMap<String, SettingValue>) -> Result<Self, SettingsInvalid> {
        Self::default().merge(
            entries
                .into_iter()
                .map(|(name, value)| (name, Setting::Literal(value))),
        )
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("origin", &self.origin)
            .field("expose_headers", &self.expose_headers)
            .field("allow_methods", &self.allow_methods)
            .field("allow_headers", &self.allow_headers)
            .field("max_age", &self.max_age)
            .field("allow_credentials", &self.allow_credentials)
            .field(
                "bad_origin_handler",
                &self.bad_origin_handler.as_ref().map(|_| ".."),
            )
            .field("extra", &self.extra)
            .finish()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
