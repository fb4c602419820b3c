use crate::cors::Cors;
use crate::request::CorsRequest;
use crate::response::CorsResponse;
use crate::result::{CorsDecision, CorsError};
use crate::setting::Setting;
use crate::settings::Settings;
use crate::validate::SettingsInvalid;
use std::sync::Arc;
use tracing::debug;

/// Handler-style adapter around [`Cors`].
///
/// Preflight answers are built from `response_factory`, an empty-response
/// constructor, so the downstream handler only ever sees requests that are
/// either not CORS requests or were accepted as simple requests.
pub struct CorsMiddleware<F> {
    cors: Cors,
    response_factory: F,
}

impl<F> CorsMiddleware<F> {
    pub fn new(response_factory: F, settings: Settings) -> Result<Self, SettingsInvalid> {
        Ok(Self {
            cors: Cors::new(settings)?,
            response_factory,
        })
    }

    pub fn cors(&self) -> &Cors {
        &self.cors
    }

    pub fn settings(&self) -> Arc<Settings> {
        self.cors.settings()
    }

    pub fn set_settings(&self, settings: Settings) -> Result<(), SettingsInvalid> {
        self.cors.set_settings(settings)
    }

    /// Merges `entries` over the settings in effect, see [`Cors::update_settings`].
    pub fn update_settings<I, K>(&self, entries: I) -> Result<(), SettingsInvalid>
    where
        I: IntoIterator<Item = (K, Setting)>,
        K: Into<String>,
    {
        self.cors.update_settings(entries)
    }

    pub fn process<Q, R, H>(&self, request: Q, handler: H) -> Result<R, CorsError>
    where
        F: Fn() -> R,
        Q: CorsRequest,
        R: CorsResponse,
        H: FnOnce(Q) -> R,
    {
        match self.cors.check(&request)? {
            CorsDecision::NotApplicable => Ok(handler(request)),
            CorsDecision::Preflight(result) => {
                debug!("answering preflight from response factory");
                let mut response = (self.response_factory)();
                result.apply_to(&mut response);
                Ok(response)
            }
            CorsDecision::Simple(result) => {
                let mut response = handler(request);
                result.apply_to(&mut response);
                Ok(response)
            }
        }
    }
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
