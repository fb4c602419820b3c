use crate::constants::{header, key, method};
use crate::headers::HeaderSet;
use crate::origin_resolver::{CompiledOrigins, resolve_compiled_origin};
use crate::preflight::negotiate_preflight;
use crate::request::CorsRequest;
use crate::resolve::{resolve_bool, resolve_item};
use crate::response::CorsResponse;
use crate::result::{CorsDecision, CorsError, SimpleResult};
use crate::setting::Setting;
use crate::settings::Settings;
use crate::util::equals_ignore_case;
use crate::validate::{SettingsInvalid, validate};
use arc_swap::{ArcSwap, Guard};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Core CORS policy engine that evaluates requests against [`Settings`].
///
/// Settings are validated before they are installed and swapped atomically,
/// so an engine can be shared across threads and reconfigured while serving.
pub struct Cors {
    policy: ArcSwap<InstalledPolicy>,
}

/// Validated settings together with the origin patterns compiled from them.
#[derive(Debug)]
struct InstalledPolicy {
    settings: Arc<Settings>,
    origins: CompiledOrigins,
}

impl InstalledPolicy {
    fn install(settings: Settings) -> Result<Self, SettingsInvalid> {
        validate(&settings)?;
        let origins = CompiledOrigins::compile(&settings.origin);
        debug!(precompiled = origins.is_compiled(), "cors policy installed");
        Ok(Self {
            settings: Arc::new(settings),
            origins,
        })
    }
}

impl Cors {
    pub fn new(settings: Settings) -> Result<Self, SettingsInvalid> {
        Ok(Self {
            policy: ArcSwap::from_pointee(InstalledPolicy::install(settings)?),
        })
    }

    /// Snapshot of the settings currently in effect.
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.policy.load().settings)
    }

    /// Replaces the settings once the new value validates. In-flight
    /// evaluations keep the snapshot they started with.
    pub fn set_settings(&self, settings: Settings) -> Result<(), SettingsInvalid> {
        self.policy.store(Arc::new(InstalledPolicy::install(settings)?));
        debug!("cors settings replaced");
        Ok(())
    }

    /// Merges `entries` over the current settings and installs the result.
    ///
    /// The merge is retried against the newer snapshot when another update
    /// lands first, so concurrent updates never drop each other's entries.
    pub fn update_settings<I, K>(&self, entries: I) -> Result<(), SettingsInvalid>
    where
        I: IntoIterator<Item = (K, Setting)>,
        K: Into<String>,
    {
        let entries: Vec<(String, Setting)> = entries
            .into_iter()
            .map(|(name, setting)| (name.into(), setting))
            .collect();

        let mut current = self.policy.load_full();
        loop {
            let merged = Settings::clone(&current.settings).merge(entries.iter().cloned())?;
            let next = Arc::new(InstalledPolicy::install(merged)?);
            let previous = self.policy.compare_and_swap(&current, next);
            if Arc::ptr_eq(&*previous, &current) {
                debug!(entries = entries.len(), "cors settings updated");
                return Ok(());
            }
            trace!("settings changed during update, merging again");
            current = Guard::into_inner(previous);
        }
    }

    /// Decides what a request needs without touching any response.
    pub fn check(&self, request: &dyn CorsRequest) -> Result<CorsDecision, CorsError> {
        let policy = self.policy.load_full();
        evaluate(&policy, request)
    }

    /// Runs the engine around a `next` continuation.
    ///
    /// Non-CORS requests go straight to `next`. Preflight answers are written
    /// onto `response` and `next` is never called. Other CORS requests run
    /// `next` and receive the CORS headers on the response it returns.
    pub fn invoke<Q, R, N>(&self, request: Q, mut response: R, next: N) -> Result<R, CorsError>
    where
        Q: CorsRequest,
        R: CorsResponse,
        N: FnOnce(Q, R) -> R,
    {
        match self.check(&request)? {
            CorsDecision::NotApplicable => Ok(next(request, response)),
            CorsDecision::Preflight(result) => {
                result.apply_to(&mut response);
                Ok(response)
            }
            CorsDecision::Simple(result) => {
                let mut response = next(request, response);
                result.apply_to(&mut response);
                Ok(response)
            }
        }
    }
}

impl std::fmt::Debug for Cors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cors")
            .field("settings", &self.settings())
            .finish()
    }
}

fn evaluate(
    policy: &InstalledPolicy,
    request: &dyn CorsRequest,
) -> Result<CorsDecision, CorsError> {
    if request.origin().is_empty() {
        debug!("no origin header, skipping cors");
        return Ok(CorsDecision::NotApplicable);
    }

    let settings = policy.settings.as_ref();
    let resolution = resolve_compiled_origin(request, &settings.origin, &policy.origins)?;
    if !resolution.origin.is_matched() {
        return Err(reject_origin(settings, request, &resolution.tried));
    }

    let mut headers = HeaderSet::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        resolution.origin.as_str(),
    );

    if resolve_bool(&settings.allow_credentials, key::ALLOW_CREDENTIALS, request)? {
        debug!("adding credentials header");
        headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
    }

    if equals_ignore_case(request.method(), method::OPTIONS) {
        debug!("handling preflight request");
        return negotiate_preflight(request, settings, headers, &resolution.origin)
            .map(CorsDecision::Preflight);
    }

    let exposed = resolve_item(&settings.expose_headers, key::EXPOSE_HEADERS, request, false)?;
    if !exposed.is_empty() {
        headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed);
    }

    Ok(CorsDecision::Simple(SimpleResult { headers }))
}

fn reject_origin(settings: &Settings, request: &dyn CorsRequest, tried: &[String]) -> CorsError {
    warn!(
        origin = request.origin().as_str(),
        tried = tried.len(),
        "origin not allowed"
    );
    match &settings.bad_origin_handler {
        Some(handler) => handler(request, tried),
        None => CorsError::BadOrigin {
            sent: request.origin(),
            allowed: tried.to_vec(),
        },
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
