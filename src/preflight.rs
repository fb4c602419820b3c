use crate::constants::{NO_CONTENT, header, key};
use crate::headers::HeaderSet;
use crate::origin_resolver::ResolvedOrigin;
use crate::request::CorsRequest;
use crate::resolve::{resolve_item, resolve_max_age};
use crate::result::{CorsError, PreflightResult};
use crate::settings::Settings;
use crate::util::{normalize_lower, normalize_upper, split_list};
use tracing::{debug, warn};

/// Negotiates an `OPTIONS` request whose origin already matched.
///
/// `headers` holds what the engine accumulated so far (origin and
/// credentials). The method check runs first, then the header check; either
/// one ends negotiation with a rejection. On success the max-age header is
/// added and the result carries `Vary: Origin` unless the origin is `*`.
pub fn negotiate_preflight(
    request: &dyn CorsRequest,
    settings: &Settings,
    mut headers: HeaderSet,
    origin: &ResolvedOrigin,
) -> Result<PreflightResult, CorsError> {
    check_method(request, settings, &mut headers)?;
    check_headers(request, settings, &mut headers)?;

    let max_age = resolve_max_age(&settings.max_age, key::MAX_AGE, request)?;
    if max_age > 0 {
        debug!(max_age, "adding max age to preflight response");
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, max_age.to_string());
    }

    let vary_origin = !origin.is_any();
    debug!(vary_origin, "preflight accepted");

    Ok(PreflightResult {
        headers,
        vary_origin,
        status: NO_CONTENT,
    })
}

pub(crate) fn check_method(
    request: &dyn CorsRequest,
    settings: &Settings,
    headers: &mut HeaderSet,
) -> Result<(), CorsError> {
    let configured = resolve_item(&settings.allow_methods, key::ALLOW_METHODS, request, false)?;
    if configured.is_empty() {
        warn!("preflight rejected, no methods are configured");
        return Err(CorsError::NoMethodsConfigured);
    }

    let requested = request.access_control_request_method();
    if requested.is_empty() {
        warn!("preflight rejected, no request method provided");
        return Err(CorsError::NoMethodProvided);
    }

    let requested = normalize_upper(&requested);
    let allowed = split_list(&normalize_upper(&configured));
    if !allowed.contains(&requested) {
        warn!(
            method = requested.as_str(),
            allowed = configured.as_str(),
            "preflight rejected, method not allowed"
        );
        return Err(CorsError::MethodNotAllowed {
            sent: requested,
            allowed,
        });
    }

    debug!(method = requested.as_str(), "preflight method allowed");
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, configured);
    Ok(())
}

pub(crate) fn check_headers(
    request: &dyn CorsRequest,
    settings: &Settings,
    headers: &mut HeaderSet,
) -> Result<(), CorsError> {
    let configured = resolve_item(&settings.allow_headers, key::ALLOW_HEADERS, request, false)?;
    let requested = request.access_control_request_headers();

    if requested.is_empty() {
        debug!("no headers requested by preflight");
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, configured);
        return Ok(());
    }

    if configured.is_empty() {
        warn!(
            headers = requested.as_str(),
            "preflight rejected, no headers are allowed"
        );
        return Err(CorsError::NoHeadersAllowed { sent: requested });
    }

    let allowed = split_list(&normalize_lower(&configured));
    let missing = split_list(&normalize_lower(&requested))
        .into_iter()
        .find(|name| !allowed.contains(name));

    if let Some(missing) = missing {
        warn!(
            header = missing.as_str(),
            allowed = configured.as_str(),
            "preflight rejected, header not allowed"
        );
        return Err(CorsError::HeaderNotAllowed {
            sent: requested,
            allowed,
        });
    }

    debug!(headers = requested.as_str(), "preflight headers allowed");
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, configured);
    Ok(())
}

#[cfg(test)]
#[path = "preflight_test.rs"]
mod preflight_test;
