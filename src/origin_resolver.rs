use crate::constants::{WILDCARD, key};
use crate::origin::OriginPattern;
use crate::request::CorsRequest;
use crate::resolve::string_items;
use crate::result::CorsError;
use crate::setting::{Setting, SettingValue};
use crate::util::normalize_lower;
use std::borrow::Cow;
use tracing::{debug, trace};
use url::Url;

/// Outcome of matching a request origin against the origin policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolvedOrigin {
    /// No origin header, or nothing in the policy matched it.
    #[default]
    Unmatched,
    /// The policy accepts any origin.
    Any,
    /// A matched origin, qualified with scheme and port when the request
    /// origin carried them.
    Origin(String),
}

impl ResolvedOrigin {
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedOrigin::Unmatched => "",
            ResolvedOrigin::Any => WILDCARD,
            ResolvedOrigin::Origin(value) => value,
        }
    }

    pub fn is_matched(&self) -> bool {
        !matches!(self, ResolvedOrigin::Unmatched)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, ResolvedOrigin::Any)
    }

    fn from_match(matched: String) -> Self {
        match matched.as_str() {
            "" => ResolvedOrigin::Unmatched,
            WILDCARD => ResolvedOrigin::Any,
            _ => ResolvedOrigin::Origin(matched),
        }
    }
}

/// The resolved origin together with every pattern that was tried.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OriginResolution {
    pub origin: ResolvedOrigin,
    pub tried: Vec<String>,
}

/// Scheme, host and port of a request origin.
///
/// `port` is only set when the origin names a port other than its scheme's
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedOrigin {
    pub scheme: Option<String>,
    pub host: String,
    pub port: Option<u16>,
}

impl ParsedOrigin {
    /// Parses an origin header value. Values without a scheme are read as
    /// `host` or `host:port`.
    pub fn parse(origin: &str) -> Self {
        let origin = normalize_lower(origin);
        match Url::parse(&origin) {
            Ok(url) => match url.host_str() {
                Some(host) => {
                    debug!(scheme = url.scheme(), host, port = url.port(), "parsed origin");
                    Self {
                        scheme: Some(url.scheme().to_string()),
                        host: host.to_string(),
                        port: url.port(),
                    }
                }
                None => Self::bare(origin),
            },
            Err(_) => Self::bare(origin),
        }
    }

    fn bare(origin: String) -> Self {
        trace!(origin = origin.as_str(), "unable to parse scheme from origin");
        match split_port(&origin) {
            Some((host, port)) => Self {
                scheme: None,
                host: host.to_string(),
                port: Some(port),
            },
            None => Self {
                scheme: None,
                host: origin,
                port: None,
            },
        }
    }

    /// Rebuilds the origin around a matched host: `scheme://host[:port]`
    /// when a scheme was sent, `host[:port]` otherwise.
    pub fn qualify(&self, matched: &str) -> String {
        let host = match self.port {
            Some(port) => format!("{matched}:{port}"),
            None => matched.to_string(),
        };

        match self.scheme.as_deref() {
            Some(scheme) => format!("{scheme}://{host}"),
            None => host,
        }
    }
}

fn split_port(origin: &str) -> Option<(&str, u16)> {
    let (host, port) = origin.rsplit_once(':')?;
    if host.is_empty() || (host.contains(':') && !host.starts_with('[')) {
        return None;
    }
    if port.is_empty() || !port.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    port.parse().ok().map(|port| (host, port))
}

/// Origin patterns compiled from a literal origin setting.
///
/// Callback policies cannot be compiled ahead of time; their patterns are
/// compiled per request.
#[derive(Debug, Clone, Default)]
pub struct CompiledOrigins {
    patterns: Option<Vec<OriginPattern>>,
}

impl CompiledOrigins {
    pub fn compile(setting: &Setting) -> Self {
        let patterns = match setting {
            Setting::Literal(SettingValue::Null | SettingValue::Bool(false)) => Some(Vec::new()),
            Setting::Literal(SettingValue::Str(pattern)) => Some(vec![OriginPattern::new(pattern)]),
            Setting::Literal(SettingValue::List(items)) => items
                .iter()
                .map(|item| match item {
                    SettingValue::Str(pattern) => Some(OriginPattern::new(pattern)),
                    _ => None,
                })
                .collect(),
            _ => None,
        };
        Self { patterns }
    }

    pub fn is_compiled(&self) -> bool {
        self.patterns.is_some()
    }

    pub fn patterns(&self) -> Option<&[OriginPattern]> {
        self.patterns.as_deref()
    }
}

fn request_patterns(
    setting: &Setting,
    request: &dyn CorsRequest,
) -> Result<Vec<OriginPattern>, CorsError> {
    if matches!(setting, Setting::Dynamic(_)) {
        debug!("origin policy is being passed to callback");
    }

    match setting.value_for(request) {
        SettingValue::Null | SettingValue::Bool(false) => Ok(Vec::new()),
        SettingValue::Str(pattern) => Ok(vec![OriginPattern::new(&pattern)]),
        SettingValue::List(items) => Ok(string_items(key::ORIGIN, items)?
            .iter()
            .map(|pattern| OriginPattern::new(pattern))
            .collect()),
        other => Err(CorsError::InvalidSettingType {
            key: key::ORIGIN.to_string(),
            expected: "string or array",
            actual: other.kind(),
        }),
    }
}

/// Matches the request's `Origin` header against the origin policy.
///
/// A missing or empty header short-circuits without evaluating the policy.
/// Patterns are tried in order and stop at the first match; every pattern
/// tried is recorded for diagnostics.
pub fn resolve_origin(
    request: &dyn CorsRequest,
    policy: &Setting,
) -> Result<OriginResolution, CorsError> {
    resolve_compiled_origin(request, policy, &CompiledOrigins::compile(policy))
}

/// Same as [`resolve_origin`], using `compiled` instead of compiling the
/// policy's patterns again when it was compiled from a literal setting.
pub fn resolve_compiled_origin(
    request: &dyn CorsRequest,
    policy: &Setting,
    compiled: &CompiledOrigins,
) -> Result<OriginResolution, CorsError> {
    let origin = request.origin();
    if origin.is_empty() {
        debug!("origin is empty");
        return Ok(OriginResolution::default());
    }

    debug!(origin = origin.as_str(), "processing origin");
    let parsed = ParsedOrigin::parse(&origin);

    let patterns: Cow<'_, [OriginPattern]> = match compiled.patterns() {
        Some(patterns) => Cow::Borrowed(patterns),
        None => Cow::Owned(request_patterns(policy, request)?),
    };
    debug!(count = patterns.len(), "matching origin against policy");

    let mut tried = Vec::with_capacity(patterns.len());
    let mut matched = String::new();
    for pattern in patterns.iter() {
        matched = pattern.matches(&parsed.host);
        tried.push(pattern.as_str().to_string());
        if !matched.is_empty() {
            break;
        }
    }

    let origin = match ResolvedOrigin::from_match(matched) {
        ResolvedOrigin::Origin(host) => ResolvedOrigin::Origin(parsed.qualify(&host)),
        other => other,
    };
    debug!(
        matched = origin.as_str(),
        tried = tried.len(),
        "origin resolution finished"
    );

    Ok(OriginResolution { origin, tried })
}

#[cfg(test)]
#[path = "origin_resolver_test.rs"]
mod origin_resolver_test;
