use crate::constants::{NO_CONTENT, NO_CONTENT_REASON, header};
use crate::headers::HeaderSet;
use crate::response::CorsResponse;
use crate::setting::SettingKind;
use thiserror::Error;

/// Headers to add to the downstream response of a non-preflight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleResult {
    pub headers: HeaderSet,
}

impl SimpleResult {
    pub fn apply_to<R: CorsResponse + ?Sized>(&self, response: &mut R) {
        self.headers.apply_to(response);
    }
}

/// A terminal no-content answer to an accepted preflight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    pub headers: HeaderSet,
    pub vary_origin: bool,
    pub status: u16,
}

impl PreflightResult {
    pub fn apply_to<R: CorsResponse + ?Sized>(&self, response: &mut R) {
        self.headers.apply_to(response);
        if self.vary_origin {
            response.add_header(header::VARY, header::ORIGIN);
        }
        response.set_status(self.status, NO_CONTENT_REASON);
        response.remove_header(header::CONTENT_TYPE);
        response.remove_header(header::CONTENT_LENGTH);
    }
}

impl Default for PreflightResult {
    fn default() -> Self {
        Self {
            headers: HeaderSet::new(),
            vary_origin: false,
            status: NO_CONTENT,
        }
    }
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// The request carried no `Origin` header.
    NotApplicable,
    Simple(SimpleResult),
    Preflight(PreflightResult),
}

/// Rejections produced while evaluating a request.
///
/// None of them are retried; the HTTP layer decides how each one is rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorsError {
    #[error("Bad Origin")]
    BadOrigin { sent: String, allowed: Vec<String> },
    #[error("No methods configured to be allowed for request")]
    NoMethodsConfigured,
    #[error("No method provided")]
    NoMethodProvided,
    #[error("Method not allowed")]
    MethodNotAllowed { sent: String, allowed: Vec<String> },
    #[error("No headers are allowed")]
    NoHeadersAllowed { sent: String },
    #[error("Header not allowed")]
    HeaderNotAllowed { sent: String, allowed: Vec<String> },
    #[error("Cannot have true as a setting for {key}")]
    InvalidSettingValue { key: String },
    #[error("{key} should be {expected}, got {actual}")]
    InvalidSettingType {
        key: String,
        expected: &'static str,
        actual: SettingKind,
    },
    #[error("Only expected a single string, int or bool for {key}")]
    ExpectedSingleValue { key: String },
    #[error("maxAge should be 0 or more, got {value}")]
    NegativeMaxAge { value: i64 },
}

impl CorsError {
    /// The value the client sent that caused the rejection, if any.
    pub fn sent(&self) -> &str {
        match self {
            CorsError::BadOrigin { sent, .. }
            | CorsError::MethodNotAllowed { sent, .. }
            | CorsError::NoHeadersAllowed { sent }
            | CorsError::HeaderNotAllowed { sent, .. } => sent,
            _ => "",
        }
    }

    /// The values that would have been accepted, if known.
    pub fn allowed(&self) -> &[String] {
        match self {
            CorsError::BadOrigin { allowed, .. }
            | CorsError::MethodNotAllowed { allowed, .. }
            | CorsError::HeaderNotAllowed { allowed, .. } => allowed,
            _ => &[],
        }
    }

    /// True when the rejection stems from the policy configuration rather
    /// than from what the client sent.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CorsError::NoMethodsConfigured
                | CorsError::InvalidSettingValue { .. }
                | CorsError::InvalidSettingType { .. }
                | CorsError::ExpectedSingleValue { .. }
                | CorsError::NegativeMaxAge { .. }
        )
    }

    /// Suggested HTTP status for rendering this rejection.
    pub fn status_code(&self) -> u16 {
        if self.is_configuration_error() {
            500
        } else {
            403
        }
    }
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
