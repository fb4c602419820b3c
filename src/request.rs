use crate::constants::header;

/// Read-only view of an inbound request as seen by the policy engine.
///
/// Implementations must treat header names case-insensitively and return an
/// empty string for absent headers.
pub trait CorsRequest {
    fn method(&self) -> &str;

    /// All values of `name` joined with `", "`, or `""` when absent.
    fn header_line(&self, name: &str) -> String;

    fn origin(&self) -> String {
        self.header_line(header::ORIGIN)
    }

    fn access_control_request_method(&self) -> String {
        self.header_line(header::ACCESS_CONTROL_REQUEST_METHOD)
    }

    fn access_control_request_headers(&self) -> String {
        self.header_line(header::ACCESS_CONTROL_REQUEST_HEADERS)
    }
}

/// Framework-free request carrying a method and a list of header lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    method: String,
    headers: Vec<(String, String)>,
}

impl RequestContext {
    pub fn new<S: Into<String>>(method: S) -> Self {
        Self {
            method: method.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl CorsRequest for RequestContext {
    fn method(&self) -> &str {
        &self.method
    }

    fn header_line(&self, name: &str) -> String {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;
