use middleware_cors::constants::{header, method};
use middleware_cors::{Cors, CorsDecision, CorsError, RequestContext, Setting, Settings};

#[derive(Default)]
pub struct CorsBuilder {
    settings: Settings,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<Setting>) -> Self {
        self.settings = self.settings.origin(origin);
        self
    }

    pub fn methods(mut self, methods: impl Into<Setting>) -> Self {
        self.settings = self.settings.allow_methods(methods);
        self
    }

    pub fn allowed_headers(mut self, headers: impl Into<Setting>) -> Self {
        self.settings = self.settings.allow_headers(headers);
        self
    }

    pub fn exposed_headers(mut self, headers: impl Into<Setting>) -> Self {
        self.settings = self.settings.expose_headers(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.settings = self.settings.allow_credentials(enabled);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.settings = self.settings.max_age(seconds);
        self
    }

    pub fn settings(self) -> Settings {
        self.settings
    }

    pub fn build(self) -> Cors {
        Cors::new(self.settings).expect("valid CORS configuration")
    }
}

pub struct SimpleRequestBuilder {
    method: String,
    origin: Option<String>,
    headers: Vec<(String, String)>,
}

impl SimpleRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
            headers: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> RequestContext {
        let mut request = RequestContext::new(self.method);
        if let Some(origin) = self.origin {
            request = request.with_header(header::ORIGIN, origin);
        }
        for (name, value) in self.headers {
            request = request.with_header(name, value);
        }
        request
    }

    pub fn evaluate(self, cors: &Cors) -> Result<CorsDecision, CorsError> {
        cors.check(&self.build())
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        self.evaluate(cors)
            .expect("simple request evaluation should succeed")
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn build(self) -> RequestContext {
        let mut request = RequestContext::new(method::OPTIONS);
        if let Some(origin) = self.origin {
            request = request.with_header(header::ORIGIN, origin);
        }
        if let Some(method) = self.request_method {
            request = request.with_header(header::ACCESS_CONTROL_REQUEST_METHOD, method);
        }
        if let Some(headers) = self.request_headers {
            request = request.with_header(header::ACCESS_CONTROL_REQUEST_HEADERS, headers);
        }
        request
    }

    pub fn evaluate(self, cors: &Cors) -> Result<CorsDecision, CorsError> {
        cors.check(&self.build())
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        self.evaluate(cors)
            .expect("preflight request evaluation should succeed")
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn simple_request() -> SimpleRequestBuilder {
    SimpleRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
