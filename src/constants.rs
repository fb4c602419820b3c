pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const HEAD: &str = "HEAD";
    pub const OPTIONS: &str = "OPTIONS";
    pub const PATCH: &str = "PATCH";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

/// Configuration names of the recognized settings keys.
pub mod key {
    pub const ORIGIN: &str = "origin";
    pub const EXPOSE_HEADERS: &str = "exposeHeaders";
    pub const ALLOW_METHODS: &str = "allowMethods";
    pub const ALLOW_HEADERS: &str = "allowHeaders";
    pub const MAX_AGE: &str = "maxAge";
    pub const ALLOW_CREDENTIALS: &str = "allowCredentials";
    pub const BAD_ORIGIN_HANDLER: &str = "badOriginHandler";
}

pub const WILDCARD: &str = "*";
pub const NO_CONTENT: u16 = 204;
pub const NO_CONTENT_REASON: &str = "No Content";
