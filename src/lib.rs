pub mod constants;
mod cors;
mod headers;
mod http_adapter;
mod middleware;
mod origin;
mod origin_resolver;
mod preflight;
mod request;
mod resolve;
mod response;
mod result;
mod setting;
mod settings;
mod util;
mod validate;

pub use cors::Cors;
pub use headers::HeaderSet;
pub use middleware::CorsMiddleware;
pub use origin::{OriginPattern, PatternError, compile_wildcard, match_origin};
pub use origin_resolver::{
    CompiledOrigins, OriginResolution, ParsedOrigin, ResolvedOrigin, resolve_compiled_origin,
    resolve_origin,
};
pub use preflight::negotiate_preflight;
pub use request::{CorsRequest, RequestContext};
pub use resolve::{resolve_bool, resolve_item, resolve_max_age};
pub use response::CorsResponse;
pub use result::{CorsDecision, CorsError, PreflightResult, SimpleResult};
pub use setting::{Setting, SettingCallbackFn, SettingKind, SettingValue};
pub use settings::{BadOriginHandlerFn, Settings};
pub use validate::{InvalidReason, SettingsInvalid, schema, validate, validate_setting};
