use http::Response;
use middleware_cors::HeaderSet;

pub fn header_value<'a>(headers: &'a HeaderSet, name: &str) -> Option<&'a str> {
    headers.get(name)
}

pub fn has_header(headers: &HeaderSet, name: &str) -> bool {
    headers.contains(name)
}

pub fn has_cors_header(headers: &HeaderSet) -> bool {
    headers
        .iter()
        .any(|(name, _)| name.to_ascii_lowercase().starts_with("access-control-"))
}

pub fn response_header<'a, B>(response: &'a Response<B>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}

pub fn render(headers: &HeaderSet) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}
