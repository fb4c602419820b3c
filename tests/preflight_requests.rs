mod common;

use common::asserts::assert_preflight;
use common::builders::{cors, preflight_request};
use common::headers::{has_header, header_value};
use middleware_cors::constants::header;
use middleware_cors::{CorsError, Setting, SettingValue};

#[test]
fn full_preflight_is_answered_with_no_content() {
    let cors = cors()
        .methods(["PUT", "POST"])
        .allowed_headers("x-jeff,x-smith,x-jones")
        .max_age(300)
        .credentials(true)
        .origin("example.com")
        .build();

    let result = assert_preflight(
        preflight_request()
            .origin("example.com")
            .request_method("put")
            .request_headers("x-jeff, x-smith, x-jones")
            .check(&cors),
    );

    assert_eq!(result.status, 204);
    assert!(result.vary_origin);
    let headers = &result.headers;
    assert_eq!(
        header_value(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("example.com")
    );
    assert_eq!(
        header_value(headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some("true")
    );
    assert_eq!(
        header_value(headers, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("PUT, POST")
    );
    assert_eq!(
        header_value(headers, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("x-jeff, x-smith, x-jones")
    );
    assert_eq!(
        header_value(headers, header::ACCESS_CONTROL_MAX_AGE),
        Some("300")
    );
}

#[test]
fn wildcard_origin_preflight_does_not_vary() {
    let cors = cors().build();

    let result = assert_preflight(
        preflight_request()
            .origin("https://a.test")
            .request_method("GET")
            .check(&cors),
    );

    assert!(!result.vary_origin);
    assert!(!has_header(&result.headers, header::ACCESS_CONTROL_MAX_AGE));
    assert!(!has_header(
        &result.headers,
        header::ACCESS_CONTROL_EXPOSE_HEADERS
    ));
}

#[test]
fn no_configured_methods_always_fails_as_configuration_error() {
    let cors = cors().methods("").build();

    for (method, headers) in [("GET", ""), ("", ""), ("PUT", "x-anything")] {
        let mut request = preflight_request().origin("a.test");
        if !method.is_empty() {
            request = request.request_method(method);
        }
        if !headers.is_empty() {
            request = request.request_headers(headers);
        }

        let error = request.evaluate(&cors).expect_err("no methods configured");

        assert_eq!(error, CorsError::NoMethodsConfigured);
        assert!(error.is_configuration_error());
        assert_eq!(error.status_code(), 500);
    }
}

#[test]
fn missing_request_method_is_rejected() {
    let cors = cors().build();

    let error = preflight_request()
        .origin("a.test")
        .evaluate(&cors)
        .expect_err("no method provided");

    assert_eq!(error, CorsError::NoMethodProvided);
    assert_eq!(error.status_code(), 403);
}

#[test]
fn disallowed_method_reports_sent_and_allowed() {
    let cors = cors().methods("get, post").build();

    let error = preflight_request()
        .origin("a.test")
        .request_method("Delete")
        .evaluate(&cors)
        .expect_err("method not allowed");

    assert_eq!(error.to_string(), "Method not allowed");
    assert_eq!(error.sent(), "DELETE");
    assert_eq!(error.allowed(), ["GET".to_string(), "POST".to_string()]);
}

#[test]
fn requested_headers_without_configuration_are_rejected() {
    let cors = cors().build();

    let error = preflight_request()
        .origin("a.test")
        .request_method("GET")
        .request_headers("X-Custom")
        .evaluate(&cors)
        .expect_err("no headers allowed");

    assert_eq!(
        error,
        CorsError::NoHeadersAllowed {
            sent: "X-Custom".into()
        }
    );
}

#[test]
fn header_rejection_carries_complete_request_string() {
    let cors = cors().allowed_headers(["x-jeff", "x-smith"]).build();
    let requested = "x-jeff, x-smith, x-jones, x-later";

    let error = preflight_request()
        .origin("a.test")
        .request_method("GET")
        .request_headers(requested)
        .evaluate(&cors)
        .expect_err("header not allowed");

    assert_eq!(
        error,
        CorsError::HeaderNotAllowed {
            sent: requested.into(),
            allowed: vec!["x-jeff".into(), "x-smith".into()],
        }
    );
}

#[test]
fn no_requested_headers_echoes_configured_list() {
    let cors = cors().allowed_headers("X-One,X-Two").build();

    let result = assert_preflight(
        preflight_request()
            .origin("a.test")
            .request_method("GET")
            .check(&cors),
    );

    assert_eq!(
        header_value(&result.headers, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("X-One, X-Two")
    );
}

#[test]
fn dynamic_max_age_must_not_be_negative() {
    let cors = cors()
        .max_age(0)
        .build();
    cors.update_settings([(
        "maxAge",
        Setting::dynamic(|_| SettingValue::Int(-30)),
    )])
    .expect("callbacks pass validation");

    let error = preflight_request()
        .origin("a.test")
        .request_method("GET")
        .evaluate(&cors)
        .expect_err("negative max age");

    assert_eq!(error, CorsError::NegativeMaxAge { value: -30 });
    assert_eq!(error.to_string(), "maxAge should be 0 or more, got -30");
}

#[test]
fn preflight_with_disallowed_origin_is_rejected_before_method_checks() {
    let cors = cors().origin("example.com").methods("").build();

    let error = preflight_request()
        .origin("evil.com")
        .request_method("GET")
        .evaluate(&cors)
        .expect_err("bad origin");

    assert!(matches!(error, CorsError::BadOrigin { .. }));
}
