use super::*;

mod header_line {
    use super::*;

    #[test]
    fn should_return_empty_string_when_header_absent() {
        // Arrange
        let request = RequestContext::new("GET");

        // Act
        let value = request.header_line(header::ORIGIN);

        // Assert
        assert_eq!(value, "");
    }

    #[test]
    fn should_match_name_case_insensitively_when_header_present() {
        // Arrange
        let request = RequestContext::new("GET").with_header("oRiGiN", "example.com");

        // Act
        let value = request.header_line(header::ORIGIN);

        // Assert
        assert_eq!(value, "example.com");
    }

    #[test]
    fn should_join_values_when_header_repeated() {
        // Arrange
        let request = RequestContext::new("OPTIONS")
            .with_header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-jeff")
            .with_header("access-control-request-headers", "x-smith");

        // Act
        let value = request.access_control_request_headers();

        // Assert
        assert_eq!(value, "x-jeff, x-smith");
    }
}

mod method {
    use super::*;

    #[test]
    fn should_preserve_original_casing_when_read() {
        // Arrange
        let request = RequestContext::new("options");

        // Act & Assert
        assert_eq!(request.method(), "options");
    }
}

mod shortcuts {
    use super::*;

    #[test]
    fn should_read_preflight_headers_when_present() {
        // Arrange
        let request = RequestContext::new("OPTIONS")
            .with_header(header::ORIGIN, "https://a.test")
            .with_header(header::ACCESS_CONTROL_REQUEST_METHOD, "put");

        // Act & Assert
        assert_eq!(request.origin(), "https://a.test");
        assert_eq!(request.access_control_request_method(), "put");
        assert_eq!(request.access_control_request_headers(), "");
    }
}
