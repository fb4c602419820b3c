use middleware_cors::{CorsDecision, HeaderSet, PreflightResult};

pub fn assert_simple(decision: CorsDecision) -> HeaderSet {
    match decision {
        CorsDecision::Simple(result) => result.headers,
        other => panic!("expected simple decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> PreflightResult {
    match decision {
        CorsDecision::Preflight(result) => result,
        other => panic!("expected preflight decision, got {:?}", other),
    }
}
