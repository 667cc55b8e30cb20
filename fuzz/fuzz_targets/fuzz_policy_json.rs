#![no_main]
use libfuzzer_sys::fuzz_target;
use policy_engine_rs::server::parse_access_request;
use policy_engine_rs::{Policy, PolicyEngine, PolicyStore};
use std::sync::Arc;

// Malformed documents must be rejected, never panic
fuzz_target!(|data: &[u8]| {
    let engine = PolicyEngine::new(Arc::new(PolicyStore::new()));

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(policies) = Policy::list_from_json(text) {
            engine.load_policies(policies);
        }
    }

    if let Ok(request) = parse_access_request(data) {
        engine.evaluate(&request);
    }
});
