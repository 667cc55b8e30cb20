#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use policy_engine_rs::{Effect, FieldValue, Policy, PolicyEngine, PolicyStore};
use std::sync::Arc;

#[derive(Arbitrary, Debug)]
struct FuzzPolicy {
    deny: bool,
    principal: Vec<String>,
    action: Vec<String>,
    resource: Vec<String>,
}

#[derive(Arbitrary, Debug)]
struct Input {
    policies: Vec<FuzzPolicy>,
    principal: String,
    action: String,
    resource: String,
}

fn field(mut values: Vec<String>) -> FieldValue {
    if values.len() == 1 {
        FieldValue::Scalar(values.remove(0))
    } else {
        FieldValue::List(values)
    }
}

fuzz_target!(|input: Input| {
    let policies: Vec<Policy> = input
        .policies
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let effect = if p.deny { Effect::Deny } else { Effect::Allow };
            Policy::new(i.to_string(), effect, field(p.principal), field(p.action), field(p.resource))
        })
        .collect();

    let deny_only = policies.iter().all(|p| p.effect == Effect::Deny);

    let engine = PolicyEngine::with_cache(Arc::new(PolicyStore::with_policies(policies)), 16);
    let first = engine.can_access(&input.principal, &input.action, &input.resource);
    let second = engine.can_access(&input.principal, &input.action, &input.resource);

    // Cached and uncached answers agree
    assert_eq!(first, second);
    if deny_only {
        assert!(!first);
    }
});
