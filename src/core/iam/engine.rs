//! Policy evaluation engine with deny precedence
//!
//! Evaluates the policies held by a [`PolicyStore`] to decide whether a principal
//! may perform an action on a resource:
//! - A policy applies when its principal, action and resource all match
//! - Any applicable Deny wins over any number of applicable Allows
//! - No applicable policy means deny
//! - Optional LRU caching of decisions per policy-set generation

use super::{AccessRequest, Effect, FieldMatcher, Policy, PolicyCache, PolicySet, PolicyStore};
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Outcome of evaluating one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// At least one applicable Allow and no applicable Deny
    Allow,
    /// At least one applicable Deny
    ExplicitDeny,
    /// No applicable policy
    ImplicitDeny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Policy evaluation engine
pub struct PolicyEngine {
    store: Arc<PolicyStore>,
    cache: Option<Mutex<PolicyCache>>,
}

impl PolicyEngine {
    /// Create an engine over `store` without a decision cache
    pub fn new(store: Arc<PolicyStore>) -> Self {
        PolicyEngine { store, cache: None }
    }

    /// Create an engine over `store` caching up to `capacity` decisions
    ///
    /// A capacity of 0 disables caching.
    pub fn with_cache(store: Arc<PolicyStore>, capacity: usize) -> Self {
        PolicyEngine {
            store,
            cache: NonZeroUsize::new(capacity).map(|c| Mutex::new(PolicyCache::new(c))),
        }
    }

    /// Store this engine evaluates against
    pub fn store(&self) -> &Arc<PolicyStore> {
        &self.store
    }

    /// Replace the whole policy set
    pub fn load_policies(&self, policies: Vec<Policy>) {
        self.store.load_policies(policies);
    }

    /// Append one policy to the set
    pub fn add_policy(&self, policy: Policy) {
        self.store.add_policy(policy);
    }

    /// Check whether `principal` may perform `action` on `resource`
    ///
    /// # Examples
    ///
    /// ```
    /// use policy_engine_rs::iam::{Effect, Policy, PolicyEngine, PolicyStore};
    /// use std::sync::Arc;
    ///
    /// let engine = PolicyEngine::new(Arc::new(PolicyStore::new()));
    /// engine.load_policies(vec![Policy::new(
    ///     "policy1",
    ///     Effect::Allow,
    ///     "*",
    ///     ["s3:GetObject"],
    ///     ["arn:aws:s3:::example-bucket/*"],
    /// )]);
    ///
    /// assert!(engine.can_access("user1", "s3:GetObject", "arn:aws:s3:::example-bucket/file.txt"));
    /// assert!(!engine.can_access("user1", "s3:PutObject", "arn:aws:s3:::example-bucket/file.txt"));
    /// ```
    pub fn can_access(&self, principal: &str, action: &str, resource: &str) -> bool {
        self.decide(principal, action, resource).is_allowed()
    }

    /// Evaluate a request and report how the decision was reached
    pub fn evaluate(&self, request: &AccessRequest) -> Decision {
        self.decide(&request.principal, &request.action, &request.resource)
    }

    fn decide(&self, principal: &str, action: &str, resource: &str) -> Decision {
        let snapshot = self.store.snapshot();

        let Some(cache) = &self.cache else {
            return Self::evaluate_snapshot(&snapshot, principal, action, resource);
        };

        {
            let mut cache = cache.lock();
            if !cache.sync(snapshot.generation()) {
                // A newer set was loaded while we were starting; don't touch its entries
                drop(cache);
                return Self::evaluate_snapshot(&snapshot, principal, action, resource);
            }
            if let Some(cached) = cache.get(principal, action, resource) {
                return cached;
            }
        }

        let decision = Self::evaluate_snapshot(&snapshot, principal, action, resource);

        let mut cache = cache.lock();
        if cache.sync(snapshot.generation()) {
            cache.put(principal, action, resource, decision);
        }

        decision
    }

    /// Evaluate against one policy set, without caching
    pub fn evaluate_snapshot(
        policies: &PolicySet,
        principal: &str,
        action: &str,
        resource: &str,
    ) -> Decision {
        let mut has_allow = false;
        let mut has_deny = false;

        for policy in policies.iter().filter(|p| applies_to(p, principal, action, resource)) {
            match policy.effect {
                Effect::Allow => has_allow = true,
                Effect::Deny => has_deny = true,
            }
        }

        let decision = if has_deny {
            Decision::ExplicitDeny
        } else if has_allow {
            Decision::Allow
        } else {
            Decision::ImplicitDeny
        };

        debug!(
            principal,
            action,
            resource,
            generation = policies.generation(),
            ?decision,
            "Evaluated access request"
        );

        decision
    }

    /// Clear the evaluation cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Number of cached decisions
    pub fn cache_size(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }
}

/// Check if a policy applies to the request on all three fields
fn applies_to(policy: &Policy, principal: &str, action: &str, resource: &str) -> bool {
    FieldMatcher::PRINCIPAL.matches(&policy.principal, principal)
        && FieldMatcher::RESOURCE.matches(&policy.resource, resource)
        && FieldMatcher::ACTION.matches(&policy.action, action)
}
