//! In-memory policy store
//!
//! Holds the active policy set behind a single shared handle. Replacing the set
//! swaps the handle; appending copies on write. Readers take a snapshot once and
//! keep evaluating against it even if the store changes underneath them.

use super::Policy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable view of the policy set at one point in time
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    generation: u64,
    policies: Vec<Policy>,
}

impl PolicySet {
    /// Number of store mutations that produced this set
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Policy> {
        self.policies.iter()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl<'a> IntoIterator for &'a PolicySet {
    type Item = &'a Policy;
    type IntoIter = std::slice::Iter<'a, Policy>;

    fn into_iter(self) -> Self::IntoIter {
        self.policies.iter()
    }
}

/// Owner of the active policy set
#[derive(Debug, Default)]
pub struct PolicyStore {
    current: RwLock<Arc<PolicySet>>,
}

impl PolicyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `policies`
    pub fn with_policies(policies: Vec<Policy>) -> Self {
        let store = Self::new();
        store.load_policies(policies);
        store
    }

    /// Replace the whole policy set
    ///
    /// Evaluations already in progress keep the set they started with.
    pub fn load_policies(&self, policies: Vec<Policy>) {
        let count = policies.len();
        let mut current = self.current.write();
        let generation = current.generation + 1;
        *current = Arc::new(PolicySet {
            generation,
            policies,
        });
        drop(current);

        info!(count, generation, "Loaded policy set");
    }

    /// Append one policy to the end of the set
    pub fn add_policy(&self, policy: Policy) {
        let mut current = self.current.write();
        // Clones the set only if a reader still holds the previous snapshot
        let set = Arc::make_mut(&mut *current);
        set.generation += 1;
        debug!(id = %policy.id, generation = set.generation, "Added policy");
        set.policies.push(policy);
    }

    /// Current policy set
    pub fn snapshot(&self) -> Arc<PolicySet> {
        Arc::clone(&*self.current.read())
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
