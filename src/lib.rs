//! # policy-engine-rs - IAM-Style Access Policy Evaluation
//!
//! `policy-engine-rs` answers one question: may this principal perform this action
//! on this resource, given the policies currently loaded?
//!
//! - **Segment wildcards**: `*` matches a whole field or one `:`/`/`-delimited segment
//! - **List-valued fields**: a policy applies if any listed pattern matches
//! - **Deny override**: any applicable Deny beats every applicable Allow
//! - **Default deny**: no applicable policy means no access
//! - **Snapshot consistency**: reloads never tear an evaluation in progress
//!
//! ## Quick Start
//!
//! ```rust
//! use policy_engine_rs::{Effect, Policy, PolicyEngine, PolicyStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(PolicyStore::new());
//! let engine = PolicyEngine::new(Arc::clone(&store));
//!
//! store.load_policies(vec![
//!     Policy::new("read-docs", Effect::Allow, "*", "docs:Read", "docs/*"),
//!     Policy::new("no-drafts", Effect::Deny, "*", "*", "docs/drafts"),
//! ]);
//!
//! assert!(engine.can_access("alice", "docs:Read", "docs/handbook"));
//! assert!(!engine.can_access("alice", "docs:Read", "docs/drafts"));
//! assert!(!engine.can_access("alice", "docs:Write", "docs/handbook"));
//! ```
//!
//! ## Loading JSON Policies
//!
//! ```rust
//! use policy_engine_rs::{Policy, PolicyEngine, PolicyStore, Result};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let policies = Policy::list_from_json(r#"[
//!     {
//!         "id": "policy1",
//!         "type": "PermissionsPolicy",
//!         "principal": "*",
//!         "effect": "Allow",
//!         "action": ["s3:GetObject"],
//!         "resource": ["arn:aws:s3:::example-bucket/*"]
//!     }
//! ]"#)?;
//!
//! let engine = PolicyEngine::with_cache(Arc::new(PolicyStore::new()), 1024);
//! engine.load_policies(policies);
//! assert!(engine.can_access("user1", "s3:GetObject", "arn:aws:s3:::example-bucket/file.txt"));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod server;

// Re-export core modules internally so crate:: paths in core still work
pub(crate) use crate::core::{config, error};

pub use crate::core::iam;

pub use crate::core::{
    config::ServerConfig,
    error::{PolicyError, Result},
    iam::{
        AccessRequest, Decision, Effect, FieldMatcher, FieldValue, Policy, PolicyEngine,
        PolicySet, PolicyStore, PolicyType,
    },
};
pub use crate::server::PolicyService;
