//! Identity and Access Management (IAM) policy evaluation
//!
//! Provides access decisions over a set of AWS-style policies:
//! - JSON policy documents with single or list-valued fields
//! - Segment wildcards (`*`) for principals, actions and resources
//! - Allow/Deny aggregation with explicit deny precedence
//! - Snapshot-consistent policy store with atomic replacement
//! - Optional LRU caching of decisions

mod cache;
mod engine;
mod pattern;
mod policy;
mod request;
mod store;

pub use cache::PolicyCache;
pub use engine::{Decision, PolicyEngine};
pub use pattern::{FieldMatcher, WILDCARD};
pub use policy::{Effect, FieldValue, Policy, PolicyType};
pub use request::AccessRequest;
pub use store::{PolicySet, PolicyStore};
