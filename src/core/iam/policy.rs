//! IAM policy document structure
//!
//! A policy grants or denies a principal an action on a resource. The shape
//! follows AWS-style statements: `principal`, `action` and `resource` are each a
//! single pattern or a list of patterns.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Effect of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Allow the action
    Allow,
    /// Deny the action (takes precedence over Allow)
    Deny,
}

/// Kind of policy document
///
/// Carried for bookkeeping only. All kinds are evaluated identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PolicyType {
    #[default]
    PermissionsPolicy,
    PermissionsBoundary,
    ResourcePolicy,
}

/// A principal, action or resource field: one pattern or a list of patterns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Iterate over every pattern held by this field
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            FieldValue::Scalar(value) => std::slice::from_ref(value),
            FieldValue::List(values) => values,
        };
        items.iter().map(String::as_str)
    }

    /// Number of patterns in this field
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Scalar(_) => 1,
            FieldValue::List(values) => values.len(),
        }
    }

    /// True for an empty list
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(values: [&str; N]) -> Self {
        FieldValue::List(values.iter().map(|v| v.to_string()).collect())
    }
}

/// A single access policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy identifier (not required to be unique)
    pub id: String,

    /// Policy kind
    #[serde(rename = "type", default)]
    pub policy_type: PolicyType,

    /// Principals this policy applies to (`:`-delimited)
    pub principal: FieldValue,

    /// Effect of this policy
    pub effect: Effect,

    /// Actions this policy applies to (`:`-delimited)
    pub action: FieldValue,

    /// Resources this policy applies to (`/`-delimited)
    pub resource: FieldValue,
}

impl Policy {
    /// Create a new permissions policy
    pub fn new(
        id: impl Into<String>,
        effect: Effect,
        principal: impl Into<FieldValue>,
        action: impl Into<FieldValue>,
        resource: impl Into<FieldValue>,
    ) -> Self {
        Policy {
            id: id.into(),
            policy_type: PolicyType::default(),
            principal: principal.into(),
            effect,
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Set the policy kind
    pub fn with_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = policy_type;
        self
    }

    /// Parse a single policy from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of policies
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize policy to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
