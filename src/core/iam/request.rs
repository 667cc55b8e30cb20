//! Access request triple

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A request to perform `action` on `resource` as `principal`
///
/// Missing JSON fields deserialize to empty strings so that `validate` reports
/// them together with empty values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
pub struct AccessRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub principal: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub action: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub resource: String,
}

impl AccessRequest {
    pub fn new(
        principal: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        AccessRequest {
            principal: principal.into(),
            action: action.into(),
            resource: resource.into(),
        }
    }
}
