//! Pattern matching for policy fields
//!
//! A pattern is split into segments by a field-specific delimiter and compared
//! position by position against the requested value:
//! - `*` as the whole pattern matches any value
//! - `*` as a segment matches exactly one segment of any content
//! - any other segment must equal the requested segment byte for byte
//!
//! There is no partial-segment wildcard: `Get*` only matches the literal `Get*`.

use super::FieldValue;

/// Whole-field and whole-segment wildcard
pub const WILDCARD: &str = "*";

/// Segment matcher for one kind of policy field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatcher {
    delimiter: char,
}

impl FieldMatcher {
    /// Matcher for principals (`account:user`)
    pub const PRINCIPAL: FieldMatcher = FieldMatcher::new(':');

    /// Matcher for actions (`s3:GetObject`)
    pub const ACTION: FieldMatcher = FieldMatcher::new(':');

    /// Matcher for resources (`arn:aws:s3:::bucket/key`)
    pub const RESOURCE: FieldMatcher = FieldMatcher::new('/');

    /// Create a matcher splitting on `delimiter`
    pub const fn new(delimiter: char) -> Self {
        FieldMatcher { delimiter }
    }

    /// Character separating the segments of this field
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Check if a policy field matches a requested value
    ///
    /// A list field matches if any of its patterns matches. An empty list never
    /// matches.
    ///
    /// # Examples
    /// ```
    /// use policy_engine_rs::iam::{FieldMatcher, FieldValue};
    ///
    /// let field = FieldValue::from("arn:aws:s3:::bucket/*");
    /// assert!(FieldMatcher::RESOURCE.matches(&field, "arn:aws:s3:::bucket/file.txt"));
    /// assert!(!FieldMatcher::RESOURCE.matches(&field, "arn:aws:s3:::bucket/dir/file.txt"));
    /// ```
    pub fn matches(&self, policy: &FieldValue, requested: &str) -> bool {
        policy
            .iter()
            .any(|pattern| self.matches_pattern(pattern, requested))
    }

    /// Check if a policy field matches a requested field that may itself be a list
    ///
    /// A requested list matches if any of its values matches. A whole-field `*`
    /// pattern matches a requested list of any length, including an empty one.
    pub fn matches_any(&self, policy: &FieldValue, requested: &FieldValue) -> bool {
        policy.iter().any(|pattern| match requested {
            FieldValue::Scalar(value) => self.matches_pattern(pattern, value),
            FieldValue::List(values) => {
                pattern == WILDCARD
                    || values
                        .iter()
                        .any(|value| self.matches_pattern(pattern, value))
            }
        })
    }

    /// Match a single pattern against a single value
    pub fn matches_pattern(&self, pattern: &str, value: &str) -> bool {
        if pattern == WILDCARD {
            return true;
        }

        let mut pattern_parts = pattern.split(self.delimiter);
        let mut value_parts = value.split(self.delimiter);

        loop {
            match (pattern_parts.next(), value_parts.next()) {
                (None, None) => return true,
                (Some(pat_part), Some(value_part)) => {
                    if pat_part != WILDCARD && pat_part != value_part {
                        return false;
                    }
                }
                // Segment counts differ
                _ => return false,
            }
        }
    }
}
