use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One form post. No schema is enforced; any JSON value the body parser
/// produced is accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Submission {
    pub fields: Value,
}

impl Submission {
    pub fn new(fields: Value) -> Self {
        Submission { fields }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
