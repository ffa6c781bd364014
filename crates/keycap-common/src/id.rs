use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the binding that always exists and always sorts first.
pub const PRIMARY_BINDING_ID: &str = "transcribe";

/// Generates an id for a user-added binding, e.g. `custom-3f9a12bc`.
pub fn new_binding_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "custom-{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(String);

impl BindingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn primary() -> Self {
        Self(PRIMARY_BINDING_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_primary(&self) -> bool {
        self.0 == PRIMARY_BINDING_ID
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BindingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for BindingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
