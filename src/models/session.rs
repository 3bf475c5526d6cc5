use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "user123";

/// Identity of the user the dashboard is acting for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}
