//! Member Model

use serde::{Deserialize, Serialize};

/// Roster member (membro)
///
/// Static reference data loaded from configuration, never written by the
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub group: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            category: category.into(),
            sex: None,
        }
    }
}
