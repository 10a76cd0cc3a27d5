use serde::{Deserialize, Serialize};

/// Header strings shown above the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurchInfo {
    pub name: String,
    pub unit: String,
    pub event: String,
    pub form_title: String,
}
