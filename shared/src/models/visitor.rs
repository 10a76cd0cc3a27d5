//! Visitor Model

use serde::{Deserialize, Serialize};

/// Visitor entity (visitante)
///
/// `phone` is expected in the `(DD) DDDDD-DDDD` display format; the model
/// itself does not enforce it, [`crate::phone`] does at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visitor {
    pub name: String,
    pub phone: String,
}

impl Visitor {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// A visitor row counts as filled once either field has content
    pub fn is_started(&self) -> bool {
        !self.name.is_empty() || !self.phone.is_empty()
    }

    /// Both name and phone present
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty()
    }

    /// Report cell line: `Nome ((11) 91234-5678)`
    ///
    /// ```
    /// use shared::models::Visitor;
    ///
    /// let visitor = Visitor::new("Ana", "(11) 91234-5678");
    /// assert_eq!(visitor.display_line(), "Ana ((11) 91234-5678)");
    /// ```
    pub fn display_line(&self) -> String {
        format!("{} ({})", self.name, self.phone)
    }
}
