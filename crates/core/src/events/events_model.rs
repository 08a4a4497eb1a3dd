//! Change-event domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Collection a successful mutation touched. Connected clients refetch the
/// named collection when they see the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeTopic {
    #[serde(rename = "odas")]
    Floats,
    #[serde(rename = "oda-requests")]
    Requests,
    #[serde(rename = "invoices")]
    Invoices,
    #[serde(rename = "replacements")]
    Replacements,
    #[serde(rename = "users")]
    Users,
}

impl ChangeTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeTopic::Floats => "odas",
            ChangeTopic::Requests => "oda-requests",
            ChangeTopic::Invoices => "invoices",
            ChangeTopic::Replacements => "replacements",
            ChangeTopic::Users => "users",
        }
    }
}

impl fmt::Display for ChangeTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
