//! Editor identity and roles.

use serde::{Deserialize, Serialize};

/// Display name used when an editor has neither a name nor an email.
pub const UNKNOWN_EDITOR_NAME: &str = "Unknown";

/// Role granted to an authenticated user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Treasurer,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Treasurer => "treasurer",
            Role::Member => "member",
        }
    }

    /// Whether this role may create, edit or delete goals, contributions and categories.
    pub fn can_manage_finances(&self) -> bool {
        matches!(self, Role::Admin | Role::Treasurer)
    }
}

/// The user performing an operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Editor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            role,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Identity used when authentication is disabled.
    pub fn anonymous() -> Self {
        Self::new("anonymous", Role::Admin)
    }

    pub fn display_name(&self) -> String {
        resolve_editor_name(self.name.as_deref(), self.email.as_deref())
    }
}

/// Name, falling back to email, falling back to [`UNKNOWN_EDITOR_NAME`].
/// Blank values count as missing.
pub fn resolve_editor_name(name: Option<&str>, email: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| email.map(str::trim).filter(|e| !e.is_empty()))
        .unwrap_or(UNKNOWN_EDITOR_NAME)
        .to_string()
}
