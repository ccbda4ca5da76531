//! Authentication types for JWT claims and access rights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Elevated capabilities a requester may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRight {
    /// May read any file of any publication.
    ManageResources,
    /// May read embargoed files of degree theses.
    ManageDegreeEmbargo,
}

impl AccessRight {
    /// Convert to the string used in tokens.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManageResources => "MANAGE_RESOURCES",
            Self::ManageDegreeEmbargo => "MANAGE_DEGREE_EMBARGO",
        }
    }

    /// Parse from the string used in tokens.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MANAGE_RESOURCES" => Some(Self::ManageResources),
            "MANAGE_DEGREE_EMBARGO" => Some(Self::ManageDegreeEmbargo),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccessRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier).
    pub sub: String,
    /// Person-registry id of the user, if registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Access rights held by the user, as raw strings.
    #[serde(default)]
    pub access_rights: Vec<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: &str,
        person_id: Option<&str>,
        access_rights: &[AccessRight],
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            person_id: person_id.map(String::from),
            access_rights: access_rights.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user identifier from claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Returns the recognised access rights. Unknown strings are skipped.
    pub fn access_rights(&self) -> impl Iterator<Item = AccessRight> + '_ {
        self.access_rights.iter().filter_map(|r| AccessRight::parse(r))
    }
}
