//! Who is asking.

use std::collections::HashSet;

use publink_shared::{AccessRight, Claims};

use crate::publication::UserIdentifier;

/// A requester as seen by the access decision engine.
///
/// Built from pre-parsed token claims. An anonymous requester has no user,
/// no person-registry id, and no access rights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requester {
    user: Option<UserIdentifier>,
    person_id: Option<String>,
    access_rights: HashSet<AccessRight>,
}

impl Requester {
    /// A requester without any identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A requester identified by a user identifier.
    #[must_use]
    pub fn user(user_id: &str) -> Self {
        Self {
            user: UserIdentifier::new(user_id),
            ..Self::default()
        }
    }

    /// Builds a requester from validated token claims.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user: UserIdentifier::new(claims.user_id()),
            person_id: claims
                .person_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from),
            access_rights: claims.access_rights().collect(),
        }
    }

    /// Set the person-registry id.
    #[must_use]
    pub fn with_person_id(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    /// Grant an access right.
    #[must_use]
    pub fn with_access_right(mut self, right: AccessRight) -> Self {
        self.access_rights.insert(right);
        self
    }

    /// Returns true if the requester carries no identity at all.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.user.is_none() && self.person_id.is_none()
    }

    /// Normalized user identifier, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserIdentifier> {
        self.user.as_ref()
    }

    /// Person-registry id, if any.
    #[must_use]
    pub fn person_id(&self) -> Option<&str> {
        self.person_id.as_deref()
    }

    /// Returns true if the requester holds `right`.
    #[must_use]
    pub fn has(&self, right: AccessRight) -> bool {
        self.access_rights.contains(&right)
    }
}
