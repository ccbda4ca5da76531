//! Publication and file artifact types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use publink_shared::types::{FileId, PublicationId};

/// Instance types that make a publication a degree thesis.
pub const THESIS_INSTANCE_TYPES: [&str; 3] = ["DegreeBachelor", "DegreeMaster", "DegreePhd"];

/// Lifecycle status of a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    /// Freshly created.
    New,
    /// Being edited by its owner.
    Draft,
    /// Metadata is public, files are not yet.
    PublishedMetadata,
    /// Fully published.
    Published,
    /// Deleted.
    Deleted,
    /// Withdrawn after publication.
    Unpublished,
    /// Draft scheduled for deletion.
    DraftForDeletion,
}

impl PublicationStatus {
    /// Returns true if the publication is fully published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// A user identifier, trimmed of surrounding whitespace.
///
/// Equality is exact and case-sensitive after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserIdentifier(String);

impl UserIdentifier {
    /// Normalizes a raw identifier. Returns `None` for blank input.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Returns the normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOwner {
    /// Raw owner user identifier as delivered by the publication service.
    pub owner: String,
    /// Organization the owner is affiliated with.
    pub owner_affiliation: Option<String>,
}

impl ResourceOwner {
    /// Returns true if `user` is this owner.
    #[must_use]
    pub fn is(&self, user: &UserIdentifier) -> bool {
        UserIdentifier::new(&self.owner).is_some_and(|owner| &owner == user)
    }
}

/// Contributor to a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    /// Display name.
    pub name: Option<String>,
    /// Person-registry id, when the contributor is a registered person.
    pub person_id: Option<String>,
}

/// Which kind of file artifact this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileVariant {
    /// Approved for publication.
    Published,
    /// Awaiting approval.
    Unpublished,
    /// May never be published.
    Unpublishable,
}

/// A file attached to a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Variant discriminant.
    pub variant: FileVariant,
    /// Identifier, unique within the publication.
    pub identifier: FileId,
    /// Original file name.
    pub name: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Files are hidden from non-privileged requesters until this instant.
    pub embargo_date: Option<DateTime<Utc>>,
    /// File is under contractual restriction.
    pub administrative_agreement: bool,
}

impl File {
    /// Returns true if the embargo date is set and strictly after `now`.
    #[must_use]
    pub fn has_active_embargo_at(&self, now: DateTime<Utc>) -> bool {
        self.embargo_date.is_some_and(|date| date > now)
    }

    /// Returns true if requesters other than owners may see this file at `now`.
    #[must_use]
    pub fn is_visible_for_non_owner_at(&self, now: DateTime<Utc>) -> bool {
        match self.variant {
            FileVariant::Published => {
                !self.has_active_embargo_at(now) && !self.administrative_agreement
            }
            FileVariant::Unpublished | FileVariant::Unpublishable => false,
        }
    }

    /// Storage key of the file's content in the object store.
    #[must_use]
    pub fn storage_key(&self) -> String {
        self.identifier.to_string()
    }
}

/// A link attached to a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedLink {
    /// Target of the link.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
}

/// Anything attached to a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociatedArtifact {
    /// A downloadable file.
    File(File),
    /// An external link.
    Link(AssociatedLink),
    /// Placeholder meaning "no artifacts by intent".
    Null,
}

impl AssociatedArtifact {
    /// Returns the file if this artifact is one.
    #[must_use]
    pub const fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(file) => Some(file),
            Self::Link(_) | Self::Null => None,
        }
    }
}

/// Read-only projection of a publication, fetched fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Publication identifier.
    pub identifier: PublicationId,
    /// Lifecycle status.
    pub status: PublicationStatus,
    /// Owner.
    pub resource_owner: ResourceOwner,
    /// Contributors, in order.
    pub contributors: Vec<Contributor>,
    /// Publication instance type, e.g. `DegreeMaster` or `AcademicArticle`.
    pub instance_type: Option<String>,
    /// Attached artifacts, in order.
    pub associated_artifacts: Vec<AssociatedArtifact>,
}

impl Publication {
    /// Returns true if the instance type is a degree thesis.
    #[must_use]
    pub fn is_thesis(&self) -> bool {
        self.instance_type
            .as_deref()
            .is_some_and(|t| THESIS_INSTANCE_TYPES.contains(&t))
    }

    /// Returns true if `user` owns the publication.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserIdentifier) -> bool {
        self.resource_owner.is(user)
    }

    /// Returns true if a contributor carries the given person-registry id.
    ///
    /// Both sides are trimmed of surrounding whitespace; blank ids never match.
    #[must_use]
    pub fn has_contributor(&self, person_id: &str) -> bool {
        let person_id = person_id.trim();
        !person_id.is_empty()
            && self
                .contributors
                .iter()
                .any(|c| c.person_id.as_deref().map(str::trim) == Some(person_id))
    }

    /// Iterates over the file artifacts, skipping links and placeholders.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.associated_artifacts
            .iter()
            .filter_map(AssociatedArtifact::as_file)
    }
}
