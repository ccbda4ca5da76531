//! File access decisions.

use chrono::{DateTime, Utc};

use publink_shared::AccessRight;
use publink_shared::types::FileId;

use super::requester::Requester;
use crate::publication::{File, Publication};

/// Why a request was denied.
///
/// Callers must surface every variant as "not found"; the distinction exists
/// for logs and diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No file artifact carries the identifier.
    FileNotFound,
    /// Several file artifacts carry the identifier. A data fault.
    DuplicateFileIdentifier {
        /// How many artifacts share the identifier.
        occurrences: usize,
    },
    /// The file is under an active embargo the requester may not bypass.
    Embargoed,
    /// The file is not public and the requester has no claim on it.
    NotPublic,
}

impl DenyReason {
    /// Returns true if the denial stems from inconsistent publication data.
    #[must_use]
    pub const fn is_data_fault(&self) -> bool {
        matches!(self, Self::DuplicateFileIdentifier { .. })
    }

    /// Short label for structured logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FileNotFound => "file_not_found",
            Self::DuplicateFileIdentifier { .. } => "duplicate_file_identifier",
            Self::Embargoed => "embargoed",
            Self::NotPublic => "not_public",
        }
    }
}

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision<'a> {
    /// The requester may download this file.
    Allow(&'a File),
    /// The requester may not, for the given reason.
    Deny(DenyReason),
}

impl AccessDecision<'_> {
    /// Returns true for `Allow`.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Finds the single file artifact with `file_id`.
///
/// # Errors
///
/// Returns `FileNotFound` when no file matches and
/// `DuplicateFileIdentifier` when more than one does.
pub fn locate_file(publication: &Publication, file_id: FileId) -> Result<&File, DenyReason> {
    let mut matches = publication.files().filter(|f| f.identifier == file_id);
    let Some(first) = matches.next() else {
        return Err(DenyReason::FileNotFound);
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(DenyReason::DuplicateFileIdentifier {
            occurrences: extra + 1,
        });
    }
    Ok(first)
}

/// Decides whether `requester` may download `file_id` of `publication` now.
#[must_use]
pub fn decide<'a>(
    requester: &Requester,
    publication: &'a Publication,
    file_id: FileId,
) -> AccessDecision<'a> {
    decide_at(requester, publication, file_id, Utc::now())
}

/// Decides whether `requester` may download `file_id` of `publication` at `now`.
///
/// Owners and contributors always win. Under an active embargo the only other
/// way in is the degree-embargo right on a thesis; otherwise the manage-resources
/// right or a published, publicly visible file.
#[must_use]
pub fn decide_at<'a>(
    requester: &Requester,
    publication: &'a Publication,
    file_id: FileId,
    now: DateTime<Utc>,
) -> AccessDecision<'a> {
    let file = match locate_file(publication, file_id) {
        Ok(file) => file,
        Err(reason) => return AccessDecision::Deny(reason),
    };

    let is_owner = requester
        .user_id()
        .is_some_and(|user| publication.is_owned_by(user));
    let is_contributor = requester
        .person_id()
        .is_some_and(|person| publication.has_contributor(person));

    if is_owner || is_contributor {
        return AccessDecision::Allow(file);
    }

    if file.has_active_embargo_at(now) {
        if requester.has(AccessRight::ManageDegreeEmbargo) && publication.is_thesis() {
            return AccessDecision::Allow(file);
        }
        return AccessDecision::Deny(DenyReason::Embargoed);
    }

    let is_public = publication.status.is_published() && file.is_visible_for_non_owner_at(now);
    if requester.has(AccessRight::ManageResources) || is_public {
        AccessDecision::Allow(file)
    } else {
        AccessDecision::Deny(DenyReason::NotPublic)
    }
}
