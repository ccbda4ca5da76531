//! Wire format of publication documents served by the metadata service.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use publink_shared::types::{FileId, PublicationId};

use super::error::PublicationError;
use super::types::{
    AssociatedArtifact, AssociatedLink, Contributor, File, FileVariant, Publication,
    PublicationStatus, ResourceOwner,
};

/// Publication document as returned by the metadata service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDocument {
    identifier: PublicationId,
    status: PublicationStatus,
    resource_owner: ResourceOwnerDocument,
    #[serde(default)]
    entity_description: Option<EntityDescriptionDocument>,
    #[serde(default)]
    associated_artifacts: Vec<ArtifactDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceOwnerDocument {
    owner: String,
    #[serde(default)]
    owner_affiliation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityDescriptionDocument {
    #[serde(default)]
    contributors: Vec<ContributorDocument>,
    #[serde(default)]
    reference: Option<ReferenceDocument>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContributorDocument {
    #[serde(default)]
    identity: Option<IdentityDocument>,
}

#[derive(Debug, Clone, Deserialize)]
struct IdentityDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceDocument {
    #[serde(default)]
    publication_instance: Option<InstanceDocument>,
}

#[derive(Debug, Clone, Deserialize)]
struct InstanceDocument {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum ArtifactDocument {
    PublishedFile(FileDocument),
    UnpublishedFile(FileDocument),
    UnpublishableFile(FileDocument),
    AssociatedLink(LinkDocument),
    NullAssociatedArtifact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDocument {
    identifier: FileId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    embargo_date: Option<DateTime<Utc>>,
    #[serde(default)]
    administrative_agreement: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LinkDocument {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

impl FileDocument {
    fn into_file(self, variant: FileVariant) -> File {
        File {
            variant,
            identifier: self.identifier,
            name: self.name,
            mime_type: self.mime_type,
            size: self.size,
            embargo_date: self.embargo_date,
            administrative_agreement: self.administrative_agreement,
        }
    }
}

impl From<ArtifactDocument> for AssociatedArtifact {
    fn from(doc: ArtifactDocument) -> Self {
        match doc {
            ArtifactDocument::PublishedFile(f) => Self::File(f.into_file(FileVariant::Published)),
            ArtifactDocument::UnpublishedFile(f) => {
                Self::File(f.into_file(FileVariant::Unpublished))
            }
            ArtifactDocument::UnpublishableFile(f) => {
                Self::File(f.into_file(FileVariant::Unpublishable))
            }
            ArtifactDocument::AssociatedLink(l) => Self::Link(AssociatedLink {
                id: l.id,
                name: l.name,
            }),
            ArtifactDocument::NullAssociatedArtifact => Self::Null,
        }
    }
}

impl From<PublicationDocument> for Publication {
    fn from(doc: PublicationDocument) -> Self {
        let (contributors, instance_type) = match doc.entity_description {
            Some(description) => {
                let contributors = description
                    .contributors
                    .into_iter()
                    .map(|c| {
                        let identity = c.identity;
                        Contributor {
                            name: identity.as_ref().and_then(|i| i.name.clone()),
                            person_id: identity.and_then(|i| i.id),
                        }
                    })
                    .collect();
                let instance_type = description
                    .reference
                    .and_then(|r| r.publication_instance)
                    .map(|i| i.kind);
                (contributors, instance_type)
            }
            None => (Vec::new(), None),
        };

        Self {
            identifier: doc.identifier,
            status: doc.status,
            resource_owner: ResourceOwner {
                owner: doc.resource_owner.owner,
                owner_affiliation: doc.resource_owner.owner_affiliation,
            },
            contributors,
            instance_type,
            associated_artifacts: doc
                .associated_artifacts
                .into_iter()
                .map(AssociatedArtifact::from)
                .collect(),
        }
    }
}

/// Parses a publication document from a JSON body.
///
/// # Errors
///
/// Returns `PublicationError::Malformed` if the body is not a valid document.
pub fn parse_publication(body: &[u8]) -> Result<Publication, PublicationError> {
    serde_json::from_slice::<PublicationDocument>(body)
        .map(Publication::from)
        .map_err(|e| PublicationError::malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "identifier": "0190e5b5c4a5-1b2c3d4e",
        "status": "PUBLISHED",
        "resourceOwner": {
            "owner": "owner@example.org",
            "ownerAffiliation": "https://api.example.org/customer/1"
        },
        "entityDescription": {
            "contributors": [
                { "identity": { "id": "https://api.example.org/person/42", "name": "Ada" } },
                { "identity": { "name": "Unregistered" } }
            ],
            "reference": { "publicationInstance": { "type": "DegreeMaster" } }
        },
        "associatedArtifacts": [
            {
                "type": "PublishedFile",
                "identifier": "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
                "name": "thesis.pdf",
                "mimeType": "application/pdf",
                "size": 2048,
                "embargoDate": "2099-01-01T00:00:00Z",
                "administrativeAgreement": false
            },
            {
                "type": "UnpublishableFile",
                "identifier": "6ba7b812-9dad-11d1-80b4-00c04fd430c8",
                "administrativeAgreement": true
            },
            { "type": "AssociatedLink", "id": "https://example.org/data" },
            { "type": "NullAssociatedArtifact" }
        ]
    }"#;

    #[test]
    fn test_parse_full_document() {
        let publication = parse_publication(DOCUMENT.as_bytes()).unwrap();

        assert_eq!(publication.identifier.as_str(), "0190e5b5c4a5-1b2c3d4e");
        assert_eq!(publication.status, PublicationStatus::Published);
        assert_eq!(publication.resource_owner.owner, "owner@example.org");
        assert!(publication.is_thesis());
        assert!(publication.has_contributor("https://api.example.org/person/42"));
        assert_eq!(publication.contributors.len(), 2);
        assert_eq!(publication.contributors[1].person_id, None);
        assert_eq!(publication.associated_artifacts.len(), 4);

        let files: Vec<_> = publication.files().collect();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].variant, FileVariant::Published);
        assert_eq!(files[0].mime_type.as_deref(), Some("application/pdf"));
        assert!(files[0].embargo_date.is_some());
        assert_eq!(files[1].variant, FileVariant::Unpublishable);
        assert!(files[1].administrative_agreement);
        assert!(matches!(
            publication.associated_artifacts[3],
            AssociatedArtifact::Null
        ));
    }

    #[test]
    fn test_parse_minimal_document() {
        let body = r#"{
            "identifier": "P2",
            "status": "DRAFT",
            "resourceOwner": { "owner": "owner@example.org" }
        }"#;

        let publication = parse_publication(body.as_bytes()).unwrap();
        assert_eq!(publication.status, PublicationStatus::Draft);
        assert!(publication.associated_artifacts.is_empty());
        assert!(publication.contributors.is_empty());
        assert!(!publication.is_thesis());
    }

    #[test]
    fn test_missing_owner_is_malformed() {
        let body = r#"{ "identifier": "P3", "status": "DRAFT" }"#;
        let err = parse_publication(body.as_bytes()).unwrap_err();
        assert!(matches!(err, PublicationError::Malformed(_)));
    }

    #[test]
    fn test_unknown_artifact_type_is_malformed() {
        let body = r#"{
            "identifier": "P4",
            "status": "PUBLISHED",
            "resourceOwner": { "owner": "owner@example.org" },
            "associatedArtifacts": [ { "type": "Hologram" } ]
        }"#;
        let err = parse_publication(body.as_bytes()).unwrap_err();
        assert!(matches!(err, PublicationError::Malformed(_)));
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let body = r#"{
            "identifier": "P5",
            "status": "ARCHIVED",
            "resourceOwner": { "owner": "owner@example.org" }
        }"#;
        assert!(parse_publication(body.as_bytes()).is_err());
    }
}
