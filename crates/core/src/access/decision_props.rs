//! Property tests for file access decisions.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use publink_shared::AccessRight;
use publink_shared::types::{FileId, PublicationId};

use super::decision::{AccessDecision, DenyReason, decide_at};
use super::requester::Requester;
use crate::publication::{
    AssociatedArtifact, Contributor, File, FileVariant, Publication, PublicationStatus,
    ResourceOwner,
};

const OWNER: &str = "owner@example.org";
const CONTRIBUTOR: &str = "https://api.example.org/person/42";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn status_strategy() -> impl Strategy<Value = PublicationStatus> {
    prop_oneof![
        Just(PublicationStatus::New),
        Just(PublicationStatus::Draft),
        Just(PublicationStatus::PublishedMetadata),
        Just(PublicationStatus::Published),
        Just(PublicationStatus::Deleted),
        Just(PublicationStatus::Unpublished),
        Just(PublicationStatus::DraftForDeletion),
    ]
}

fn variant_strategy() -> impl Strategy<Value = FileVariant> {
    prop_oneof![
        Just(FileVariant::Published),
        Just(FileVariant::Unpublished),
        Just(FileVariant::Unpublishable),
    ]
}

fn instance_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("DegreeBachelor".to_string())),
        Just(Some("DegreeMaster".to_string())),
        Just(Some("DegreePhd".to_string())),
        Just(Some("AcademicArticle".to_string())),
    ]
}

/// A file whose embargo, when present, is between one minute and a year ahead.
fn file_strategy(embargoed: bool) -> impl Strategy<Value = File> {
    (variant_strategy(), any::<bool>(), 1i64..525_600).prop_map(
        move |(variant, administrative_agreement, minutes)| File {
            variant,
            identifier: FileId::from_uuid(Uuid::now_v7()),
            name: None,
            mime_type: None,
            size: None,
            embargo_date: embargoed.then(|| now() + Duration::minutes(minutes)),
            administrative_agreement,
        },
    )
}

fn publication_with(status: PublicationStatus, instance: Option<String>, file: File) -> Publication {
    Publication {
        identifier: PublicationId::parse("P1").unwrap(),
        status,
        resource_owner: ResourceOwner {
            owner: OWNER.to_string(),
            owner_affiliation: None,
        },
        contributors: vec![Contributor {
            name: None,
            person_id: Some(CONTRIBUTOR.to_string()),
        }],
        instance_type: instance,
        associated_artifacts: vec![AssociatedArtifact::File(file)],
    }
}

/// Requesters that are neither owner nor contributor, without the degree right.
fn outsider_strategy() -> impl Strategy<Value = Requester> {
    (
        prop::option::of("[a-z]{1,10}@example\\.net"),
        any::<bool>(),
    )
        .prop_map(|(user, manage_resources)| {
            let requester = user.map_or_else(Requester::anonymous, |u| Requester::user(&u));
            if manage_resources {
                requester.with_access_right(AccessRight::ManageResources)
            } else {
                requester
            }
        })
}

// Property 1: Embargo Holds
// For any file under active embargo, a requester who is neither owner nor
// contributor and lacks the degree-embargo right SHALL be denied, whatever
// the publication status.
proptest! {
    #[test]
    fn prop_embargo_denies_outsiders(
        status in status_strategy(),
        instance in instance_strategy(),
        file in file_strategy(true),
        requester in outsider_strategy(),
    ) {
        let id = file.identifier;
        let publication = publication_with(status, instance, file);

        prop_assert_eq!(
            decide_at(&requester, &publication, id, now()),
            AccessDecision::Deny(DenyReason::Embargoed)
        );
    }
}

// Property 2: Owner Always Wins
// For any status, variant, and embargo, the owner SHALL be allowed.
proptest! {
    #[test]
    fn prop_owner_always_allowed(
        status in status_strategy(),
        instance in instance_strategy(),
        embargoed in any::<bool>(),
        seed in file_strategy(false),
    ) {
        let mut file = seed;
        if embargoed {
            file.embargo_date = Some(now() + Duration::days(3));
        }
        let id = file.identifier;
        let publication = publication_with(status, instance, file);

        prop_assert!(decide_at(&Requester::user(OWNER), &publication, id, now()).is_allowed());
    }
}

// Property 3: Contributor Always Wins
// A requester whose person-registry id matches a contributor SHALL be allowed.
proptest! {
    #[test]
    fn prop_contributor_always_allowed(
        status in status_strategy(),
        file in any::<bool>().prop_flat_map(file_strategy),
    ) {
        let id = file.identifier;
        let publication = publication_with(status, None, file);
        let requester = Requester::anonymous().with_person_id(CONTRIBUTOR);

        prop_assert!(decide_at(&requester, &publication, id, now()).is_allowed());
    }
}

// Property 4: Anonymous Sees Exactly The Public Files
// Without embargo, an anonymous requester SHALL be allowed iff the publication
// is published, the file is a published file, and it is not under an
// administrative agreement.
proptest! {
    #[test]
    fn prop_anonymous_public_visibility(
        status in status_strategy(),
        file in file_strategy(false),
    ) {
        let expected = status == PublicationStatus::Published
            && file.variant == FileVariant::Published
            && !file.administrative_agreement;
        let id = file.identifier;
        let publication = publication_with(status, None, file);

        prop_assert_eq!(
            decide_at(&Requester::anonymous(), &publication, id, now()).is_allowed(),
            expected
        );
    }
}

// Property 5: Unknown Files Are Never Allowed
// A file identifier absent from the publication SHALL be denied as not found,
// even for the owner.
proptest! {
    #[test]
    fn prop_unknown_file_not_found(
        status in status_strategy(),
        file in file_strategy(false),
    ) {
        let publication = publication_with(status, None, file);
        let other = FileId::from_uuid(Uuid::new_v4());

        prop_assert_eq!(
            decide_at(&Requester::user(OWNER), &publication, other, now()),
            AccessDecision::Deny(DenyReason::FileNotFound)
        );
    }
}
