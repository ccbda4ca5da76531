//! Publication data model.
//!
//! Publications and their file artifacts are read-only projections fetched
//! from the metadata service per request; nothing here is persisted.

mod document;
mod error;
mod source;
mod types;

pub use document::{PublicationDocument, parse_publication};
pub use error::PublicationError;
pub use source::PublicationSource;
pub use types::{
    AssociatedArtifact, AssociatedLink, Contributor, File, FileVariant, Publication,
    PublicationStatus, ResourceOwner, THESIS_INSTANCE_TYPES, UserIdentifier,
};
