//! Access decision engine.
//!
//! Decides whether a requester may obtain a download link for one file of a
//! publication. Pure computation: no I/O, no clock reads beyond `decide`'s
//! call to `Utc::now()`.
//!
//! Every denial is reported to clients as "not found", so the existence of
//! embargoed or private files is never confirmed to outsiders.

mod decision;
mod requester;

#[cfg(test)]
mod decision_props;

pub use decision::{AccessDecision, DenyReason, decide, decide_at, locate_file};
pub use requester::Requester;
