//! The voting authority's domain state: the candidate roster, the set of
//! spent credentials, and the tally.

mod ballot_box;
mod candidate;

pub use ballot_box::{BallotBox, CandidateTally, RejectReason, VoteOutcome};
pub use candidate::{Candidate, CandidateId};
