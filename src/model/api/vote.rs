use serde::{Deserialize, Serialize};

use crate::model::ballot::{Candidate, CandidateId, CandidateTally, VoteOutcome};

/// A candidate as listed to voters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: CandidateId,
    pub name: String,
}

impl From<Candidate> for CandidateSummary {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
        }
    }
}

/// The full roster in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateList {
    pub candidates: Vec<CandidateSummary>,
}

/// A single cast-vote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub voting_credential: String,
    pub candidate_id: CandidateId,
}

/// Whether a vote was recorded. Refusals travel here with `success = false`;
/// they are never transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
}

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            success: outcome.is_accepted(),
            message: outcome.message(),
        }
    }
}

/// A candidate with their current vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub id: CandidateId,
    pub name: String,
    pub votes: u64,
}

impl From<CandidateTally> for CandidateResult {
    fn from(tally: CandidateTally) -> Self {
        Self {
            id: tally.candidate.id,
            name: tally.candidate.name,
            votes: tally.votes,
        }
    }
}

/// Tally snapshot in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResults {
    pub results: Vec<CandidateResult>,
}
