use rocket::{serde::json::Json, Route, State};

use crate::logging::RequestId;
use crate::model::{
    api::vote::{
        CandidateList, CandidateResult, CandidateSummary, VoteRequest, VoteResponse, VoteResults,
    },
    ballot::{BallotBox, VoteOutcome},
};

pub fn routes() -> Vec<Route> {
    routes![list_candidates, cast_vote, get_results]
}

/// The candidate roster, in the order it was defined.
#[get("/candidates")]
async fn list_candidates(ballot_box: &State<BallotBox>) -> Json<CandidateList> {
    let candidates = ballot_box
        .candidates()
        .iter()
        .cloned()
        .map(CandidateSummary::from)
        .collect();
    Json(CandidateList { candidates })
}

/// Cast a vote. Refusals (bad credential, reuse, unknown candidate) are
/// reported in-band with `success = false`, never as HTTP errors.
#[post("/votes", data = "<request>", format = "json")]
async fn cast_vote(
    request: Json<VoteRequest>,
    ballot_box: &State<BallotBox>,
    request_id: &RequestId,
) -> Json<VoteResponse> {
    let outcome = ballot_box.cast(&request.voting_credential, request.candidate_id);
    match &outcome {
        VoteOutcome::Accepted(candidate) => {
            info!("req{request_id} vote recorded for {}", candidate.name);
        }
        VoteOutcome::Rejected(reason) => {
            info!("req{request_id} vote refused: {reason}");
        }
    }

    Json(outcome.into())
}

/// Snapshot of the running tally, in roster order.
#[get("/results")]
async fn get_results(ballot_box: &State<BallotBox>) -> Json<VoteResults> {
    let results = ballot_box
        .results()
        .into_iter()
        .map(CandidateResult::from)
        .collect();
    Json(VoteResults { results })
}
