use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display, Formatter};
use std::sync::Mutex;

use super::{Candidate, CandidateId};

/// Credentials pre-registered as spendable at this authority.
const ACCEPTED_CREDENTIALS: [&str; 3] = ["CRED-ABC-123", "CRED-DEF-456", "CRED-GHI-789"];

/// Any credential carrying this prefix is treated as validly issued, even if
/// this authority never saw it handed out; dynamically minted credentials
/// arrive this way.
const ACCEPTED_PREFIX: &str = "CRED-";

/// The in-memory ballot box of the voting authority: the fixed candidate
/// roster, the set of spent credentials, and the running tally.
#[derive(Debug)]
pub struct BallotBox {
    roster: Vec<Candidate>,
    state: Mutex<BallotState>,
}

#[derive(Debug)]
struct BallotState {
    used_credentials: HashSet<String>,
    tally: HashMap<CandidateId, u64>,
}

/// The outcome of a single cast-vote attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was recorded for this candidate.
    Accepted(Candidate),
    /// The vote was refused and nothing was recorded.
    Rejected(RejectReason),
}

impl VoteOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The confirmation or refusal message reported back to the voter.
    pub fn message(&self) -> String {
        match self {
            Self::Accepted(candidate) => format!("Vote successfully cast for {}", candidate.name),
            Self::Rejected(reason) => reason.to_string(),
        }
    }
}

/// Why a vote was refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The credential is neither pre-registered nor well-formed.
    InvalidCredential,
    /// The credential has already been spent.
    CredentialAlreadyUsed,
    /// No candidate with the requested ID is on the roster.
    UnknownCandidate,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredential => write!(f, "Invalid voting credential"),
            Self::CredentialAlreadyUsed => write!(f, "This credential has already been used"),
            Self::UnknownCandidate => write!(f, "Candidate does not exist"),
        }
    }
}

/// A candidate together with their current vote count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTally {
    pub candidate: Candidate,
    pub votes: u64,
}

impl BallotBox {
    /// Open a ballot box over the given roster, with every tally at zero and
    /// no credentials spent.
    pub fn new(roster: Vec<Candidate>) -> Self {
        let tally = roster.iter().map(|candidate| (candidate.id, 0)).collect();
        Self {
            roster,
            state: Mutex::new(BallotState {
                used_credentials: HashSet::new(),
                tally,
            }),
        }
    }

    /// The roster in definition order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.roster
    }

    /// Attempt to spend `credential` on a vote for `candidate_id`.
    ///
    /// Checks run in a fixed order: credential validity, then reuse, then
    /// candidate existence. The first failure wins and leaves the box
    /// untouched. The reuse check and the tally increment share a single
    /// critical section, so two concurrent casts of the same credential can
    /// never both succeed.
    pub fn cast(&self, credential: &str, candidate_id: CandidateId) -> VoteOutcome {
        if !accepted(credential) {
            return VoteOutcome::Rejected(RejectReason::InvalidCredential);
        }

        let mut state = self.state.lock().expect("ballot state lock poisoned");

        if state.used_credentials.contains(credential) {
            return VoteOutcome::Rejected(RejectReason::CredentialAlreadyUsed);
        }

        let candidate = match self.roster.iter().find(|c| c.id == candidate_id) {
            Some(candidate) => candidate,
            None => return VoteOutcome::Rejected(RejectReason::UnknownCandidate),
        };

        state.used_credentials.insert(credential.to_owned());
        *state
            .tally
            .get_mut(&candidate.id)
            .expect("tally entry exists for every roster candidate") += 1;

        VoteOutcome::Accepted(candidate.clone())
    }

    /// Snapshot of the tally in roster order.
    pub fn results(&self) -> Vec<CandidateTally> {
        let state = self.state.lock().expect("ballot state lock poisoned");
        self.roster
            .iter()
            .map(|candidate| CandidateTally {
                candidate: candidate.clone(),
                votes: state.tally.get(&candidate.id).copied().unwrap_or(0),
            })
            .collect()
    }
}

/// Whether this authority recognises `credential` as validly issued:
/// pre-registered values are always spendable, and anything matching the
/// issued prefix is taken on trust.
fn accepted(credential: &str) -> bool {
    ACCEPTED_CREDENTIALS.contains(&credential) || credential.starts_with(ACCEPTED_PREFIX)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn open_box() -> BallotBox {
        BallotBox::new(Candidate::default_roster())
    }

    fn total_votes(ballot_box: &BallotBox) -> u64 {
        ballot_box.results().iter().map(|entry| entry.votes).sum()
    }

    #[test]
    fn pre_registered_credential_casts_one_vote() {
        let ballot_box = open_box();

        let outcome = ballot_box.cast("CRED-ABC-123", 1);
        assert!(outcome.is_accepted());
        assert_eq!("Vote successfully cast for Maria Silva", outcome.message());

        let results = ballot_box.results();
        assert_eq!(1, results[0].votes);
        assert_eq!(1, total_votes(&ballot_box));
    }

    #[test]
    fn reused_credential_is_refused() {
        let ballot_box = open_box();
        assert!(ballot_box.cast("CRED-ABC-123", 1).is_accepted());

        let outcome = ballot_box.cast("CRED-ABC-123", 2);
        assert_eq!(
            VoteOutcome::Rejected(RejectReason::CredentialAlreadyUsed),
            outcome
        );
        assert_eq!("This credential has already been used", outcome.message());
        assert_eq!(1, total_votes(&ballot_box));
    }

    #[test]
    fn malformed_credential_is_refused() {
        let ballot_box = open_box();

        let outcome = ballot_box.cast("INVALID-9F2A", 1);
        assert_eq!(
            VoteOutcome::Rejected(RejectReason::InvalidCredential),
            outcome
        );
        assert_eq!("Invalid voting credential", outcome.message());
        assert_eq!(0, total_votes(&ballot_box));
    }

    #[test]
    fn unknown_candidate_leaves_credential_spendable() {
        let ballot_box = open_box();

        let outcome = ballot_box.cast("CRED-DEF-456", 99);
        assert_eq!(
            VoteOutcome::Rejected(RejectReason::UnknownCandidate),
            outcome
        );
        assert_eq!("Candidate does not exist", outcome.message());

        // The refused attempt must not have consumed the credential.
        assert!(ballot_box.cast("CRED-DEF-456", 2).is_accepted());
    }

    #[test]
    fn unissued_prefixed_credential_is_accepted() {
        let ballot_box = open_box();
        assert!(ballot_box.cast("CRED-942-777", 3).is_accepted());
    }

    #[test]
    fn reuse_is_reported_before_unknown_candidate() {
        let ballot_box = open_box();
        assert!(ballot_box.cast("CRED-GHI-789", 1).is_accepted());

        let outcome = ballot_box.cast("CRED-GHI-789", 99);
        assert_eq!(
            VoteOutcome::Rejected(RejectReason::CredentialAlreadyUsed),
            outcome
        );
    }

    #[test]
    fn tally_equals_the_number_of_accepted_votes() {
        let ballot_box = open_box();
        let attempts = [
            ("CRED-ABC-123", 1),
            ("CRED-ABC-123", 2),
            ("CRED-DEF-456", 99),
            ("CRED-DEF-456", 2),
            ("BOGUS-000", 3),
            ("CRED-100-200", 3),
        ];

        let accepted = attempts
            .iter()
            .filter(|(credential, candidate_id)| {
                ballot_box.cast(credential, *candidate_id).is_accepted()
            })
            .count() as u64;

        assert_eq!(3, accepted);
        assert_eq!(accepted, total_votes(&ballot_box));
    }

    #[test]
    fn reads_do_not_change_state() {
        let ballot_box = open_box();
        assert!(ballot_box.cast("CRED-ABC-123", 4).is_accepted());

        let first = ballot_box.results();
        for _ in 0..3 {
            assert_eq!(first, ballot_box.results());
            assert_eq!(Candidate::default_roster(), ballot_box.candidates());
        }
    }

    #[test]
    fn concurrent_casts_spend_a_credential_exactly_once() {
        let ballot_box = Arc::new(open_box());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ballot_box = Arc::clone(&ballot_box);
                thread::spawn(move || {
                    ballot_box
                        .cast("CRED-ABC-123", (i % 4) + 1)
                        .is_accepted()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|accepted| *accepted)
            .count();

        assert_eq!(1, successes);
        assert_eq!(1, total_votes(&ballot_box));
    }
}
