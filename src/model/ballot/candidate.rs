use serde::{Deserialize, Serialize};

/// Candidate IDs are the small integers assigned by the roster.
pub type CandidateId = i32;

/// A single candidate standing in the election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The roster the voting authority opens with; fixed for the lifetime
    /// of the service.
    pub fn default_roster() -> Vec<Candidate> {
        vec![
            Candidate::new(1, "Maria Silva"),
            Candidate::new(2, "João Santos"),
            Candidate::new(3, "Ana Costa"),
            Candidate::new(4, "Pedro Oliveira"),
        ]
    }
}
