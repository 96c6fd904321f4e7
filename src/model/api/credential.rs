use serde::{Deserialize, Serialize};

use crate::model::issuer::Issuance;

/// Request for a voting credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    /// The requesting citizen's card number; any non-empty string.
    pub citizen_card_number: String,
}

/// Answer to a credential request. Ineligible citizens get an answer of the
/// same shape, just with a decoy token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    /// Whether the citizen may vote with the returned credential.
    pub is_eligible: bool,
    /// The issued credential, or a decoy token when ineligible.
    pub voting_credential: String,
}

impl From<Issuance> for CredentialResponse {
    fn from(issuance: Issuance) -> Self {
        let is_eligible = issuance.is_eligible();
        let voting_credential = match issuance {
            Issuance::Eligible { credential } | Issuance::Ineligible { credential } => credential,
        };
        Self {
            is_eligible,
            voting_credential,
        }
    }
}
