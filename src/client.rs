//! HTTP clients for the two authority services.
//!
//! A refusal from the voting authority (`success == false`) is an ordinary
//! `Ok` value. [`ClientError`] is reserved for transport failures and
//! non-success HTTP statuses, so callers can always tell "the service said
//! no" apart from "the service could not be reached".

use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::api::{
    credential::{CredentialRequest, CredentialResponse},
    vote::{CandidateList, CandidateResult, CandidateSummary, VoteRequest, VoteResponse, VoteResults},
};
use crate::model::ballot::CandidateId;
use crate::{REGISTRATION_PORT, VOTING_PORT};

/// Errors surfaced by the service clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service could not be reached, or the connection failed mid-request.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status, e.g. input validation.
    #[error("service answered {status}: {message}")]
    Api { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Client for the registration authority.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    http: HttpClient,
    base_url: String,
}

impl RegistrationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Request a voting credential for the given citizen card number.
    pub async fn issue_credential(
        &self,
        citizen_card_number: &str,
    ) -> ClientResult<CredentialResponse> {
        let request = CredentialRequest {
            citizen_card_number: citizen_card_number.to_owned(),
        };
        let response = self
            .http
            .post(format!("{}/credentials", self.base_url))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }
}

impl Default for RegistrationClient {
    /// Client against a local registration authority on its default port.
    fn default() -> Self {
        Self::new(format!("http://127.0.0.1:{REGISTRATION_PORT}"))
    }
}

/// Client for the voting authority.
#[derive(Debug, Clone)]
pub struct VotingClient {
    http: HttpClient,
    base_url: String,
}

impl VotingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// The candidate roster in definition order.
    pub async fn candidates(&self) -> ClientResult<Vec<CandidateSummary>> {
        let response = self
            .http
            .get(format!("{}/candidates", self.base_url))
            .send()
            .await?;
        let list: CandidateList = decode(response).await?;
        Ok(list.candidates)
    }

    /// Cast a vote. A refusal comes back as `Ok` with `success == false`;
    /// branch on the flag, not on the error.
    pub async fn cast_vote(
        &self,
        voting_credential: &str,
        candidate_id: CandidateId,
    ) -> ClientResult<VoteResponse> {
        let request = VoteRequest {
            voting_credential: voting_credential.to_owned(),
            candidate_id,
        };
        let response = self
            .http
            .post(format!("{}/votes", self.base_url))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// Snapshot of the current tally in roster order.
    pub async fn results(&self) -> ClientResult<Vec<CandidateResult>> {
        let response = self
            .http
            .get(format!("{}/results", self.base_url))
            .send()
            .await?;
        let results: VoteResults = decode(response).await?;
        Ok(results.results)
    }
}

impl Default for VotingClient {
    /// Client against a local voting authority on its default port.
    fn default() -> Self {
        Self::new(format!("http://127.0.0.1:{VOTING_PORT}"))
    }
}

/// Decode a JSON body, turning non-success statuses into [`ClientError::Api`]
/// with whatever body text the service sent.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, message });
    }
    Ok(response.json().await?)
}
