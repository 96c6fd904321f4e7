use rocket::{serde::json::Json, Route, State};

use crate::error::{Error, Result};
use crate::logging::RequestId;
use crate::model::{
    api::credential::{CredentialRequest, CredentialResponse},
    issuer::{CredentialIssuer, Issuance},
};

pub fn routes() -> Vec<Route> {
    routes![issue_credential]
}

/// Issue a voting credential (or a decoy, for the unlucky ineligible share
/// of requests). Repeated requests for the same citizen card number are
/// allowed; every request draws independently.
#[post("/credentials", data = "<request>", format = "json")]
async fn issue_credential(
    request: Json<CredentialRequest>,
    issuer: &State<CredentialIssuer>,
    request_id: &RequestId,
) -> Result<Json<CredentialResponse>> {
    if request.citizen_card_number.is_empty() {
        return Err(Error::BadRequest(
            "citizenCardNumber must not be empty".to_string(),
        ));
    }

    let issuance = issuer.issue();
    match &issuance {
        Issuance::Eligible { credential } => {
            info!(
                "req{request_id} citizen card {} eligible, issued {credential}",
                request.citizen_card_number
            );
        }
        Issuance::Ineligible { .. } => {
            info!(
                "req{request_id} citizen card {} ineligible, returned decoy",
                request.citizen_card_number
            );
        }
    }

    Ok(Json(issuance.into()))
}
