use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{
    ballot::{BallotBox, Candidate},
    issuer::CredentialIssuer,
};

/// Credential-issuer configuration, derived from `Registration.toml` and
/// `REGISTRATION_*` environment variables. Every field has a default, so the
/// service also runs with no configuration at all.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuerConfig {
    /// Probability in `[0, 1]` that a request is deemed eligible.
    #[serde(default = "default_eligibility_probability")]
    pub eligibility_probability: f64,
    /// Pre-registered credentials handed out before any are minted.
    #[serde(default = "default_credential_pool")]
    pub credential_pool: Vec<String>,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            eligibility_probability: default_eligibility_probability(),
            credential_pool: default_credential_pool(),
        }
    }
}

fn default_eligibility_probability() -> f64 {
    0.7
}

fn default_credential_pool() -> Vec<String> {
    ["CRED-ABC-123", "CRED-DEF-456", "CRED-GHI-789"]
        .map(String::from)
        .to_vec()
}

/// A fairing that loads the issuer config, validates it, and puts a ready
/// [`CredentialIssuer`] into managed state.
pub struct IssuerFairing;

#[rocket::async_trait]
impl Fairing for IssuerFairing {
    fn info(&self) -> Info {
        Info {
            name: "Credential Issuer",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<IssuerConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load issuer config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Refuse to launch with a nonsensical eligibility weighting.
        if !(0.0..=1.0).contains(&config.eligibility_probability) {
            error!(
                "eligibility_probability must lie in [0, 1], got {}",
                config.eligibility_probability
            );
            return Err(rocket);
        }
        info!(
            "Issuing with eligibility probability {} from a pool of {} credentials",
            config.eligibility_probability,
            config.credential_pool.len()
        );

        // Manage the state.
        rocket = rocket.manage(CredentialIssuer::new(config));
        Ok(rocket)
    }
}

/// A fairing that opens the ballot box over the fixed candidate roster and
/// puts it into managed state.
pub struct BallotFairing;

#[rocket::async_trait]
impl Fairing for BallotFairing {
    fn info(&self) -> Info {
        Info {
            name: "Ballot Box",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let ballot_box = BallotBox::new(Candidate::default_roster());
        info!(
            "Ballot box open with {} candidates",
            ballot_box.candidates().len()
        );

        // Manage the state.
        rocket = rocket.manage(ballot_box);
        Ok(rocket)
    }
}
