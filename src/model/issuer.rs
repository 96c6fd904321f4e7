use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::IssuerConfig;

/// Prefix carried by every credential this authority issues or mints.
pub const ISSUED_PREFIX: &str = "CRED-";

/// Prefix carried by the decoy tokens handed to ineligible citizens.
pub const DECOY_PREFIX: &str = "INVALID-";

/// The registration authority's credential issuer: a finite pool of
/// pre-registered credentials, a weighted eligibility draw, and a mint for
/// when the pool runs dry.
#[derive(Debug)]
pub struct CredentialIssuer {
    eligibility_probability: f64,
    state: Mutex<IssuerState>,
}

#[derive(Debug)]
struct IssuerState {
    /// Pool credentials not yet handed out.
    pool: Vec<String>,
    rng: StdRng,
}

/// The outcome of one issuance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issuance {
    /// The citizen was deemed eligible; the credential is spendable at the
    /// voting authority.
    Eligible { credential: String },
    /// The citizen was deemed ineligible; the token is a decoy no voting
    /// authority accepts.
    Ineligible { credential: String },
}

impl Issuance {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }

    pub fn credential(&self) -> &str {
        match self {
            Self::Eligible { credential } | Self::Ineligible { credential } => credential,
        }
    }
}

impl CredentialIssuer {
    /// Build an issuer from its configuration, seeding the randomness from
    /// the operating system.
    pub fn new(config: IssuerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build an issuer with a caller-supplied random source. Tests seed this
    /// to make the eligibility draw reproducible.
    pub fn with_rng(config: IssuerConfig, rng: StdRng) -> Self {
        Self {
            eligibility_probability: config.eligibility_probability,
            state: Mutex::new(IssuerState {
                pool: config.credential_pool,
                rng,
            }),
        }
    }

    /// Serve one issuance request.
    ///
    /// With the configured probability the citizen is eligible and receives a
    /// pooled credential, or a freshly minted one once the pool is exhausted.
    /// Otherwise they receive a decoy token. The draw, the pool pick and its
    /// removal share a single critical section, so the same pooled credential
    /// is never issued twice.
    pub fn issue(&self) -> Issuance {
        let mut state = self.state.lock().expect("issuer state lock poisoned");
        let IssuerState { pool, rng } = &mut *state;

        if rng.gen::<f64>() < self.eligibility_probability {
            let credential = if pool.is_empty() {
                mint_credential(rng)
            } else {
                let index = rng.gen_range(0..pool.len());
                pool.swap_remove(index)
            };
            Issuance::Eligible { credential }
        } else {
            Issuance::Ineligible {
                credential: decoy_token(rng),
            }
        }
    }

    /// Number of pooled credentials not yet handed out.
    pub fn remaining_pool(&self) -> usize {
        self.state
            .lock()
            .expect("issuer state lock poisoned")
            .pool
            .len()
    }
}

/// Mint a well-formed credential: the issued prefix plus two random
/// three-digit groups.
fn mint_credential(rng: &mut StdRng) -> String {
    format!(
        "{}{}-{}",
        ISSUED_PREFIX,
        rng.gen_range(100..=999),
        rng.gen_range(100..=999)
    )
}

/// A decoy token that fails the voting authority's acceptance rule.
fn decoy_token(rng: &mut StdRng) -> String {
    format!("{}{:04X}", DECOY_PREFIX, rng.gen_range(1000..=9999))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use crate::model::ballot::{BallotBox, Candidate};

    use super::*;

    fn config(eligibility_probability: f64) -> IssuerConfig {
        IssuerConfig {
            eligibility_probability,
            ..IssuerConfig::default()
        }
    }

    fn seeded(eligibility_probability: f64, seed: u64) -> CredentialIssuer {
        CredentialIssuer::with_rng(config(eligibility_probability), StdRng::seed_from_u64(seed))
    }

    fn assert_minted_format(credential: &str) {
        let suffix = credential.strip_prefix(ISSUED_PREFIX).unwrap();
        let groups: Vec<_> = suffix.split('-').collect();
        assert_eq!(2, groups.len());
        for group in groups {
            assert_eq!(3, group.len());
            assert!(group.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn eligible_draws_exhaust_the_pool_before_minting() {
        let issuer = seeded(1.0, 7);

        let mut issued = HashSet::new();
        for _ in 0..3 {
            let issuance = issuer.issue();
            assert!(issuance.is_eligible());
            assert!(
                issued.insert(issuance.credential().to_owned()),
                "pooled credential issued twice"
            );
        }
        assert_eq!(0, issuer.remaining_pool());

        let pool: HashSet<_> = IssuerConfig::default().credential_pool.into_iter().collect();
        assert_eq!(pool, issued);

        // The pool is dry, so the next draw mints a fresh token.
        let minted = issuer.issue();
        assert!(minted.is_eligible());
        assert_minted_format(minted.credential());
    }

    #[test]
    fn ineligible_draws_return_decoys_the_ballot_box_rejects() {
        let issuer = seeded(0.0, 7);
        let ballot_box = BallotBox::new(Candidate::default_roster());

        for _ in 0..5 {
            let issuance = issuer.issue();
            assert!(!issuance.is_eligible());

            let suffix = issuance.credential().strip_prefix(DECOY_PREFIX).unwrap();
            assert_eq!(4, suffix.len());
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

            assert!(!ballot_box.cast(issuance.credential(), 1).is_accepted());
        }

        // Decoys never touch the pool.
        assert_eq!(3, issuer.remaining_pool());
    }

    #[test]
    fn the_same_seed_yields_the_same_sequence() {
        let first = seeded(0.7, 42);
        let second = seeded(0.7, 42);

        for _ in 0..20 {
            assert_eq!(first.issue(), second.issue());
        }
    }

    #[test]
    fn concurrent_issuance_never_hands_out_a_pooled_credential_twice() {
        let issuer = Arc::new(CredentialIssuer::new(config(1.0)));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let issuer = Arc::clone(&issuer);
                thread::spawn(move || issuer.issue().credential().to_owned())
            })
            .collect();
        let issued: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        for pooled in IssuerConfig::default().credential_pool {
            assert!(issued.iter().filter(|credential| **credential == pooled).count() <= 1);
        }
        assert_eq!(0, issuer.remaining_pool());
    }
}
