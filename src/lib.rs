#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate service_test;

use rocket::figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use rocket::{Build, Rocket};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

use config::{BallotFairing, IssuerFairing};
use logging::LoggerFairing;

/// Default port of the registration authority.
pub const REGISTRATION_PORT: u16 = 9093;

/// Default port of the voting authority.
pub const VOTING_PORT: u16 = 9091;

/// Worker tasks handling concurrent requests on each service.
const WORKERS: usize = 10;

/// The registration authority: issues voting credentials.
pub fn registration_rocket() -> Rocket<Build> {
    registration_rocket_from(registration_figment())
}

/// The registration authority over a caller-supplied figment.
pub fn registration_rocket_from(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/", api::registration::routes())
        .attach(LoggerFairing::new("registration-authority"))
        .attach(IssuerFairing)
}

/// The voting authority: lists candidates, accepts votes, reports results.
pub fn voting_rocket() -> Rocket<Build> {
    voting_rocket_from(voting_figment())
}

/// The voting authority over a caller-supplied figment.
pub fn voting_rocket_from(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/", api::voting::routes())
        .attach(LoggerFairing::new("voting-authority"))
        .attach(BallotFairing)
}

/// Configuration sources for the registration service: built-in defaults,
/// overridden by `Registration.toml`, overridden by `REGISTRATION_*`
/// environment variables.
pub fn registration_figment() -> Figment {
    service_figment(REGISTRATION_PORT, "Registration.toml", "REGISTRATION_")
}

/// Configuration sources for the voting service: built-in defaults,
/// overridden by `Voting.toml`, overridden by `VOTING_*` environment
/// variables.
pub fn voting_figment() -> Figment {
    service_figment(VOTING_PORT, "Voting.toml", "VOTING_")
}

fn service_figment(port: u16, toml_file: &str, env_prefix: &str) -> Figment {
    Figment::from(rocket::Config::default())
        .merge(("address", "0.0.0.0"))
        .merge(("port", port))
        .merge(("workers", WORKERS))
        .merge(Toml::file(toml_file).nested())
        .merge(Env::prefixed(env_prefix).global())
}
