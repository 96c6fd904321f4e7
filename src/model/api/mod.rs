//! API-compatible types.
//!
//! The types in this module are serialised exactly as callers see them on
//! the wire (camelCase keys), and convert from the domain types.

pub mod credential;
pub mod vote;
