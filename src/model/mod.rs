//! Domain and wire-format types for both authorities.

pub mod api;
pub mod ballot;
pub mod issuer;
