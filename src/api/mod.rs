//! Route handlers, one module per authority. The two route sets are mounted
//! by separate rocket instances and never share state.

pub mod registration;
pub mod voting;
