//! Pure engine logic: derivations, ranking, filtering, transitions,
//! routing and statistics.
//!
//! # Responsibility
//! - Keep every operation a synchronous pure function over caller-owned
//!   data; `now` is always an argument, never sampled.
//! - Leave collection ownership to the service layer and hosts.

pub mod duration;
pub mod filter;
pub mod rank;
pub mod routing;
pub mod stats;
pub mod transition;
