//! HTTP gateway for match-score (used by the `match-score` binary and tests).

pub mod gateway;
