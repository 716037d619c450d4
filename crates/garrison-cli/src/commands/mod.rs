//! Subcommand implementations.

pub(crate) mod account;
pub(crate) mod audit;
pub(crate) mod backup;
pub(crate) mod dashboard;
pub(crate) mod reports;
pub(crate) mod review;
