//! Credit-decision core for vehicle financing: blacklist screening, credit-bureau
//! interpretation, cluster resolution, LTV/tenor elaboration and approval stepping.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
