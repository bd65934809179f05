pub mod audit;
pub mod config;
pub mod friction;
pub mod ownership;
pub mod store;
pub mod triage;
pub mod workflow;

pub mod error;
