//! Earth-observation planning advisor.
//!
//! Drives a three-step LLM workflow (satellite sensor suite, gap analysis,
//! integrated observation plan) and turns each free-form completion into a
//! typed, fact-checked record.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod workflow;
