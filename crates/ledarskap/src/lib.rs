//! Scoring and report rendering core for the functional leadership
//! self-assessment: question bank, per-role answer stores, score
//! aggregation, the deterministic report layout engine with its PDF
//! sink, and the optional workflow-automation callout.

pub mod config;
pub mod error;
pub mod flow;
pub mod report;
pub mod survey;
pub mod telemetry;
