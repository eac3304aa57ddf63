//! Skill-to-requirement matching and anti-hallucination verification.
//!
//! `matching` scores a candidate profile against a job's extracted keywords;
//! `grounding` audits AI-rewritten text against the profile's verified facts.
//! The remaining modules are the HTTP service wrapped around both.

pub mod config;
pub mod errors;
pub mod grounding;
pub mod llm_client;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
