//! Symptom triage facility recommendation server.
//!
//! A web application that answers: "Given where I am and how bad it is,
//! which nearby facility gets me seen soonest?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod registry;
pub mod triage;
pub mod web;
