//! Core domain logic for the tool-call mediation layer: the intent policy
//! store, structural fingerprinting, mutation classification, the hook
//! pipeline engine, the audit ledger, and configuration.
//!
//! This crate has no opinion about which host invokes it. See the
//! `mediator` crate for the dispatch façade and CLI binary built on top.

pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod intent;
pub mod logging;
pub mod metrics;
pub mod path;
pub mod pipeline;
pub mod trace;
pub mod vcs;

pub use error::{ErrorContext, ExitCode, MediatorError, Result};
