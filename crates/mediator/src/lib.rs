//! Dispatch façade, concrete hooks, CLI, and XML rendering built on top of
//! `mediator-core`'s pipeline engine, policy store, and fingerprinting.

pub mod cli;
pub mod facade;
pub mod hooks;
pub mod xml;
