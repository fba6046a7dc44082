//! Command-line surface: a `dispatch` subcommand that reads a JSON envelope
//! from stdin, runs it through the façade, and prints the result to stdout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mediator", version, about = "Tool-call mediation layer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read a dispatch envelope from stdin and print the result to stdout.
    Dispatch {
        /// Workspace root. Defaults to the current directory.
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
}

/// The JSON envelope read from stdin for `mediator dispatch`.
#[derive(Debug, serde::Deserialize)]
pub struct DispatchEnvelope {
    pub tool_name: String,
    #[serde(default)]
    pub params: std::collections::HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub workspace_path: Option<PathBuf>,
    #[serde(default)]
    pub session_intent: Option<String>,
}
