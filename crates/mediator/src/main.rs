use clap::Parser;
use mediator::cli::{Cli, Command, DispatchEnvelope};
use mediator::facade::{MediatorFacade, ToolExecutor};
use mediator_core::config::MediatorConfig;
use mediator_core::error::ExitCode;
use mediator_core::logging::init_logging;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::process::ExitCode as ProcessExitCode;

/// The CLI only decides whether a tool call is authorized; the host process
/// that invoked this binary as a hook script is the one that actually runs
/// the tool. A successful, non-blocked dispatch here is reported to the host
/// as an allow decision. It carries no tool result of its own.
struct HookExecutor;

#[async_trait::async_trait]
impl ToolExecutor for HookExecutor {
    async fn execute(&self, _tool_name: &str, _params: &HashMap<String, Value>) -> Value {
        Value::Null
    }
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            return ProcessExitCode::from(ExitCode::InternalError as u8);
        }
    };

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> ProcessExitCode {
    let Command::Dispatch { workspace } = cli.command;

    let mut stdin_raw = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut stdin_raw) {
        eprintln!("failed to read stdin: {e}");
        return ProcessExitCode::from(ExitCode::GeneralError as u8);
    }

    let envelope: DispatchEnvelope = match serde_json::from_str(&stdin_raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            eprintln!("malformed dispatch envelope: {e}");
            return ProcessExitCode::from(ExitCode::GeneralError as u8);
        }
    };

    let workspace_path = workspace
        .or(envelope.workspace_path)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let config = match MediatorConfig::load(&workspace_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ProcessExitCode::from(ExitCode::ConfigError as u8);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("failed to initialize logging: {e}");
        return ProcessExitCode::from(ExitCode::ConfigError as u8);
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("dispatch", tool = %envelope.tool_name, session = %session_id);
    let _entered = span.enter();

    let facade = MediatorFacade::new(config, session_id);
    let executor = HookExecutor;

    match facade
        .dispatch(
            &envelope.tool_name,
            envelope.params,
            &workspace_path,
            envelope.session_intent,
            &executor,
        )
        .await
    {
        Ok(result) => {
            let blocked = result.blocked;
            match serde_json::to_string(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("failed to serialize dispatch result: {e}");
                    return ProcessExitCode::from(ExitCode::GeneralError as u8);
                }
            }
            if blocked {
                ProcessExitCode::from(ExitCode::Blocked as u8)
            } else {
                ProcessExitCode::from(ExitCode::Success as u8)
            }
        }
        Err(e) => {
            eprintln!("dispatch failed: {e}");
            ProcessExitCode::from(ExitCode::from(&e) as u8)
        }
    }
}
