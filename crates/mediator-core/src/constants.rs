//! Shared constants: tool classifications and well-known filesystem paths.

/// Tools that only read state or manage conversational/planning flow, and so
/// bypass intent and scope enforcement entirely.
pub const READ_ONLY_TOOLS: &[&str] = &[
    "read_file",
    "list_files",
    "list_directory",
    "search_files",
    "get_file_info",
    "codebase_search",
    "read_command_output",
    "select_active_intent",
    "attempt_completion",
    "ask_followup_question",
    "switch_mode",
    "use_mcp_tool",
    "access_mcp_resource",
    "run_slash_command",
    "skill",
    "update_todo_list",
    "new_task",
];

/// Tools that require a declared intent before they may run.
pub const DESTRUCTIVE_TOOLS: &[&str] = &[
    "write_file",
    "write_to_file",
    "create_file",
    "apply_diff",
    "apply_patch",
    "edit",
    "search_and_replace",
    "search_replace",
    "edit_file",
    "insert_code_block",
    "replace_in_file",
    "delete_file",
    "execute_command",
    "run_terminal_command",
    "generate_image",
];

/// The subset of the destructive set that actually writes file content, and
/// is therefore subject to the lock guard and the trace logger. Excludes
/// the three destructive tools that don't touch a single target file.
pub const WRITE_TOOLS: &[&str] = &[
    "write_file",
    "write_to_file",
    "create_file",
    "apply_diff",
    "apply_patch",
    "edit",
    "search_and_replace",
    "search_replace",
    "edit_file",
    "insert_code_block",
    "replace_in_file",
    "delete_file",
];

/// Parameter names, in priority order, used to extract a target file path
/// out of a tool call's parameter map.
pub const PATH_PARAMETER_NAMES: &[&str] = &["path", "file_path", "target_file", "destination"];

/// Returns true if `tool_name` never requires an intent or scope check.
pub fn is_read_only(tool_name: &str) -> bool {
    READ_ONLY_TOOLS.contains(&tool_name)
}

/// Returns true if `tool_name` is in the destructive set (requires a
/// declared intent to run at all).
pub fn is_destructive(tool_name: &str) -> bool {
    DESTRUCTIVE_TOOLS.contains(&tool_name)
}

/// Returns true if `tool_name` is in the write subset (subject to the lock
/// guard and the trace logger).
pub fn is_write_tool(tool_name: &str) -> bool {
    WRITE_TOOLS.contains(&tool_name)
}

pub mod paths {
    /// Directory holding all mediator-managed state, relative to the workspace root.
    pub const ORCHESTRATION_DIR: &str = ".orchestration";

    pub const DEFAULT_INTENT_FILE: &str = ".orchestration/active_intents.yaml";
    pub const DEFAULT_IGNORE_FILE: &str = ".intentignore";
    pub const DEFAULT_TRACE_FILE: &str = ".orchestration/agent_trace.jsonl";
    pub const DEFAULT_INTENT_MAP_FILE: &str = ".orchestration/INTENT_MAP.md";
    pub const DEFAULT_LESSONS_FILE: &str = "CLAUDE.md";
    pub const DEFAULT_CONFIG_FILE: &str = ".orchestration/mediator.json";
}
