//! Appends a dated note to `CLAUDE.md` whenever a write evolves the exported
//! surface of a file under an active intent.

use async_trait::async_trait;
use chrono::Utc;
use mediator_core::error::Result;
use mediator_core::fingerprint::MutationClass;
use mediator_core::pipeline::{PostHook, ToolContext};
use std::io::Write as _;
use std::path::PathBuf;

const HEADER: &str = "# Lessons\n\nNotes the mediator appends when a write changes a file's exported surface.\n\n";

pub struct LessonRecorder {
    lessons_file: PathBuf,
}

impl LessonRecorder {
    pub fn new(lessons_file: PathBuf) -> Self {
        Self { lessons_file }
    }
}

#[async_trait]
impl PostHook for LessonRecorder {
    fn name(&self) -> &'static str {
        "lesson_recorder"
    }

    async fn run(&self, ctx: &mut ToolContext) -> Result<()> {
        let Some(MutationClass::IntentEvolution) = ctx.mutation_class else {
            return Ok(());
        };
        let Some(intent_id) = ctx.intent_id.clone() else {
            return Ok(());
        };

        let path = ctx.workspace_path.join(&self.lessons_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !path.is_file() {
            std::fs::write(&path, HEADER)?;
        }

        let mut file = std::fs::OpenOptions::new().append(true).open(&path)?;

        writeln!(
            file,
            "## {} - intent {intent_id}\n\nTool `{}` changed the exported surface of this file.\n",
            Utc::now().to_rfc3339(),
            ctx.tool_name,
        )?;

        Ok(())
    }
}
