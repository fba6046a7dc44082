mod intent_map_updater;
mod lesson_recorder;
mod trace_logger;

pub use intent_map_updater::IntentMapUpdater;
pub use lesson_recorder::LessonRecorder;
pub use trace_logger::TraceLogger;
