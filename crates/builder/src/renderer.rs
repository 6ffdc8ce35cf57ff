//! Seam to the external typesetting engine.

use std::future::Future;
use std::pin::Pin;

use storypress_build_plan::BuildTask;
use storypress_file_store::GameFileStore;

/// Errors raised by the rendering engine.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render failed: {0}")]
    Failed(String),
}

/// What one render pass produced.
#[derive(Debug, Clone, Default)]
pub struct RenderReport {
    /// Names of every file the pass wrote.
    pub generated_files: Vec<String>,
    /// The engine's own log output.
    pub build_log: String,
    /// Set when the engine hit errors but still produced a report.
    pub errored: bool,
    /// Summary statistics of the rendered document.
    pub lead_stats: String,
}

/// Renders a task list into the game's category directories.
///
/// The engine is a black box: it parses the game text, typesets each task
/// in the list, and writes the outputs through the file store handle. It
/// reports failure either as an `Err` (it could not run at all) or as a
/// report with `errored` set (it ran but some builds failed); the
/// orchestrator treats both as a recoverable build error.
pub trait Renderer: Send + Sync {
    fn run_build_list<'a>(
        &'a self,
        text: &'a str,
        tasks: &'a [BuildTask],
        files: &'a GameFileStore,
    ) -> Pin<Box<dyn Future<Output = Result<RenderReport, RenderError>> + Send + 'a>>;
}
