//! Build task descriptors.
//!
//! Descriptors are ephemeral: created fresh on every plan expansion,
//! consumed by one render pass, never persisted.

use serde::Serialize;

use storypress_model::{BuildCategory, Layout, PaperSize};

use crate::tables;

/// How a single PDF is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// The ordinary reader-facing document.
    Normal,
    /// Annotated with author-debugging information.
    Debug,
    /// The condensed lead-summary document.
    Summary,
}

/// One concrete job for the renderer: either render a document or zip the
/// category's finished output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "variant")]
pub enum BuildTask {
    #[serde(rename = "render")]
    Render(RenderTask),
    #[serde(rename = "zip")]
    Zip(ZipTask),
}

impl BuildTask {
    pub fn label(&self) -> &str {
        match self {
            BuildTask::Render(t) => &t.label,
            BuildTask::Zip(t) => &t.label,
        }
    }

    /// The category the task's output lands in.
    pub fn category(&self) -> BuildCategory {
        match self {
            BuildTask::Render(t) => t.category,
            BuildTask::Zip(t) => t.category,
        }
    }

    pub fn is_zip(&self) -> bool {
        matches!(self, BuildTask::Zip(_))
    }

    pub fn as_render(&self) -> Option<&RenderTask> {
        match self {
            BuildTask::Render(t) => Some(t),
            BuildTask::Zip(_) => None,
        }
    }
}

/// A single document render, with all the derived typesetting fields
/// precomputed from the lookup tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTask {
    pub label: String,
    pub game_name: String,
    pub category: BuildCategory,
    pub kind: RenderKind,
    pub paper_size: PaperSize,
    pub layout: Layout,
    pub font_size: String,
    pub paper_code: String,
    pub double_sided: bool,
    pub columns: u32,
    pub solo: bool,
    /// Appended to the game name in the output filename.
    pub suffix: String,
}

impl RenderTask {
    /// Builds a render task, deriving every computed field from the tables.
    pub fn new(
        label: impl Into<String>,
        game_name: impl Into<String>,
        category: BuildCategory,
        kind: RenderKind,
        paper_size: PaperSize,
        layout: Layout,
    ) -> RenderTask {
        RenderTask {
            label: label.into(),
            game_name: game_name.into(),
            category,
            kind,
            paper_size,
            layout,
            font_size: tables::font_size_for(paper_size).to_string(),
            paper_code: tables::paper_code_for(paper_size).to_string(),
            double_sided: tables::double_sided_for(layout),
            columns: tables::columns_for(layout),
            solo: tables::solo_for(layout),
            suffix: suffix_for(kind, layout, paper_size),
        }
    }

    /// Overrides the derived font size (used by the large-font variant).
    pub fn with_font_size(mut self, font_size: impl Into<String>) -> RenderTask {
        self.font_size = font_size.into();
        self
    }

    /// Overrides the derived filename suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> RenderTask {
        self.suffix = suffix.into();
        self
    }

    /// The output filename for this render (always a PDF).
    pub fn output_file_name(&self) -> String {
        format!("{}{}.pdf", self.game_name, self.suffix)
    }
}

/// Aggregates a category's finished files into one archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipTask {
    pub label: String,
    pub category: BuildCategory,
}

impl ZipTask {
    pub fn new(category: BuildCategory) -> ZipTask {
        ZipTask {
            label: "zipping built files".to_string(),
            category,
        }
    }
}

/// Filename suffix for a render kind.
///
/// Normal renders encode layout and paper size, debug renders prefix a
/// marker, summaries are format-independent.
fn suffix_for(kind: RenderKind, layout: Layout, paper: PaperSize) -> String {
    match kind {
        RenderKind::Normal => format!("_{}_{}", layout.code(), paper.code()),
        RenderKind::Debug => format!("_debug_{}_{}", layout.code(), paper.code()),
        RenderKind::Summary => "_summary".to_string(),
    }
}
