//! Expansion of a build mode into the concrete task list.

use storypress_model::{BuildMode, Layout, PaperSize};

use crate::tables;
use crate::task::{BuildTask, RenderKind, RenderTask, ZipTask};

/// The slice of game state plan expansion needs.
///
/// Deliberately not the entity itself: the expander has no business with
/// persistence types.
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    /// Public game name, used in output filenames and labels.
    pub game_name: &'a str,
    /// The author's preferred paper size.
    pub paper_size: PaperSize,
    /// The author's preferred layout.
    pub layout: Layout,
}

/// Expands a build mode into its ordered task list.
///
/// Preferred and debug modes produce one render plus one zip task in the
/// game's preferred format. Draft mode produces the full paper-size x
/// layout cross-product (combinations whose layout wants more columns than
/// the paper allows are skipped), a large-font custom render, a summary
/// render, and a zip task.
pub fn expand(request: &PlanRequest<'_>, mode: BuildMode) -> Vec<BuildTask> {
    let category = mode.category();
    match mode {
        BuildMode::Preferred => vec![
            BuildTask::Render(RenderTask::new(
                "preferred format build",
                request.game_name,
                category,
                RenderKind::Normal,
                request.paper_size,
                request.layout,
            )),
            BuildTask::Zip(ZipTask::new(category)),
        ],
        BuildMode::Debug => vec![
            BuildTask::Render(RenderTask::new(
                "debug build",
                request.game_name,
                category,
                RenderKind::Debug,
                request.paper_size,
                request.layout,
            )),
            BuildTask::Zip(ZipTask::new(category)),
        ],
        BuildMode::Draft => expand_draft(request),
    }
}

fn expand_draft(request: &PlanRequest<'_>) -> Vec<BuildTask> {
    let category = BuildMode::Draft.category();
    let game_name = request.game_name;

    // Total render count up front, so labels can say "n of m".
    let combos: Vec<(PaperSize, Layout)> = PaperSize::all()
        .into_iter()
        .flat_map(|paper| Layout::all().into_iter().map(move |layout| (paper, layout)))
        .filter(|(paper, layout)| tables::columns_for(*layout) <= tables::max_columns_for(*paper))
        .collect();
    let build_count = combos.len() + 2; // custom large-font + summary

    let mut tasks = Vec::with_capacity(build_count + 1);
    let mut index = 0usize;

    // Large-font custom render for print-at-home solo play. The suffix is
    // a fixed historical token; published filenames depend on it.
    index += 1;
    tasks.push(BuildTask::Render(
        RenderTask::new(
            "SOLOPRN_LETTER_LargeFont",
            game_name,
            category,
            RenderKind::Normal,
            PaperSize::Letter,
            Layout::SoloScreen,
        )
        .with_font_size("16pt")
        .with_suffix("_SOLOPRN_LETTER_LargeFont"),
    ));

    // Every viable paper-size x layout combination.
    for (paper, layout) in combos {
        index += 1;
        let label = format!("complete build {index} of {build_count} ({layout} x {paper})");
        tasks.push(BuildTask::Render(RenderTask::new(
            label,
            game_name,
            category,
            RenderKind::Normal,
            paper,
            layout,
        )));
    }

    // Condensed summary, always letter solo.
    index += 1;
    let label = format!("complete build {index} of {build_count} (summary)");
    tasks.push(BuildTask::Render(RenderTask::new(
        label,
        game_name,
        category,
        RenderKind::Summary,
        PaperSize::Letter,
        Layout::SoloScreen,
    )));

    tasks.push(BuildTask::Zip(ZipTask::new(category)));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use storypress_model::BuildCategory;

    fn request() -> PlanRequest<'static> {
        PlanRequest {
            game_name: "mystery",
            paper_size: PaperSize::Letter,
            layout: Layout::SoloScreen,
        }
    }

    #[test]
    fn preferred_mode_is_one_render_plus_zip() {
        let tasks = expand(&request(), BuildMode::Preferred);
        assert_eq!(tasks.len(), 2);

        let render = tasks[0].as_render().unwrap();
        assert_eq!(render.kind, RenderKind::Normal);
        assert_eq!(render.suffix, "_SOLOSCR_LETTER");
        assert_eq!(render.font_size, "10pt");
        assert_eq!(render.category, BuildCategory::PreferredBuild);

        assert!(tasks[1].is_zip());
        assert_eq!(tasks[1].category(), BuildCategory::PreferredBuild);
    }

    #[test]
    fn preferred_mode_respects_game_format() {
        let req = PlanRequest {
            game_name: "mystery",
            paper_size: PaperSize::B5,
            layout: Layout::TwoColumn,
        };
        let tasks = expand(&req, BuildMode::Preferred);
        let render = tasks[0].as_render().unwrap();
        assert_eq!(render.paper_size, PaperSize::B5);
        assert_eq!(render.layout, Layout::TwoColumn);
        assert_eq!(render.font_size, "8pt");
        assert_eq!(render.columns, 2);
    }

    #[test]
    fn debug_mode_is_one_debug_render_plus_zip() {
        let tasks = expand(&request(), BuildMode::Debug);
        assert_eq!(tasks.len(), 2);

        let render = tasks[0].as_render().unwrap();
        assert_eq!(render.kind, RenderKind::Debug);
        assert_eq!(render.suffix, "_debug_SOLOSCR_LETTER");
        assert_eq!(render.category, BuildCategory::DebugBuild);
        assert!(tasks[1].is_zip());
    }

    #[test]
    fn draft_mode_covers_the_viable_cross_product() {
        let tasks = expand(&request(), BuildMode::Draft);

        // 4 papers x 4 layouts = 16, minus A5+TWOCOL (columns 2 > max 1),
        // plus large-font custom, plus summary, plus one zip.
        let renders: Vec<_> = tasks.iter().filter_map(|t| t.as_render()).collect();
        assert_eq!(renders.len(), 15 + 2);
        assert_eq!(tasks.len(), renders.len() + 1);

        // Every render lands in the draft category.
        assert!(tasks.iter().all(|t| t.category() == BuildCategory::DraftBuild));

        // The infeasible combination is absent.
        assert!(!renders.iter().any(|r| {
            r.paper_size == PaperSize::A5 && r.layout == Layout::TwoColumn
        }));
        // A feasible narrow combination is present.
        assert!(renders.iter().any(|r| {
            r.paper_size == PaperSize::A5 && r.layout == Layout::OneColumn
        }));
    }

    #[test]
    fn draft_mode_ordering_and_specials() {
        let tasks = expand(&request(), BuildMode::Draft);

        // Custom large-font first.
        let first = tasks[0].as_render().unwrap();
        assert_eq!(first.suffix, "_SOLOPRN_LETTER_LargeFont");
        assert_eq!(first.font_size, "16pt");

        // Summary second to last, zip last.
        let summary = tasks[tasks.len() - 2].as_render().unwrap();
        assert_eq!(summary.kind, RenderKind::Summary);
        assert_eq!(summary.suffix, "_summary");
        assert!(tasks[tasks.len() - 1].is_zip());
    }

    #[test]
    fn draft_labels_count_n_of_m() {
        let tasks = expand(&request(), BuildMode::Draft);
        let second = tasks[1].as_render().unwrap();
        assert_eq!(second.label, "complete build 2 of 17 (SOLOSCR x LETTER)");
        let summary = tasks[tasks.len() - 2].as_render().unwrap();
        assert_eq!(summary.label, "complete build 17 of 17 (summary)");
    }

    #[test]
    fn draft_ignores_preferred_format() {
        let req = PlanRequest {
            game_name: "mystery",
            paper_size: PaperSize::A5,
            layout: Layout::OneColumn,
        };
        // Same shape regardless of the author's preferred format.
        assert_eq!(expand(&req, BuildMode::Draft).len(), expand(&request(), BuildMode::Draft).len());
    }
}
