fn main() {
    println!("Run `cargo test -p build-flow` to execute end-to-end build flow tests.");
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::time::Duration;

    use storypress_build_plan::BuildTask;
    use storypress_builder::{BuildService, JobRunner, RenderError, RenderReport, Renderer};
    use storypress_file_store::{FileLayout, GameFileStore};
    use storypress_model::{BuildCategory, Game, GameStore, MemoryStore, QueueStatus};
    use storypress_queue::{InlineQueue, JobExecutor, WorkerQueue};

    /// Renders each task by writing a stub PDF, plus one zip per zip task.
    struct StubRenderer;

    impl Renderer for StubRenderer {
        fn run_build_list<'a>(
            &'a self,
            _text: &'a str,
            tasks: &'a [BuildTask],
            files: &'a GameFileStore,
        ) -> Pin<Box<dyn Future<Output = Result<RenderReport, RenderError>> + Send + 'a>> {
            Box::pin(async move {
                let game_name = tasks
                    .iter()
                    .find_map(|t| t.as_render())
                    .map(|r| r.game_name.clone())
                    .unwrap_or_else(|| "game".into());
                let mut generated = Vec::new();
                for task in tasks {
                    let name = match task.as_render() {
                        Some(render) => render.output_file_name(),
                        None => format!("{game_name}_{}.zip", task.category()),
                    };
                    std::fs::write(files.dir_path(task.category()).join(&name), b"artifact")?;
                    generated.push(name);
                }
                Ok(RenderReport {
                    generated_files: generated,
                    build_log: "all builds finished".into(),
                    errored: false,
                    lead_stats: "214 leads, 31k words".into(),
                })
            })
        }
    }

    fn seeded_game() -> Game {
        let mut game = Game::new("mystery", "Chapter one.\nChapter two.");
        game.game_name = "mystery".into();
        game.version = "2.0".into();
        game.version_date = "2026-08-01".into();
        game.refresh_text_hash("hl-2.0");
        game
    }

    fn media_layout(dir: &tempfile::TempDir) -> FileLayout {
        FileLayout::new(dir.path(), "https://storypress.example/media")
    }

    fn inline_service(store: Arc<MemoryStore>, dir: &tempfile::TempDir) -> BuildService {
        let runner = Arc::new(JobRunner::new(
            store.clone(),
            Arc::new(StubRenderer),
            media_layout(dir),
        ));
        let queue = Arc::new(InlineQueue::new(runner as Arc<dyn JobExecutor>));
        BuildService::new(store, queue, media_layout(dir))
    }

    async fn wait_for_terminal(
        store: &MemoryStore,
        id: uuid::Uuid,
        category: BuildCategory,
    ) -> Game {
        for _ in 0..100 {
            let game = store.load(id).await.unwrap();
            if game
                .build_results
                .get(category)
                .is_some_and(|r| r.queue_status.is_terminal())
            {
                return game;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("build never reached a terminal state");
    }

    #[tokio::test]
    async fn inline_preferred_build_produces_pdf_and_zip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(seeded_game());
        let service = inline_service(store.clone(), &dir);

        let message = service.start_build(id, "buildPreferred").await.unwrap();
        assert!(message.contains("Build was successful"));

        let game = store.load(id).await.unwrap();
        let record = game
            .build_results
            .get(BuildCategory::PreferredBuild)
            .unwrap();
        assert_eq!(record.queue_status, QueueStatus::Completed);
        assert_eq!(record.build_version, "2.0");
        assert_eq!(record.build_text_hash, game.text_hash);
        assert_eq!(game.lead_stats, "214 leads, 31k words");

        let files = GameFileStore::new(media_layout(&dir), id);
        let names: Vec<_> = files
            .list_files(BuildCategory::PreferredBuild)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert!(names.contains(&"mystery_SOLOSCR_LETTER.pdf".to_string()));
        assert!(names.iter().any(|n| n.ends_with(".zip")));
    }

    #[tokio::test]
    async fn inline_draft_build_renders_the_full_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(seeded_game());
        let service = inline_service(store.clone(), &dir);

        service.start_build(id, "buildDraft").await.unwrap();

        let files = GameFileStore::new(media_layout(&dir), id);
        let names: Vec<_> = files
            .list_files(BuildCategory::DraftBuild)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        // 17 renders (15 combinations + large-font + summary) plus the zip.
        assert_eq!(names.len(), 18);
        assert!(names.contains(&"mystery_SOLOPRN_LETTER_LargeFont.pdf".to_string()));
        assert!(names.contains(&"mystery_summary.pdf".to_string()));
        assert!(!names.contains(&"mystery_TWOCOL_A5.pdf".to_string()));
    }

    #[tokio::test]
    async fn worker_build_defers_then_completes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(seeded_game());

        let runner = Arc::new(JobRunner::new(
            store.clone(),
            Arc::new(StubRenderer),
            media_layout(&dir),
        ));
        let queue = WorkerQueue::start(runner as Arc<dyn JobExecutor>);
        let service = BuildService::new(store.clone(), queue.clone(), media_layout(&dir));

        let message = service.start_build(id, "buildDebug").await.unwrap();
        assert!(message.contains("has been queued for delayed build"));

        let game = wait_for_terminal(&store, id, BuildCategory::DebugBuild).await;
        let record = game.build_results.get(BuildCategory::DebugBuild).unwrap();
        assert_eq!(record.queue_status, QueueStatus::Completed);
        assert!(record.build_log.contains("Generated file list:"));
        queue.shutdown();
    }

    #[tokio::test]
    async fn draft_then_publish_promotes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(seeded_game());
        let service = inline_service(store.clone(), &dir);

        service.start_build(id, "buildDraft").await.unwrap();
        let message = service.publish(id).await.unwrap();
        assert_eq!(message, "Successfully published");

        let game = store.load(id).await.unwrap();
        assert!(game.publish_date.is_some());

        // Published record is the draft record plus the publish overlay.
        let draft = game.build_results.get(BuildCategory::DraftBuild).unwrap();
        let published = game.build_results.get(BuildCategory::Published).unwrap();
        assert_eq!(published.build_version, draft.build_version);
        assert_eq!(published.publish_errored, Some(false));

        let files = GameFileStore::new(media_layout(&dir), id);
        let names: Vec<_> = files
            .list_files(BuildCategory::Published)
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names.len(), 18);
        // Zip got renamed for its new category on the way over.
        assert!(names.contains(&"mystery_published.zip".to_string()));
        assert!(!names.iter().any(|n| n.contains("buildDraft")));
    }

    #[tokio::test]
    async fn publish_before_any_draft_build_errors_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(seeded_game());
        let service = inline_service(store.clone(), &dir);

        let message = service.publish(id).await.unwrap();
        assert!(message.starts_with("ERROR:"));

        let game = store.load(id).await.unwrap();
        assert!(game.publish_date.is_none());
        assert_eq!(
            game.build_results
                .get(BuildCategory::Published)
                .unwrap()
                .publish_errored,
            Some(true)
        );
    }

    #[tokio::test]
    async fn latest_result_tracks_the_newest_build() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(seeded_game());
        let service = inline_service(store.clone(), &dir);

        service.start_build(id, "buildPreferred").await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        service.start_build(id, "buildDebug").await.unwrap();

        let game = store.load(id).await.unwrap();
        let latest = game.build_results.latest_result().unwrap();
        let debug = game.build_results.get(BuildCategory::DebugBuild).unwrap();
        assert_eq!(latest.build_date_end, debug.build_date_end);
    }
}
