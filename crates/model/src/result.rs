//! Per-category build result records and the queue state machine.
//!
//! One [`BuildResult`] is stored per (game, category) pair inside the
//! game's [`BuildResults`] map. Records move `queued -> running ->
//! completed|errored`, or straight to `aborted` when a queued job is
//! superseded; `canceled` is an orthogonal flag layered on top.
//!
//! Records serialize to the camelCase JSON shape the rest of the system
//! persists and displays (`queueStatus`, `buildDateQueued`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BuildCategory;
use crate::merge::deep_merge;

/// Lifecycle state of a build record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    #[default]
    None,
    Queued,
    Running,
    Completed,
    Errored,
    Aborted,
}

impl QueueStatus {
    /// Terminal states never transition again; a new build for the same
    /// category starts a fresh record instead.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueueStatus::Completed | QueueStatus::Errored | QueueStatus::Aborted
        )
    }
}

/// The persisted outcome record for one category's build.
///
/// Timestamps are unix seconds; `0` stands for "not stamped yet" (the typed
/// equivalent of an absent key in the old open-mapping storage).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildResult {
    pub queue_status: QueueStatus,
    pub build_date_queued: i64,
    pub build_date_start: i64,
    pub build_date_end: i64,
    pub build_version: String,
    pub build_version_date: String,
    pub build_text_hash: String,
    pub build_error: bool,
    pub build_log: String,
    pub canceled: bool,

    /// External queue handle for a deferred job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// History carried forward from the superseded record of the same
    /// category when a new one is queued.
    pub last_build_date_start: i64,
    pub last_build_version: String,
    pub last_build_version_date: String,

    /// Publish overlay, present only on records written by the publish
    /// coordinator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_errored: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<i64>,
}

impl BuildResult {
    /// A fresh `queued` record, carrying build history forward from the
    /// record it supersedes (zero/empty when there is none).
    pub fn queued(now: i64, previous: Option<&BuildResult>) -> BuildResult {
        let mut record = BuildResult {
            queue_status: QueueStatus::Queued,
            build_date_queued: now,
            ..BuildResult::default()
        };
        if let Some(prev) = previous {
            record.last_build_date_start = prev.last_build_date_start;
            record.last_build_version = prev.last_build_version.clone();
            record.last_build_version_date = prev.last_build_version_date.clone();
        }
        record
    }

    /// The `running` record written when the job starts executing.
    ///
    /// Preserves the original queue timestamp and the task handle so a
    /// running job can still be looked up on the external queue.
    pub fn running(queued_at: i64, previous: Option<&BuildResult>) -> BuildResult {
        let mut record = BuildResult {
            queue_status: QueueStatus::Running,
            build_date_queued: queued_at,
            ..BuildResult::default()
        };
        if let Some(prev) = previous {
            record.task_type = prev.task_type.clone();
            record.task_id = prev.task_id.clone();
        }
        record
    }

    /// Records the external queue handle for a deferred job.
    pub fn with_task_handle(mut self, task_type: &str, task_id: &str) -> BuildResult {
        self.task_type = Some(task_type.to_string());
        self.task_id = Some(task_id.to_string());
        self
    }

    /// Whether a cancel request should do anything at all.
    ///
    /// Absent, terminal, and already-canceled records are left alone.
    pub fn is_cancelable(&self) -> bool {
        !self.canceled && matches!(self.queue_status, QueueStatus::Queued | QueueStatus::Running)
    }
}

/// The game's build-results map, keyed by category.
///
/// Serializes to a JSON object keyed by category token, which is the shape
/// the persistence layer stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildResults {
    records: std::collections::BTreeMap<BuildCategory, BuildResult>,
}

impl BuildResults {
    pub fn new() -> BuildResults {
        BuildResults::default()
    }

    pub fn get(&self, category: BuildCategory) -> Option<&BuildResult> {
        self.records.get(&category)
    }

    pub fn get_mut(&mut self, category: BuildCategory) -> Option<&mut BuildResult> {
        self.records.get_mut(&category)
    }

    /// Replaces the record for a category wholesale.
    pub fn set(&mut self, category: BuildCategory, record: BuildResult) {
        self.records.insert(category, record);
    }

    /// Iterates all (category, record) pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (BuildCategory, &BuildResult)> {
        self.records.iter().map(|(c, r)| (*c, r))
    }

    /// Categories that currently hold a record.
    pub fn categories(&self) -> Vec<BuildCategory> {
        self.records.keys().copied().collect()
    }

    /// Deep-copies the source category's record, deep-merges `overrides` on
    /// top (override wins, recursively), and stores the result under the
    /// destination category. A missing source behaves as an empty record.
    pub fn copy_results(
        &mut self,
        dest: BuildCategory,
        source: BuildCategory,
        overrides: &Value,
    ) -> Result<(), serde_json::Error> {
        let base = self.records.get(&source).cloned().unwrap_or_default();
        let mut value = serde_json::to_value(&base)?;
        deep_merge(&mut value, overrides);
        let merged: BuildResult = serde_json::from_value(value)?;
        self.records.insert(dest, merged);
        Ok(())
    }

    /// Deep-merges `overrides` into one category's record in place.
    pub fn modify_results(
        &mut self,
        category: BuildCategory,
        overrides: &Value,
    ) -> Result<(), serde_json::Error> {
        self.copy_results(category, category, overrides)
    }

    /// The record with the numerically greatest `buildDateEnd` across all
    /// categories; records that never finished are ignored. Handy for an
    /// at-a-glance "most recent build" display.
    pub fn latest_result(&self) -> Option<&BuildResult> {
        self.records
            .values()
            .filter(|r| r.build_date_end > 0)
            .max_by_key(|r| r.build_date_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finished(end: i64) -> BuildResult {
        BuildResult {
            queue_status: QueueStatus::Completed,
            build_date_end: end,
            ..BuildResult::default()
        }
    }

    #[test]
    fn queued_record_carries_history_forward() {
        let prev = BuildResult {
            last_build_date_start: 111,
            last_build_version: "1.2".into(),
            last_build_version_date: "jan 5".into(),
            queue_status: QueueStatus::Completed,
            ..BuildResult::default()
        };
        let fresh = BuildResult::queued(999, Some(&prev));
        assert_eq!(fresh.queue_status, QueueStatus::Queued);
        assert_eq!(fresh.build_date_queued, 999);
        assert_eq!(fresh.last_build_date_start, 111);
        assert_eq!(fresh.last_build_version, "1.2");
        assert_eq!(fresh.last_build_version_date, "jan 5");
        assert!(!fresh.canceled);
    }

    #[test]
    fn queued_record_without_previous_defaults_history() {
        let fresh = BuildResult::queued(5, None);
        assert_eq!(fresh.last_build_date_start, 0);
        assert_eq!(fresh.last_build_version, "");
    }

    #[test]
    fn running_record_keeps_queue_date_and_handle() {
        let queued = BuildResult::queued(100, None).with_task_handle("worker", "t-1");
        let running = BuildResult::running(queued.build_date_queued, Some(&queued));
        assert_eq!(running.queue_status, QueueStatus::Running);
        assert_eq!(running.build_date_queued, 100);
        assert_eq!(running.task_type.as_deref(), Some("worker"));
        assert_eq!(running.task_id.as_deref(), Some("t-1"));
    }

    #[test]
    fn cancelable_only_when_queued_or_running() {
        let mut r = BuildResult::queued(1, None);
        assert!(r.is_cancelable());
        r.queue_status = QueueStatus::Running;
        assert!(r.is_cancelable());
        r.queue_status = QueueStatus::Completed;
        assert!(!r.is_cancelable());
        r.queue_status = QueueStatus::Queued;
        r.canceled = true;
        assert!(!r.is_cancelable());
    }

    #[test]
    fn terminal_states() {
        assert!(QueueStatus::Completed.is_terminal());
        assert!(QueueStatus::Errored.is_terminal());
        assert!(QueueStatus::Aborted.is_terminal());
        assert!(!QueueStatus::Queued.is_terminal());
        assert!(!QueueStatus::Running.is_terminal());
        assert!(!QueueStatus::None.is_terminal());
    }

    #[test]
    fn copy_results_with_empty_overrides_is_pure_copy() {
        let mut results = BuildResults::new();
        let mut source = finished(42);
        source.build_log = "ok".into();
        results.set(BuildCategory::DraftBuild, source.clone());

        results
            .copy_results(BuildCategory::Published, BuildCategory::DraftBuild, &json!({}))
            .unwrap();

        assert_eq!(results.get(BuildCategory::Published), Some(&source));
        // Source untouched.
        assert_eq!(results.get(BuildCategory::DraftBuild), Some(&source));
    }

    #[test]
    fn copy_results_overrides_win() {
        let mut results = BuildResults::new();
        results.set(BuildCategory::DraftBuild, finished(42));

        let overrides = json!({
            "publishResult": "Successfully published",
            "publishErrored": false,
            "publishDate": 777,
        });
        results
            .copy_results(BuildCategory::Published, BuildCategory::DraftBuild, &overrides)
            .unwrap();

        let published = results.get(BuildCategory::Published).unwrap();
        assert_eq!(published.build_date_end, 42);
        assert_eq!(published.publish_result.as_deref(), Some("Successfully published"));
        assert_eq!(published.publish_errored, Some(false));
        assert_eq!(published.publish_date, Some(777));
    }

    #[test]
    fn copy_results_missing_source_acts_as_empty() {
        let mut results = BuildResults::new();
        results
            .copy_results(
                BuildCategory::Published,
                BuildCategory::DraftBuild,
                &json!({"publishErrored": true}),
            )
            .unwrap();
        let published = results.get(BuildCategory::Published).unwrap();
        assert_eq!(published.queue_status, QueueStatus::None);
        assert_eq!(published.publish_errored, Some(true));
    }

    #[test]
    fn modify_results_merges_in_place() {
        let mut results = BuildResults::new();
        results.set(BuildCategory::DebugBuild, finished(9));
        results
            .modify_results(BuildCategory::DebugBuild, &json!({"canceled": true}))
            .unwrap();
        let record = results.get(BuildCategory::DebugBuild).unwrap();
        assert!(record.canceled);
        assert_eq!(record.build_date_end, 9);
    }

    #[test]
    fn latest_result_picks_greatest_end_date() {
        let mut results = BuildResults::new();
        results.set(BuildCategory::DraftBuild, finished(10));
        results.set(BuildCategory::PreferredBuild, finished(30));
        results.set(BuildCategory::DebugBuild, finished(20));
        // Unfinished records are ignored even if newer in wall time.
        results.set(BuildCategory::Published, BuildResult::queued(99, None));

        let latest = results.latest_result().unwrap();
        assert_eq!(latest.build_date_end, 30);
    }

    #[test]
    fn latest_result_none_when_nothing_finished() {
        let mut results = BuildResults::new();
        results.set(BuildCategory::DraftBuild, BuildResult::queued(5, None));
        assert!(results.latest_result().is_none());
    }

    #[test]
    fn record_serializes_to_camel_case_keys() {
        let record = BuildResult {
            queue_status: QueueStatus::Queued,
            build_date_queued: 123,
            ..BuildResult::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["queueStatus"], "queued");
        assert_eq!(value["buildDateQueued"], 123);
        assert_eq!(value["buildError"], false);
        // Absent handle keys are omitted entirely.
        assert!(value.get("taskId").is_none());
    }

    #[test]
    fn results_map_round_trips_keyed_by_category_token() {
        let mut results = BuildResults::new();
        results.set(BuildCategory::DraftBuild, finished(1));
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.starts_with("{\"buildDraft\":"));
        let back: BuildResults = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results);
    }
}
