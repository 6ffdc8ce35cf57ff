//! The game entity: one authored storybook text and all of its build state.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{BuildResults, Layout, PaperSize};

/// One storybook game document.
///
/// Owned by the persistence layer; the build components receive a copy,
/// mutate the build-results map plus a few scalar fields, and hand it back
/// to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Game {
    pub id: Uuid,
    /// Internal short name, also used in generated filenames.
    pub name: String,
    /// Public name extracted from the text settings.
    pub game_name: String,
    /// The raw authored game text.
    pub text: String,
    /// Hash of text + build-system version string.
    pub text_hash: String,
    /// Unix seconds of the last text-hash change.
    pub text_hash_change_date: i64,

    /// Version info parsed out of the text settings.
    pub version: String,
    pub version_date: String,

    pub preferred_paper_size: PaperSize,
    pub preferred_layout: Layout,

    /// Summary statistics from the last successful build.
    pub lead_stats: String,
    /// Unix seconds of the last publish, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<i64>,

    pub build_results: BuildResults,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            id: Uuid::new_v4(),
            name: String::new(),
            game_name: String::new(),
            text: String::new(),
            text_hash: String::new(),
            text_hash_change_date: 0,
            version: String::new(),
            version_date: String::new(),
            preferred_paper_size: PaperSize::default(),
            preferred_layout: Layout::default(),
            lead_stats: String::new(),
            publish_date: None,
            build_results: BuildResults::new(),
        }
    }
}

impl Game {
    /// Creates a game with the given internal name and text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Game {
        Game {
            name: name.into(),
            text: text.into(),
            ..Game::default()
        }
    }

    /// Recomputes the text hash against the given build-system version.
    ///
    /// Returns `true` if the hash changed (and stamps the change date).
    pub fn refresh_text_hash(&mut self, build_version: &str) -> bool {
        let fresh = text_hash_with_version(&self.text, build_version);
        if fresh == self.text_hash {
            return false;
        }
        self.text_hash = fresh;
        self.text_hash_change_date = Utc::now().timestamp();
        true
    }

    /// Compares a recorded build hash against the current text hash.
    ///
    /// Returns `(text_same, version_same)`. Version comparison is not
    /// implemented yet: `version_same` simply mirrors `text_same`, a known
    /// gap.
    pub fn compare_build_hash(&self, build_hash: &str) -> (bool, bool) {
        let text_same = build_hash == self.text_hash;
        (text_same, text_same)
    }
}

/// Hash of the text plus the build-system version string, so that a
/// renderer upgrade invalidates old builds even when the text is unchanged.
pub fn text_hash_with_version(text: &str, build_version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{}_{}", hex::encode(hasher.finalize()), build_version)
}
