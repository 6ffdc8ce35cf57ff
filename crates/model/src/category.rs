//! File-purpose categories and user-facing build modes.

use serde::{Deserialize, Serialize};

/// A named bucket of files belonging to one game.
///
/// Each category maps 1:1 to a directory subtree and URL prefix under the
/// game's media namespace; the serialized token doubles as the directory
/// name, so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildCategory {
    /// Author-uploaded assets (images etc.).
    #[serde(rename = "uploadsStory")]
    StoryUpload,
    /// The full cross-product draft build set.
    #[serde(rename = "buildDraft")]
    DraftBuild,
    /// The single build in the game's preferred format.
    #[serde(rename = "buildPreferred")]
    PreferredBuild,
    /// Debug-variant build.
    #[serde(rename = "buildDebug")]
    DebugBuild,
    /// Files promoted from the draft set on publish.
    #[serde(rename = "published")]
    Published,
    /// Timestamped snapshots of the game text.
    #[serde(rename = "versionedGameText")]
    VersionedText,
}

impl BuildCategory {
    /// The directory / URL / results-map token for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildCategory::StoryUpload => "uploadsStory",
            BuildCategory::DraftBuild => "buildDraft",
            BuildCategory::PreferredBuild => "buildPreferred",
            BuildCategory::DebugBuild => "buildDebug",
            BuildCategory::Published => "published",
            BuildCategory::VersionedText => "versionedGameText",
        }
    }

    /// All categories, in a stable order.
    pub fn all() -> [BuildCategory; 6] {
        [
            BuildCategory::StoryUpload,
            BuildCategory::DraftBuild,
            BuildCategory::PreferredBuild,
            BuildCategory::DebugBuild,
            BuildCategory::Published,
            BuildCategory::VersionedText,
        ]
    }
}

impl std::fmt::Display for BuildCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-requested build granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildMode {
    /// One build in the game's preferred paper size and layout.
    Preferred,
    /// One debug-variant build in the preferred format.
    Debug,
    /// The complete draft set (all viable paper size x layout combinations).
    Draft,
}

impl BuildMode {
    /// The category the mode's output files land in. Build results are
    /// recorded under the same key.
    pub fn category(&self) -> BuildCategory {
        match self {
            BuildMode::Preferred => BuildCategory::PreferredBuild,
            BuildMode::Debug => BuildCategory::DebugBuild,
            BuildMode::Draft => BuildCategory::DraftBuild,
        }
    }

    /// Parses a mode token as received from the outer layer.
    ///
    /// Accepts both the short form (`"preferred"`) and the category-style
    /// form (`"buildPreferred"`). Anything else is a fatal argument error
    /// for the caller; no build record may be written for it.
    pub fn parse(s: &str) -> Option<BuildMode> {
        match s {
            "preferred" | "buildPreferred" => Some(BuildMode::Preferred),
            "debug" | "buildDebug" => Some(BuildMode::Debug),
            "draft" | "buildDraft" => Some(BuildMode::Draft),
            _ => None,
        }
    }

    /// Human-readable description used in status messages.
    pub fn describe(&self) -> &'static str {
        match self {
            BuildMode::Preferred => "preferred pdf build",
            BuildMode::Debug => "debug build",
            BuildMode::Draft => "draft pdf set build",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.category().as_str())
    }
}
