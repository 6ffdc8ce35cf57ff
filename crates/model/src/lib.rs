//! Core domain types for storypress.
//!
//! Everything the other crates share lives here: the [`Game`] entity, the
//! category/format enums, the per-category [`BuildResult`] record with its
//! queue state machine, and the [`GameStore`] persistence seam.

pub mod category;
pub mod format;
pub mod game;
pub mod merge;
pub mod result;
pub mod store;

pub use category::{BuildCategory, BuildMode};
pub use format::{Layout, PaperSize};
pub use game::{Game, text_hash_with_version};
pub use merge::deep_merge;
pub use result::{BuildResult, BuildResults, QueueStatus};
pub use store::{GameStore, MemoryStore, StoreError};
