//! Build plan expansion.
//!
//! Turns one user-requested [`BuildMode`] into the ordered list of concrete
//! [`BuildTask`] descriptors the renderer consumes: which paper size,
//! layout and variant to render, which category directory the output lands
//! in, and the derived typesetting fields (font size, column count,
//! double-sidedness, filename suffix).
//!
//! The derivation lookup tables live here as free functions; nothing in
//! this crate reaches back into the persistence layer.
//!
//! [`BuildMode`]: storypress_model::BuildMode

pub mod tables;
mod expand;
mod task;

pub use expand::{expand, PlanRequest};
pub use task::{BuildTask, RenderKind, RenderTask, ZipTask};
