//! Build orchestration.
//!
//! [`BuildService`] is the public surface: it starts and cancels builds,
//! publishes finished drafts, and reconciles upload records. The actual
//! rendering work runs through [`JobRunner`], which a queue invokes either
//! inline or from a worker, and which talks to the typesetting engine
//! through the [`Renderer`] seam.

mod renderer;
mod runner;
mod service;

pub use renderer::{RenderError, RenderReport, Renderer};
pub use runner::JobRunner;
pub use service::{BuildService, ServiceError};
