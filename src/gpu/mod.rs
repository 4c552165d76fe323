//! Core GPU plumbing: device/surface ownership and pipeline helpers.

pub mod pipeline_helpers;
pub mod render_context;

pub use render_context::{RenderContext, RenderContextError};
