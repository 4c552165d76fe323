//! GPU renderers: the wireframe line pass and the post-processing chain.

pub mod fog;
pub mod line;
pub mod postprocess;

pub use fog::FogBinding;
pub use line::{LineBatch, LineRenderer, LineVertex};
