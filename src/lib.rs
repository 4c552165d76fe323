// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// GPU / graphics allowances — casts are intentional and safe
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
// Float comparison: graphics math frequently compares against 0.0, 1.0, etc.
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::use_self)]

//! Animated wormhole tunnel background renderer built on wgpu.
//!
//! Renders a closed wireframe tunnel with a continuous camera flythrough,
//! floating wireframe decoration boxes, exponential fog, and a bloom glow
//! on the bright edges. Designed to sit behind other content: the engine
//! takes any `wgpu::SurfaceTarget`, fills it, and exposes nothing but
//! lifecycle methods and optional mouse nudging.
//!
//! # Key entry points
//!
//! - [`engine::BackgroundEngine`] - the rendering engine
//! - [`Viewer`] - standalone winit window (feature `viewer`)
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Geometry is generated once on the CPU (tube sweep → wireframe edge
//! extraction → box placement) and uploaded as static line batches. Every
//! frame the camera advances along the closed spline path, the damped
//! orbit offset is applied, and the frame goes through a geometry pass →
//! bloom → composite chain before presentation.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::BackgroundEngine;
pub use error::WormholeError;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
