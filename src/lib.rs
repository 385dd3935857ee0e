// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
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
// Clone / pass-by-value hygiene
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics allowances: casts between pixel sizes and floats are
// intentional, and math frequently compares against 0.0 and 1.0.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! GPU particle morphing between 3D models.
//!
//! Loaded models rarely share a vertex count, but a shader can only blend
//! two position buffers index by index. The crate's core,
//! [`points::equalize()`], pads every model's positions to the largest
//! count by resampling its own points, so any two of them can be paired
//! into a [`morph::MorphPair`] and mixed by a single progress value.
//!
//! # Key entry points
//!
//! - [`points`] - point sets and the equalizer
//! - [`morph::MorphPair`] / [`morph::PairSelection`] - the blended pair
//! - [`scene::ParticleScene`] - equalize-once-per-load scene with stale-load
//!   supersession
//! - [`engine::MorphEngine`] - command-driven update loop producing a
//!   [`engine::FrameState`] per tick
//! - [`gpu::ParticleRenderer`] - instanced point sprites on wgpu
//! - [`options::Options`] - TOML presets for size, color, pairing, timing,
//!   and camera
//!
//! With the `viewer` feature, `Viewer` opens a winit window; with `web`,
//! the `web` module exports the equalizer to JavaScript.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod morph;
pub mod options;
pub mod points;
pub mod scene;
pub mod util;
/// Standalone winit window.
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use engine::{FrameState, MorphCommand, MorphEngine};
pub use error::MorphError;
pub use morph::{MorphPair, PairSelection};
pub use options::Options;
pub use points::{EqualizedPointSet, PointSet};
pub use scene::{ModelSet, ParticleScene};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
