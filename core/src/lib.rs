//! Cospal Core - Headless Cosine Palette Engine
//!
//! This crate holds the palette math and interactive state machinery
//! for cospal, completely independent of any UI framework. It can drive
//! a TUI, a GUI, or run headless for testing.
//!
//! # The palette function
//!
//! A palette is four RGB coefficient vectors A (offset), B (amplitude),
//! C (frequency), and D (phase shift). Each color channel is the cosine
//! wave
//!
//! ```text
//! channel(x) = a + b * cos(2*pi * (c*x + d))
//! ```
//!
//! evaluated at a position `x` along the gradient. Evaluation is
//! unclamped; the rasterizer clamps to the unit range when scaling to
//! 8-bit samples.
//!
//! # Module Overview
//!
//! - [`parameter`]: one RGB coefficient vector, randomization, share encoding
//! - [`palette`]: the four-parameter model, evaluation, the share codec
//! - [`color`]: discrete 8-bit colors and their hex/rgb/hsl forms
//! - [`raster`]: gradient rasterization, average color, click sampling
//! - [`easing`]: easing curves and scalar interpolation
//! - [`transition`]: the one-shot 500ms randomize animation
//! - [`samples`]: the bounded FIFO list of sampled colors
//! - [`store`]: single-owner palette state with change subscribers
//! - [`debounce`]: the quiescence timer gating persistence
//! - [`config`]: TOML configuration loading
//! - [`persist`]: share-code state file save/restore
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any
//! other UI framework. It's pure palette logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod color;
pub mod config;
pub mod debounce;
pub mod easing;
pub mod palette;
pub mod parameter;
pub mod persist;
pub mod raster;
pub mod samples;
pub mod store;
pub mod transition;

// Re-exports for convenience
pub use color::{Color, ColorFormat};
pub use config::{load_config, load_config_from_path, AppConfig, ConfigError};
pub use debounce::{Debouncer, PERSIST_DELAY};
pub use easing::EasingFunction;
pub use palette::{InvalidChannel, Palette};
pub use parameter::{Parameter, ShareCodeError};
pub use persist::{default_state_path, load_palette, save_palette, PersistError};
pub use raster::GradientRaster;
pub use samples::{SampleList, SAMPLE_CAPACITY};
pub use store::PaletteStore;
pub use transition::{RandomizeTransition, RANDOMIZE_DURATION};
