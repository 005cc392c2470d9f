//! # Core Player
//!
//! The central objects applications interact with:
//!
//! - [`RendererRegistry`] — ordered catalog of renderer descriptors with
//!   capability-based selection,
//! - [`MediaElementFacade`] — owns the original element state, selects and
//!   switches renderer adapters on source assignment, and proxies the
//!   uniform property/method surface to whichever adapter is active,
//! - [`native`] — the always-ready default renderer driving the facade's own
//!   element state.
//!
//! ## Overview
//!
//! Hosts register renderer descriptors once during setup, construct one
//! facade per player instance, and assign sources:
//!
//! ```rust
//! use core_player::{MediaElementFacade, RendererRegistry};
//! use core_runtime::config::PlayerConfig;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), core_player::PlayerError> {
//! let registry = Arc::new(RendererRegistry::new());
//! registry.register(core_player::native::descriptor())?;
//!
//! let player = MediaElementFacade::new(registry, PlayerConfig::default());
//! player.set_source("https://cdn.example.com/movie.mp4").await?;
//! player.play().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod facade;
pub mod native;
pub mod registry;

pub use error::{PlayerError, Result};
pub use facade::{MediaElementFacade, SourceInput};
pub use registry::{RendererRegistry, Selection};
