//! # Renderer Adapter Contract
//!
//! Shared types every renderer backend implements against:
//!
//! - [`MediaSource`] and the media-type utilities used to normalize sources,
//! - the [`RendererAdapter`] trait — the uniform property/method/lifecycle
//!   surface the player facade proxies to,
//! - [`PendingOps`] — the FIFO queue adapters fill while their backend is
//!   still initializing,
//! - [`EngineLoader`] — the process-wide gate that deduplicates backend
//!   engine installation across player instances,
//! - [`ElementState`] — the property cache standing in for the media surface
//!   a backend drives,
//! - [`RendererDescriptor`] — the registration record the renderer registry
//!   selects from.
//!
//! Backend crates (`renderer-hls`, `renderer-dash`, ...) depend on this crate
//! and `core-runtime` only; the facade in `core-player` consumes adapters
//! exclusively through [`RendererAdapter`] trait objects.

pub mod adapter;
pub mod descriptor;
pub mod element;
pub mod error;
pub mod loader;
pub mod pending;
pub mod source;

pub use adapter::{MediaMethod, PropertyWrite, RendererAdapter, TimeRanges};
pub use descriptor::{CreateContext, RendererDescriptor};
pub use element::ElementState;
pub use error::{RendererError, Result};
pub use loader::EngineLoader;
pub use pending::{PendingOp, PendingOps};
pub use source::MediaSource;
