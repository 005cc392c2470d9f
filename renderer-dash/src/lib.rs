//! # DASH Renderer
//!
//! Renderer adapter for MPEG-DASH sources. Mirrors the HLS adapter's
//! two-phase lifecycle — host-installed engine factory behind a shared
//! loader gate, pending-operation queue until the engine arrives — with
//! DASH-specific events and tuning knobs.

pub mod config;
pub mod engine;
pub mod renderer;

pub use config::DashConfig;
pub use engine::{DashEngine, DashEngineEvent, DashEngineFactory};
pub use renderer::DashRenderer;

use renderer_traits::descriptor::RendererDescriptor;
use renderer_traits::loader::EngineLoader;
use renderer_traits::source::mime_matches;
use std::sync::{Arc, OnceLock};

/// Registered name of the DASH renderer.
pub const RENDERER_NAME: &str = "native_dash";

const SUPPORTED_TYPES: &[&str] = &["application/dash+xml"];

pub(crate) fn engine_loader() -> Arc<EngineLoader<dyn DashEngineFactory>> {
    static LOADER: OnceLock<Arc<EngineLoader<dyn DashEngineFactory>>> = OnceLock::new();
    Arc::clone(LOADER.get_or_init(|| Arc::new(EngineLoader::new())))
}

/// Install the DASH engine factory, waking every adapter waiting on it.
pub fn install_engine(factory: Arc<dyn DashEngineFactory>) {
    engine_loader().install(factory);
}

/// `true` once an engine factory has been installed.
pub fn engine_installed() -> bool {
    engine_loader().is_ready()
}

/// Capability predicate for DASH MIME types.
pub fn can_play_type(mime: &str) -> bool {
    mime_matches(SUPPORTED_TYPES, mime)
}

/// Descriptor registering the DASH renderer with default configuration.
pub fn descriptor() -> RendererDescriptor {
    descriptor_with(DashConfig::default())
}

/// Descriptor registering the DASH renderer with custom configuration.
pub fn descriptor_with(config: DashConfig) -> RendererDescriptor {
    RendererDescriptor::new(RENDERER_NAME, can_play_type, move |ctx| {
        DashRenderer::create_with(ctx, config.clone(), engine_loader())
    })
}
