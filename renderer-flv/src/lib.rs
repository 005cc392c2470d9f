//! # FLV Renderer
//!
//! Renderer adapter for FLV sources wrapping a host-installed FLV engine.
//! Same two-phase lifecycle as the other streaming adapters: a shared
//! loader gate for the engine factory and a pending-operation queue until
//! the engine arrives.

pub mod config;
pub mod engine;
pub mod renderer;

pub use config::FlvConfig;
pub use engine::{FlvEngine, FlvEngineEvent, FlvEngineFactory, FlvErrorKind};
pub use renderer::FlvRenderer;

use renderer_traits::descriptor::RendererDescriptor;
use renderer_traits::loader::EngineLoader;
use renderer_traits::source::mime_matches;
use std::sync::{Arc, OnceLock};

/// Registered name of the FLV renderer.
pub const RENDERER_NAME: &str = "native_flv";

const SUPPORTED_TYPES: &[&str] = &["video/x-flv", "video/flv"];

pub(crate) fn engine_loader() -> Arc<EngineLoader<dyn FlvEngineFactory>> {
    static LOADER: OnceLock<Arc<EngineLoader<dyn FlvEngineFactory>>> = OnceLock::new();
    Arc::clone(LOADER.get_or_init(|| Arc::new(EngineLoader::new())))
}

/// Install the FLV engine factory, waking every adapter waiting on it.
pub fn install_engine(factory: Arc<dyn FlvEngineFactory>) {
    engine_loader().install(factory);
}

/// `true` once an engine factory has been installed.
pub fn engine_installed() -> bool {
    engine_loader().is_ready()
}

/// Capability predicate for FLV MIME types.
pub fn can_play_type(mime: &str) -> bool {
    mime_matches(SUPPORTED_TYPES, mime)
}

/// Descriptor registering the FLV renderer with default configuration.
pub fn descriptor() -> RendererDescriptor {
    descriptor_with(FlvConfig::default())
}

/// Descriptor registering the FLV renderer with custom configuration.
pub fn descriptor_with(config: FlvConfig) -> RendererDescriptor {
    RendererDescriptor::new(RENDERER_NAME, can_play_type, move |ctx| {
        FlvRenderer::create_with(ctx, config.clone(), engine_loader())
    })
}
