//! # HLS Renderer
//!
//! Renderer adapter for HTTP Live Streaming sources, wrapping an external
//! HLS engine behind the [`HlsEngine`] trait. The engine itself is
//! host-installed: call [`install_engine`] once during application setup
//! (the moment the streaming library finishes loading) and every player
//! instance — including those created earlier — is serviced from that one
//! install.
//!
//! Until the engine arrives, property writes and playback commands issued
//! against the adapter queue up and are replayed in order on readiness; see
//! `renderer_traits::pending`.

pub mod config;
pub mod engine;
pub mod renderer;

pub use config::HlsConfig;
pub use engine::{HlsEngine, HlsEngineEvent, HlsEngineFactory, HlsErrorKind};
pub use renderer::HlsRenderer;

use renderer_traits::descriptor::RendererDescriptor;
use renderer_traits::loader::EngineLoader;
use renderer_traits::source::mime_matches;
use std::sync::{Arc, OnceLock};

/// Registered name of the HLS renderer.
pub const RENDERER_NAME: &str = "native_hls";

const SUPPORTED_TYPES: &[&str] = &[
    "application/x-mpegurl",
    "vnd.apple.mpegurl",
    "audio/mpegurl",
    "audio/hls",
    "video/hls",
];

/// Process-wide engine gate shared by every HLS adapter instance.
pub(crate) fn engine_loader() -> Arc<EngineLoader<dyn HlsEngineFactory>> {
    static LOADER: OnceLock<Arc<EngineLoader<dyn HlsEngineFactory>>> = OnceLock::new();
    Arc::clone(LOADER.get_or_init(|| Arc::new(EngineLoader::new())))
}

/// Install the HLS engine factory, waking every adapter waiting on it.
pub fn install_engine(factory: Arc<dyn HlsEngineFactory>) {
    engine_loader().install(factory);
}

/// `true` once an engine factory has been installed.
pub fn engine_installed() -> bool {
    engine_loader().is_ready()
}

/// Capability predicate for HLS MIME types.
pub fn can_play_type(mime: &str) -> bool {
    mime_matches(SUPPORTED_TYPES, mime)
}

/// Descriptor registering the HLS renderer with default configuration.
pub fn descriptor() -> RendererDescriptor {
    descriptor_with(HlsConfig::default())
}

/// Descriptor registering the HLS renderer with custom configuration.
pub fn descriptor_with(config: HlsConfig) -> RendererDescriptor {
    RendererDescriptor::new(RENDERER_NAME, can_play_type, move |ctx| {
        HlsRenderer::create_with(ctx, config.clone(), engine_loader())
    })
}
