//! # VR Renderer
//!
//! Renderer adapter for 360° playback through a remote VR view. Unlike the
//! streaming adapters, readiness is a two-stage handshake: the engine
//! instance exists as soon as the host-installed factory produces it, but
//! commands are honored only after the remote view completes its handshake
//! and emits [`VrEngineEvent::Ready`]. Everything issued before that lands
//! in the pending queue.
//!
//! The remote view exposes no mute control, so muting is implemented
//! locally: muting stores the current volume and drives the remote volume
//! to zero; unmuting restores the stored value.

pub mod config;
pub mod engine;
pub mod renderer;

pub use config::VrConfig;
pub use engine::{VrEngine, VrEngineEvent, VrEngineFactory};
pub use renderer::VrRenderer;

use renderer_traits::descriptor::RendererDescriptor;
use renderer_traits::loader::EngineLoader;
use renderer_traits::source::mime_matches;
use std::sync::{Arc, OnceLock};

/// Registered name of the VR renderer.
pub const RENDERER_NAME: &str = "vr";

const SUPPORTED_TYPES: &[&str] = &[
    "video/mp4",
    "application/x-mpegurl",
    "vnd.apple.mpegurl",
    "video/hls",
    "application/dash+xml",
];

pub(crate) fn engine_loader() -> Arc<EngineLoader<dyn VrEngineFactory>> {
    static LOADER: OnceLock<Arc<EngineLoader<dyn VrEngineFactory>>> = OnceLock::new();
    Arc::clone(LOADER.get_or_init(|| Arc::new(EngineLoader::new())))
}

/// Install the VR engine factory, waking every adapter waiting on it.
pub fn install_engine(factory: Arc<dyn VrEngineFactory>) {
    engine_loader().install(factory);
}

/// `true` once an engine factory has been installed.
pub fn engine_installed() -> bool {
    engine_loader().is_ready()
}

/// Capability predicate for sources the VR view can present.
pub fn can_play_type(mime: &str) -> bool {
    mime_matches(SUPPORTED_TYPES, mime)
}

/// Descriptor registering the VR renderer with default configuration.
pub fn descriptor() -> RendererDescriptor {
    descriptor_with(VrConfig::default())
}

/// Descriptor registering the VR renderer with custom configuration.
pub fn descriptor_with(config: VrConfig) -> RendererDescriptor {
    RendererDescriptor::new(RENDERER_NAME, can_play_type, move |ctx| {
        VrRenderer::create_with(ctx, config.clone(), engine_loader())
    })
}
