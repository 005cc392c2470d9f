//! VR engine contract: a remote 360° view driven over a command channel.
//!
//! The view performs an asynchronous handshake after construction and emits
//! [`VrEngineEvent::Ready`] once it accepts commands. There is no mute
//! control and no teardown-free stop; the adapter compensates locally.

use crate::config::VrConfig;
use async_trait::async_trait;
use renderer_traits::error::Result;
use tokio::sync::broadcast;

/// Backend-native events a VR view emits.
#[derive(Debug, Clone, PartialEq)]
pub enum VrEngineEvent {
    /// Handshake finished; the view accepts commands now.
    Ready,
    /// Playback position advanced.
    TimeTick { position: f64 },
    /// Total duration became known.
    DurationKnown { duration: f64 },
    /// Playback reached the end of the media.
    Ended,
    /// The user switched display modes (mono, stereo, fullscreen).
    ModeChanged { mode: String },
    /// The view reported an error. VR errors are presentation-level and
    /// never fatal to the pipeline.
    Error { detail: String },
}

/// One remote VR view instance.
#[async_trait]
pub trait VrEngine: Send + Sync {
    /// Re-point the view at a different media URL.
    async fn set_source(&self, url: &str) -> Result<()>;

    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position: f64) -> Result<()>;
    async fn set_volume(&self, volume: f64) -> Result<()>;

    /// Subscribe to the view's native event stream.
    fn events(&self) -> broadcast::Receiver<VrEngineEvent>;

    /// Tear the view down. The engine must not emit events afterwards.
    async fn destroy(&self);
}

/// Host-installed factory producing VR view instances.
pub trait VrEngineFactory: Send + Sync {
    /// Create a view presenting `url` with the given configuration.
    fn create(&self, config: &VrConfig, url: &str) -> Result<std::sync::Arc<dyn VrEngine>>;
}
