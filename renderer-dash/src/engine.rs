//! DASH engine contract: the seam between the adapter and the host's
//! MPEG-DASH implementation.

use crate::config::DashConfig;
use async_trait::async_trait;
use renderer_traits::error::Result;
use tokio::sync::broadcast;

/// Backend-native events a DASH engine emits.
#[derive(Debug, Clone, PartialEq)]
pub enum DashEngineEvent {
    /// The MPD manifest was fetched and parsed.
    ManifestLoaded,
    /// The stream is initialized; duration becomes known here.
    StreamInitialized { duration: Option<f64> },
    /// The rendered quality changed.
    QualityChanged { bitrate_kbps: u32 },
    /// The buffer level advanced.
    BufferLoaded { start: f64, end: f64 },
    /// Playback position advanced.
    TimeTick { position: f64 },
    /// Playback started producing output.
    Playing,
    /// Playback reached the end of the stream.
    Ended,
    /// The engine reported an error.
    Error { fatal: bool, detail: String },
}

/// One live DASH playback pipeline.
#[async_trait]
pub trait DashEngine: Send + Sync {
    /// Attach the pipeline to an MPD URL and begin loading.
    async fn attach_source(&self, url: &str) -> Result<()>;

    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position: f64) -> Result<()>;
    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn set_muted(&self, muted: bool) -> Result<()>;

    /// Detach the current source without tearing the pipeline down.
    async fn reset(&self) -> Result<()>;

    /// Subscribe to the engine's native event stream.
    fn events(&self) -> broadcast::Receiver<DashEngineEvent>;

    /// Tear the pipeline down. The engine must not emit events afterwards.
    async fn destroy(&self);
}

/// Host-installed factory producing engine instances.
pub trait DashEngineFactory: Send + Sync {
    fn create(&self, config: &DashConfig) -> Result<std::sync::Arc<dyn DashEngine>>;
}
