//! FLV engine contract.

use crate::config::FlvConfig;
use async_trait::async_trait;
use renderer_traits::error::Result;
use tokio::sync::broadcast;

/// Backend-native events an FLV engine emits.
#[derive(Debug, Clone, PartialEq)]
pub enum FlvEngineEvent {
    /// Container metadata was parsed; duration becomes known here.
    MediaInfo { duration: Option<f64> },
    /// The whole file finished loading.
    LoadingComplete,
    /// The engine recovered from an early end-of-file on a live stream.
    RecoveredEarlyEof,
    /// The buffer level advanced.
    BufferUpdate { start: f64, end: f64 },
    /// Playback position advanced.
    TimeTick { position: f64 },
    /// Playback started producing output.
    Playing,
    /// Playback reached the end of the stream.
    Ended,
    /// The engine reported an error.
    Error {
        kind: FlvErrorKind,
        fatal: bool,
        detail: String,
    },
}

/// Engine error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlvErrorKind {
    Network,
    Media,
    Other,
}

/// One live FLV playback pipeline.
#[async_trait]
pub trait FlvEngine: Send + Sync {
    /// Point the pipeline at an FLV URL and begin loading.
    async fn load_media(&self, url: &str) -> Result<()>;

    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position: f64) -> Result<()>;
    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn set_muted(&self, muted: bool) -> Result<()>;

    /// Abort loading and drop buffered data without tearing the pipeline
    /// down.
    async fn unload(&self) -> Result<()>;

    /// Subscribe to the engine's native event stream.
    fn events(&self) -> broadcast::Receiver<FlvEngineEvent>;

    /// Tear the pipeline down. The engine must not emit events afterwards.
    async fn destroy(&self);
}

/// Host-installed factory producing engine instances.
pub trait FlvEngineFactory: Send + Sync {
    fn create(&self, config: &FlvConfig) -> Result<std::sync::Arc<dyn FlvEngine>>;
}
