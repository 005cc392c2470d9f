//! # HLS Engine Contract
//!
//! The seam between this adapter and whatever HLS implementation the host
//! ships. The engine owns manifest loading, segment fetching, and decoding;
//! the adapter owns the uniform surface and event translation. Engines
//! report progress through a broadcast stream of [`HlsEngineEvent`]s.

use crate::config::HlsConfig;
use async_trait::async_trait;
use renderer_traits::error::Result;
use tokio::sync::broadcast;

/// Backend-native events an HLS engine emits.
#[derive(Debug, Clone, PartialEq)]
pub enum HlsEngineEvent {
    /// The master manifest was parsed.
    ManifestParsed {
        /// Number of quality levels found.
        levels: usize,
    },
    /// A level playlist was loaded; duration becomes known here.
    LevelLoaded { duration: f64, live: bool },
    /// A media fragment was appended to the buffer.
    FragBuffered { start: f64, end: f64 },
    /// Playback position advanced.
    TimeTick { position: f64 },
    /// Playback started producing output.
    Playing,
    /// Playback reached the end of the stream.
    Ended,
    /// The engine reported an error.
    Error {
        kind: HlsErrorKind,
        /// Fatal errors stop the engine; non-fatal ones are recoverable.
        fatal: bool,
        detail: String,
    },
}

/// Engine error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlsErrorKind {
    /// Manifest/level/fragment request failures.
    Network,
    /// Buffer or decode failures.
    Media,
    /// Container demuxing failures.
    Mux,
    /// Anything the engine cannot classify.
    Other,
}

/// One live HLS playback pipeline.
#[async_trait]
pub trait HlsEngine: Send + Sync {
    /// Point the pipeline at a manifest URL and begin loading.
    async fn load_source(&self, url: &str) -> Result<()>;

    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position: f64) -> Result<()>;
    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn set_muted(&self, muted: bool) -> Result<()>;

    /// Stop segment loading without tearing the pipeline down.
    async fn stop_load(&self) -> Result<()>;

    /// Subscribe to the engine's native event stream.
    fn events(&self) -> broadcast::Receiver<HlsEngineEvent>;

    /// Tear the pipeline down. The engine must not emit events afterwards.
    async fn destroy(&self);
}

/// Host-installed factory producing engine instances.
pub trait HlsEngineFactory: Send + Sync {
    fn create(&self, config: &HlsConfig) -> Result<std::sync::Arc<dyn HlsEngine>>;
}
