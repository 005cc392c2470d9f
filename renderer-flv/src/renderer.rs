//! FLV adapter: uniform surface over an [`FlvEngine`].
//!
//! Follows the streaming-adapter lifecycle; FLV-specific wrinkles are the
//! `unload` stop semantics and the early-EOF recovery event, which is
//! forwarded as a backend diagnostic without touching playback state.

use crate::config::FlvConfig;
use crate::engine::{FlvEngine, FlvEngineEvent, FlvEngineFactory, FlvErrorKind};
use crate::{can_play_type, RENDERER_NAME};
use async_trait::async_trait;
use core_runtime::events::{MediaEvent, MediaEventBus};
use renderer_traits::adapter::{MediaMethod, PropertyWrite, RendererAdapter, TimeRanges};
use renderer_traits::descriptor::CreateContext;
use renderer_traits::element::ElementState;
use renderer_traits::error::{RendererError, Result};
use renderer_traits::loader::EngineLoader;
use renderer_traits::pending::{PendingOp, PendingOps};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

struct Control {
    engine: Option<Arc<dyn FlvEngine>>,
    pending: PendingOps,
}

/// Renderer adapter for FLV sources.
pub struct FlvRenderer {
    element: ElementState,
    events: Arc<MediaEventBus>,
    config: FlvConfig,
    control: Mutex<Control>,
    destroyed: AtomicBool,
}

impl FlvRenderer {
    /// Construct an adapter against a specific engine loader.
    pub fn create_with(
        ctx: CreateContext,
        config: FlvConfig,
        loader: Arc<EngineLoader<dyn FlvEngineFactory>>,
    ) -> Result<Arc<dyn RendererAdapter>> {
        let adapter = Arc::new(Self {
            element: ElementState::new(),
            events: Arc::clone(&ctx.events),
            config,
            control: Mutex::new(Control {
                engine: None,
                pending: PendingOps::new(),
            }),
            destroyed: AtomicBool::new(false),
        });

        if let Some(source) = ctx
            .sources
            .iter()
            .find(|source| can_play_type(source.bare_mime()))
        {
            adapter.element.set_src(Some(source.src.clone()));
        }

        Self::spawn_init(Arc::clone(&adapter), loader);

        ctx.events.dispatch_event(MediaEvent::RendererReady {
            renderer: RENDERER_NAME.to_string(),
        });

        Ok(adapter)
    }

    fn spawn_init(adapter: Arc<Self>, loader: Arc<EngineLoader<dyn FlvEngineFactory>>) {
        tokio::spawn(async move {
            let factory = match loader.acquire().await {
                Ok(factory) => factory,
                Err(err) => {
                    error!(%err, "flv engine never became available");
                    return;
                }
            };

            match factory.create(&adapter.config) {
                Ok(engine) => adapter.engine_ready(engine).await,
                Err(err) => {
                    error!(%err, "flv engine construction failed");
                    adapter.events.dispatch_event(MediaEvent::Backend {
                        renderer: RENDERER_NAME.to_string(),
                        event: "engineError".to_string(),
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    async fn engine_ready(self: Arc<Self>, engine: Arc<dyn FlvEngine>) {
        let mut src_applied = false;
        {
            let mut control = self.control.lock().await;
            control.engine = Some(Arc::clone(&engine));
            let ops = control.pending.drain();
            debug!(queued = ops.len(), "flv engine ready, draining queue");
            for op in ops {
                if matches!(op, PendingOp::Set(PropertyWrite::Src(_))) {
                    src_applied = true;
                }
                if let Err(err) = self.apply(&engine, op).await {
                    warn!(%err, "queued operation failed during drain");
                }
            }
        }

        if !src_applied {
            if let Some(src) = self.element.src() {
                if let Err(err) = engine.load_media(&src).await {
                    warn!(%err, "initial media load failed");
                }
            }
        }

        let adapter = self;
        let mut events = engine.events();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => adapter.handle_engine_event(event).await,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "lagging behind flv engine events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    async fn handle_engine_event(&self, event: FlvEngineEvent) {
        match event {
            FlvEngineEvent::MediaInfo { duration } => {
                self.element.set_duration(duration);
                debug!(?duration, "flv media info parsed");
                self.events
                    .dispatch_event(MediaEvent::LoadedMetadata { duration });
            }
            FlvEngineEvent::LoadingComplete => {
                self.events.dispatch_event(MediaEvent::Backend {
                    renderer: RENDERER_NAME.to_string(),
                    event: "loadingComplete".to_string(),
                    detail: String::new(),
                });
            }
            FlvEngineEvent::RecoveredEarlyEof => {
                warn!("flv engine recovered from early end-of-file");
                self.events.dispatch_event(MediaEvent::Backend {
                    renderer: RENDERER_NAME.to_string(),
                    event: "recoveredEarlyEof".to_string(),
                    detail: String::new(),
                });
            }
            FlvEngineEvent::BufferUpdate { start, end } => {
                self.element.add_buffered(start, end);
                self.events.dispatch_event(MediaEvent::Progress {
                    buffered_end: self.element.buffered().last_end(),
                });
            }
            FlvEngineEvent::TimeTick { position } => {
                self.element.set_current_time(position);
                self.events.dispatch_event(MediaEvent::TimeUpdate {
                    current_time: position,
                });
            }
            FlvEngineEvent::Playing => {
                self.element.set_paused(false);
                self.events.dispatch_event(MediaEvent::Playing);
            }
            FlvEngineEvent::Ended => {
                self.element.set_ended(true);
                self.element.set_paused(true);
                self.events.dispatch_event(MediaEvent::Ended);
            }
            FlvEngineEvent::Error {
                kind,
                fatal,
                detail,
            } => {
                error!(?kind, fatal, %detail, "flv engine error");
                self.events.dispatch_event(MediaEvent::Backend {
                    renderer: RENDERER_NAME.to_string(),
                    event: "flvError".to_string(),
                    detail: detail.clone(),
                });
                if fatal && kind == FlvErrorKind::Other {
                    let engine = { self.control.lock().await.engine.take() };
                    if let Some(engine) = engine {
                        engine.destroy().await;
                    }
                    self.events.dispatch_event(MediaEvent::Error { message: detail });
                }
            }
        }
    }

    async fn submit(&self, op: PendingOp) -> Result<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(RendererError::Destroyed);
        }

        let mut control = self.control.lock().await;
        if let Some(engine) = control.engine.clone() {
            self.apply(&engine, op).await
        } else if control.pending.push(op) {
            Ok(())
        } else {
            Err(RendererError::EngineUnavailable(
                "flv engine was torn down".into(),
            ))
        }
    }

    async fn apply(&self, engine: &Arc<dyn FlvEngine>, op: PendingOp) -> Result<()> {
        match op {
            PendingOp::Set(PropertyWrite::Src(src)) => {
                self.element.set_src(Some(src.clone()));
                self.element.reset_playback();
                engine.load_media(&src).await
            }
            PendingOp::Set(PropertyWrite::CurrentTime(position)) => {
                engine.seek(position).await?;
                self.element.set_current_time(position);
                self.events.dispatch_event(MediaEvent::TimeUpdate {
                    current_time: position,
                });
                self.events.dispatch_event(MediaEvent::Seeked { position });
                Ok(())
            }
            PendingOp::Set(PropertyWrite::Volume(volume)) => {
                engine.set_volume(volume).await?;
                self.element.set_volume(volume);
                self.events.dispatch_event(MediaEvent::VolumeChange {
                    volume: self.element.volume(),
                    muted: self.element.muted(),
                });
                Ok(())
            }
            PendingOp::Set(PropertyWrite::Muted(muted)) => {
                engine.set_muted(muted).await?;
                self.element.set_muted(muted);
                self.events.dispatch_event(MediaEvent::VolumeChange {
                    volume: self.element.volume(),
                    muted,
                });
                Ok(())
            }
            PendingOp::Call(MediaMethod::Play) => {
                engine.play().await?;
                self.element.set_paused(false);
                self.events.dispatch_event(MediaEvent::Play);
                Ok(())
            }
            PendingOp::Call(MediaMethod::Pause) => {
                engine.pause().await?;
                self.element.set_paused(true);
                self.events.dispatch_event(MediaEvent::Pause);
                Ok(())
            }
            PendingOp::Call(MediaMethod::Load) => match self.element.src() {
                Some(src) => engine.load_media(&src).await,
                None => Ok(()),
            },
            PendingOp::Call(MediaMethod::Stop) => engine.unload().await,
        }
    }
}

#[async_trait]
impl RendererAdapter for FlvRenderer {
    fn name(&self) -> &str {
        RENDERER_NAME
    }

    fn src(&self) -> Option<String> {
        self.element.src()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        self.element.duration()
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn muted(&self) -> bool {
        self.element.muted()
    }

    fn paused(&self) -> bool {
        self.element.paused()
    }

    fn ended(&self) -> bool {
        self.element.ended()
    }

    fn buffered(&self) -> TimeRanges {
        self.element.buffered()
    }

    async fn set_src(&self, value: String) -> Result<()> {
        self.submit(PendingOp::Set(PropertyWrite::Src(value))).await
    }

    async fn set_current_time(&self, value: f64) -> Result<()> {
        self.submit(PendingOp::Set(PropertyWrite::CurrentTime(value)))
            .await
    }

    async fn set_volume(&self, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(RendererError::InvalidVolume(value));
        }
        self.submit(PendingOp::Set(PropertyWrite::Volume(value)))
            .await
    }

    async fn set_muted(&self, value: bool) -> Result<()> {
        self.submit(PendingOp::Set(PropertyWrite::Muted(value)))
            .await
    }

    async fn play(&self) -> Result<()> {
        self.submit(PendingOp::Call(MediaMethod::Play)).await
    }

    async fn pause(&self) -> Result<()> {
        self.submit(PendingOp::Call(MediaMethod::Pause)).await
    }

    async fn load(&self) -> Result<()> {
        self.submit(PendingOp::Call(MediaMethod::Load)).await
    }

    async fn stop(&self) -> Result<()> {
        self.submit(PendingOp::Call(MediaMethod::Stop)).await
    }

    fn show(&self) {
        self.element.set_visible(true);
    }

    async fn hide(&self) -> Result<()> {
        self.pause().await?;
        self.element.set_visible(false);
        Ok(())
    }

    fn set_size(&self, width: u32, height: u32) {
        self.element.set_size(width, height);
    }

    async fn destroy(&self) -> Result<()> {
        self.destroyed.store(true, Ordering::SeqCst);
        let engine = { self.control.lock().await.engine.take() };
        if let Some(engine) = engine {
            engine.destroy().await;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
