//! VR adapter: uniform surface over a remote [`VrEngine`].
//!
//! The engine object exists before it is usable: commands queue until the
//! remote view's handshake lands as [`VrEngineEvent::Ready`]. All playback
//! state lives in the local property cache, fed by the view's callbacks.

use crate::config::VrConfig;
use crate::engine::{VrEngine, VrEngineEvent, VrEngineFactory};
use crate::{can_play_type, RENDERER_NAME};
use async_trait::async_trait;
use core_runtime::events::{MediaEvent, MediaEventBus};
use parking_lot::Mutex as SyncMutex;
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
    engine: Option<Arc<dyn VrEngine>>,
    /// The view handshake has completed; commands go straight through.
    ready: bool,
    pending: PendingOps,
}

/// Renderer adapter for VR sources.
pub struct VrRenderer {
    element: ElementState,
    events: Arc<MediaEventBus>,
    config: VrConfig,
    control: Mutex<Control>,
    /// Volume to restore on unmute.
    old_volume: SyncMutex<f64>,
    destroyed: AtomicBool,
}

impl VrRenderer {
    /// Construct an adapter against a specific engine loader.
    pub fn create_with(
        ctx: CreateContext,
        config: VrConfig,
        loader: Arc<EngineLoader<dyn VrEngineFactory>>,
    ) -> Result<Arc<dyn RendererAdapter>> {
        let adapter = Arc::new(Self {
            element: ElementState::new(),
            events: Arc::clone(&ctx.events),
            config,
            control: Mutex::new(Control {
                engine: None,
                ready: false,
                pending: PendingOps::new(),
            }),
            old_volume: SyncMutex::new(1.0),
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

    fn spawn_init(adapter: Arc<Self>, loader: Arc<EngineLoader<dyn VrEngineFactory>>) {
        tokio::spawn(async move {
            let factory = match loader.acquire().await {
                Ok(factory) => factory,
                Err(err) => {
                    error!(%err, "vr engine never became available");
                    return;
                }
            };

            let url = adapter.element.src().unwrap_or_default();
            match factory.create(&adapter.config, &url) {
                Ok(engine) => {
                    {
                        let mut control = adapter.control.lock().await;
                        control.engine = Some(Arc::clone(&engine));
                    }
                    // Commands stay queued until the view handshake lands.
                    adapter.spawn_event_loop(engine);
                }
                Err(err) => {
                    error!(%err, "vr view construction failed");
                    adapter.events.dispatch_event(MediaEvent::Backend {
                        renderer: RENDERER_NAME.to_string(),
                        event: "engineError".to_string(),
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_event_loop(self: Arc<Self>, engine: Arc<dyn VrEngine>) {
        let adapter = self;
        let mut events = engine.events();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => adapter.handle_engine_event(event).await,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "lagging behind vr view events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    async fn handle_engine_event(&self, event: VrEngineEvent) {
        match event {
            VrEngineEvent::Ready => self.view_ready().await,
            VrEngineEvent::TimeTick { position } => {
                self.element.set_current_time(position);
                self.events.dispatch_event(MediaEvent::TimeUpdate {
                    current_time: position,
                });
            }
            VrEngineEvent::DurationKnown { duration } => {
                self.element.set_duration(Some(duration));
                self.events.dispatch_event(MediaEvent::LoadedMetadata {
                    duration: Some(duration),
                });
            }
            VrEngineEvent::Ended => {
                self.element.set_ended(true);
                self.element.set_paused(true);
                self.events.dispatch_event(MediaEvent::Ended);
            }
            VrEngineEvent::ModeChanged { mode } => {
                self.events.dispatch_event(MediaEvent::Backend {
                    renderer: RENDERER_NAME.to_string(),
                    event: "modechange".to_string(),
                    detail: mode,
                });
            }
            VrEngineEvent::Error { detail } => {
                // Presentation errors never tear the view down.
                error!(%detail, "vr view error");
                self.events.dispatch_event(MediaEvent::Backend {
                    renderer: RENDERER_NAME.to_string(),
                    event: "vrError".to_string(),
                    detail,
                });
            }
        }
    }

    async fn view_ready(&self) {
        let mut control = self.control.lock().await;
        if control.ready {
            return;
        }
        control.ready = true;
        let Some(engine) = control.engine.clone() else {
            warn!("vr handshake arrived without an engine");
            return;
        };

        let ops = control.pending.drain();
        debug!(queued = ops.len(), "vr view ready, draining queue");
        for op in ops {
            if let Err(err) = self.apply(&engine, op).await {
                warn!(%err, "queued operation failed during drain");
            }
        }
    }

    async fn submit(&self, op: PendingOp) -> Result<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(RendererError::Destroyed);
        }

        let mut control = self.control.lock().await;
        if control.ready {
            let Some(engine) = control.engine.clone() else {
                return Err(RendererError::EngineUnavailable(
                    "vr view was torn down".into(),
                ));
            };
            self.apply(&engine, op).await
        } else if control.pending.push(op) {
            Ok(())
        } else {
            Err(RendererError::EngineUnavailable(
                "vr view was torn down".into(),
            ))
        }
    }

    async fn apply(&self, engine: &Arc<dyn VrEngine>, op: PendingOp) -> Result<()> {
        match op {
            PendingOp::Set(PropertyWrite::Src(src)) => {
                self.element.set_src(Some(src.clone()));
                self.element.reset_playback();
                engine.set_source(&src).await
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
                // The remote view has no mute: drive the volume instead and
                // remember what to restore.
                if muted {
                    *self.old_volume.lock() = self.element.volume();
                    engine.set_volume(0.0).await?;
                    self.element.set_volume(0.0);
                } else {
                    let restore = *self.old_volume.lock();
                    engine.set_volume(restore).await?;
                    self.element.set_volume(restore);
                }
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
            // The view reloads its source itself; there is nothing to do.
            PendingOp::Call(MediaMethod::Load) => Ok(()),
            // No teardown-free stop on the remote view.
            PendingOp::Call(MediaMethod::Stop) => Ok(()),
        }
    }
}

#[async_trait]
impl RendererAdapter for VrRenderer {
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
