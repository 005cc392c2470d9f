//! # HLS Adapter
//!
//! Implements the uniform renderer surface on top of an [`HlsEngine`].
//!
//! Construction is two-phase. `create_with` returns immediately with a
//! usable adapter and spawns the engine acquisition in the background;
//! operations issued in the meantime land in the pending queue. When the
//! engine factory arrives (one shared install services every adapter), the
//! queue is drained in FIFO order under the control lock — so nothing
//! issued after readiness can overtake a queued operation — and the
//! engine's native events start flowing into the uniform vocabulary.

use crate::config::HlsConfig;
use crate::engine::{HlsEngine, HlsEngineEvent, HlsEngineFactory, HlsErrorKind};
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
    engine: Option<Arc<dyn HlsEngine>>,
    pending: PendingOps,
}

/// Renderer adapter for HLS sources.
pub struct HlsRenderer {
    element: ElementState,
    events: Arc<MediaEventBus>,
    config: HlsConfig,
    control: Mutex<Control>,
    destroyed: AtomicBool,
}

impl HlsRenderer {
    /// Construct an adapter against a specific engine loader.
    ///
    /// The crate-level descriptor passes the process-wide loader; tests may
    /// pass their own.
    pub fn create_with(
        ctx: CreateContext,
        config: HlsConfig,
        loader: Arc<EngineLoader<dyn HlsEngineFactory>>,
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

    fn spawn_init(adapter: Arc<Self>, loader: Arc<EngineLoader<dyn HlsEngineFactory>>) {
        tokio::spawn(async move {
            let factory = match loader.acquire().await {
                Ok(factory) => factory,
                Err(err) => {
                    error!(%err, "hls engine never became available");
                    return;
                }
            };

            match factory.create(&adapter.config) {
                Ok(engine) => adapter.engine_ready(engine).await,
                Err(err) => {
                    error!(%err, "hls engine construction failed");
                    adapter.events.dispatch_event(MediaEvent::Backend {
                        renderer: RENDERER_NAME.to_string(),
                        event: "engineError".to_string(),
                        detail: err.to_string(),
                    });
                }
            }
        });
    }

    async fn engine_ready(self: Arc<Self>, engine: Arc<dyn HlsEngine>) {
        let mut src_applied = false;
        {
            let mut control = self.control.lock().await;
            control.engine = Some(Arc::clone(&engine));
            let ops = control.pending.drain();
            debug!(queued = ops.len(), "hls engine ready, draining queue");
            for op in ops {
                if matches!(op, PendingOp::Set(PropertyWrite::Src(_))) {
                    src_applied = true;
                }
                if let Err(err) = self.apply(&engine, op).await {
                    warn!(%err, "queued operation failed during drain");
                }
            }
        }

        // Nothing queued re-pointed the engine, so load the source picked at
        // construction time.
        if !src_applied {
            if let Some(src) = self.element.src() {
                if let Err(err) = engine.load_source(&src).await {
                    warn!(%err, "initial source load failed");
                }
            }
        }

        self.spawn_event_loop(engine);
    }

    fn spawn_event_loop(self: Arc<Self>, engine: Arc<dyn HlsEngine>) {
        let adapter = self;
        let mut events = engine.events();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => adapter.handle_engine_event(event).await,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "lagging behind hls engine events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    async fn handle_engine_event(&self, event: HlsEngineEvent) {
        match event {
            HlsEngineEvent::ManifestParsed { levels } => {
                debug!(levels, "hls manifest parsed");
                self.events.dispatch_event(MediaEvent::Backend {
                    renderer: RENDERER_NAME.to_string(),
                    event: "hlsManifestParsed".to_string(),
                    detail: format!("{levels} levels"),
                });
            }
            HlsEngineEvent::LevelLoaded { duration, live } => {
                self.element.set_duration(Some(duration));
                debug!(duration, live, "hls level loaded");
                self.events.dispatch_event(MediaEvent::LoadedMetadata {
                    duration: Some(duration),
                });
            }
            HlsEngineEvent::FragBuffered { start, end } => {
                self.element.add_buffered(start, end);
                self.events.dispatch_event(MediaEvent::Progress {
                    buffered_end: self.element.buffered().last_end(),
                });
            }
            HlsEngineEvent::TimeTick { position } => {
                self.element.set_current_time(position);
                self.events.dispatch_event(MediaEvent::TimeUpdate {
                    current_time: position,
                });
            }
            HlsEngineEvent::Playing => {
                self.element.set_paused(false);
                self.events.dispatch_event(MediaEvent::Playing);
            }
            HlsEngineEvent::Ended => {
                self.element.set_ended(true);
                self.element.set_paused(true);
                self.events.dispatch_event(MediaEvent::Ended);
            }
            HlsEngineEvent::Error {
                kind,
                fatal,
                detail,
            } => self.handle_engine_error(kind, fatal, detail).await,
        }
    }

    async fn handle_engine_error(&self, kind: HlsErrorKind, fatal: bool, detail: String) {
        error!(?kind, fatal, %detail, "hls engine error");
        self.events.dispatch_event(MediaEvent::Backend {
            renderer: RENDERER_NAME.to_string(),
            event: "hlsError".to_string(),
            detail: detail.clone(),
        });

        // The engine only comes down for errors it cannot classify; network
        // and media errors are recoverable and playback continues.
        if fatal && kind == HlsErrorKind::Other {
            let engine = { self.control.lock().await.engine.take() };
            if let Some(engine) = engine {
                engine.destroy().await;
            }
            self.events.dispatch_event(MediaEvent::Error { message: detail });
        }
    }

    /// Apply an operation now (engine present) or queue it (still waiting).
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
                "hls engine was torn down".into(),
            ))
        }
    }

    async fn apply(&self, engine: &Arc<dyn HlsEngine>, op: PendingOp) -> Result<()> {
        match op {
            PendingOp::Set(PropertyWrite::Src(src)) => {
                self.element.set_src(Some(src.clone()));
                self.element.reset_playback();
                engine.load_source(&src).await
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
                Some(src) => engine.load_source(&src).await,
                None => Ok(()),
            },
            PendingOp::Call(MediaMethod::Stop) => engine.stop_load().await,
        }
    }
}

#[async_trait]
impl RendererAdapter for HlsRenderer {
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

#[cfg(test)]
mod tests {
    use super::*;
    use core_runtime::config::PlayerConfig;
    use parking_lot::Mutex as SyncMutex;
    use renderer_traits::source::MediaSource;
    use std::time::Duration;
    use tokio::sync::broadcast;

    type CommandLog = Arc<SyncMutex<Vec<String>>>;

    struct StubEngine {
        commands: CommandLog,
        events: broadcast::Sender<HlsEngineEvent>,
    }

    #[async_trait]
    impl HlsEngine for StubEngine {
        async fn load_source(&self, url: &str) -> Result<()> {
            self.commands.lock().push(format!("load_source:{url}"));
            Ok(())
        }

        async fn play(&self) -> Result<()> {
            self.commands.lock().push("play".into());
            Ok(())
        }

        async fn pause(&self) -> Result<()> {
            self.commands.lock().push("pause".into());
            Ok(())
        }

        async fn seek(&self, position: f64) -> Result<()> {
            self.commands.lock().push(format!("seek:{position}"));
            Ok(())
        }

        async fn set_volume(&self, volume: f64) -> Result<()> {
            self.commands.lock().push(format!("volume:{volume}"));
            Ok(())
        }

        async fn set_muted(&self, muted: bool) -> Result<()> {
            self.commands.lock().push(format!("muted:{muted}"));
            Ok(())
        }

        async fn stop_load(&self) -> Result<()> {
            self.commands.lock().push("stop_load".into());
            Ok(())
        }

        fn events(&self) -> broadcast::Receiver<HlsEngineEvent> {
            self.events.subscribe()
        }

        async fn destroy(&self) {
            self.commands.lock().push("destroy".into());
        }
    }

    struct StubFactory {
        commands: CommandLog,
        events: broadcast::Sender<HlsEngineEvent>,
    }

    impl HlsEngineFactory for StubFactory {
        fn create(&self, _config: &HlsConfig) -> Result<Arc<dyn HlsEngine>> {
            Ok(Arc::new(StubEngine {
                commands: Arc::clone(&self.commands),
                events: self.events.clone(),
            }))
        }
    }

    struct Harness {
        adapter: Arc<dyn RendererAdapter>,
        loader: Arc<EngineLoader<dyn HlsEngineFactory>>,
        commands: CommandLog,
        engine_events: broadcast::Sender<HlsEngineEvent>,
        bus: Arc<MediaEventBus>,
    }

    fn harness() -> Harness {
        let bus = Arc::new(MediaEventBus::default());
        let ctx = CreateContext {
            events: Arc::clone(&bus),
            element: Arc::new(ElementState::new()),
            sources: vec![MediaSource::new("live.m3u8", "application/x-mpegURL")],
            player: PlayerConfig::default(),
        };

        let loader: Arc<EngineLoader<dyn HlsEngineFactory>> = Arc::new(EngineLoader::new());
        let adapter =
            HlsRenderer::create_with(ctx, HlsConfig::default(), Arc::clone(&loader)).unwrap();

        let commands: CommandLog = Arc::new(SyncMutex::new(Vec::new()));
        let (engine_events, _) = broadcast::channel(32);

        Harness {
            adapter,
            loader,
            commands,
            engine_events,
            bus,
        }
    }

    impl Harness {
        fn install(&self) {
            self.loader.install(Arc::new(StubFactory {
                commands: Arc::clone(&self.commands),
                events: self.engine_events.clone(),
            }));
        }

        async fn wait_for<F: Fn(&[String]) -> bool>(&self, cond: F) {
            for _ in 0..500 {
                if cond(&self.commands.lock()) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
            panic!("engine commands: {:?}", self.commands.lock());
        }

        /// Deliver an engine event once the adapter's event loop is
        /// subscribed.
        async fn send_event(&self, event: HlsEngineEvent) {
            for _ in 0..500 {
                if self.engine_events.receiver_count() > 0 {
                    self.engine_events.send(event).ok();
                    return;
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
            panic!("adapter never subscribed to engine events");
        }
    }

    #[tokio::test]
    async fn pre_ready_operations_drain_in_issue_order() {
        let h = harness();

        h.adapter.set_volume(0.5).await.unwrap();
        h.adapter.play().await.unwrap();
        h.adapter.set_current_time(10.0).await.unwrap();
        assert!(h.commands.lock().is_empty());

        h.install();
        h.wait_for(|commands| commands.len() >= 4).await;

        assert_eq!(
            h.commands.lock().as_slice(),
            &["volume:0.5", "play", "seek:10", "load_source:live.m3u8"]
        );
    }

    #[tokio::test]
    async fn ready_without_queued_source_loads_the_initial_one() {
        let h = harness();
        h.install();
        h.wait_for(|commands| !commands.is_empty()).await;
        assert_eq!(h.commands.lock().as_slice(), &["load_source:live.m3u8"]);
    }

    #[tokio::test]
    async fn post_ready_operations_apply_directly() {
        let h = harness();
        h.install();
        h.wait_for(|commands| !commands.is_empty()).await;

        h.adapter.pause().await.unwrap();
        h.adapter.set_muted(true).await.unwrap();
        h.wait_for(|commands| commands.len() >= 3).await;

        let commands = h.commands.lock().clone();
        assert_eq!(&commands[1..], &["pause", "muted:true"]);
        assert!(h.adapter.muted());
    }

    #[tokio::test]
    async fn engine_events_translate_into_the_uniform_vocabulary() {
        let h = harness();
        let mut media_events = h.bus.subscribe();
        h.install();
        h.wait_for(|commands| !commands.is_empty()).await;

        h.send_event(HlsEngineEvent::LevelLoaded {
            duration: 120.0,
            live: false,
        })
        .await;
        h.send_event(HlsEngineEvent::TimeTick { position: 7.5 }).await;

        for _ in 0..500 {
            if h.adapter.duration() == Some(120.0) && h.adapter.current_time() == 7.5 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert_eq!(h.adapter.duration(), Some(120.0));
        assert_eq!(h.adapter.current_time(), 7.5);

        let mut seen = Vec::new();
        while let Ok(event) = media_events.try_recv() {
            seen.push(event);
        }
        assert!(seen.iter().any(|event| matches!(
            event,
            MediaEvent::LoadedMetadata {
                duration: Some(d)
            } if *d == 120.0
        )));
        assert!(seen
            .iter()
            .any(|event| matches!(event, MediaEvent::TimeUpdate { current_time } if *current_time == 7.5)));
    }

    #[tokio::test]
    async fn only_fatal_unclassified_errors_destroy_the_engine() {
        let h = harness();
        h.install();
        h.wait_for(|commands| !commands.is_empty()).await;

        h.send_event(HlsEngineEvent::Error {
            kind: HlsErrorKind::Network,
            fatal: true,
            detail: "manifest timeout".into(),
        })
        .await;
        h.send_event(HlsEngineEvent::Error {
            kind: HlsErrorKind::Media,
            fatal: false,
            detail: "buffer stall".into(),
        })
        .await;

        // Recoverable errors leave the pipeline alone.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!h.commands.lock().iter().any(|c| c == "destroy"));

        h.send_event(HlsEngineEvent::Error {
            kind: HlsErrorKind::Other,
            fatal: true,
            detail: "unrecoverable".into(),
        })
        .await;
        h.wait_for(|commands| commands.iter().any(|c| c == "destroy"))
            .await;
    }

    #[tokio::test]
    async fn hide_pauses_before_hiding() {
        let h = harness();
        h.install();
        h.wait_for(|commands| !commands.is_empty()).await;

        h.adapter.hide().await.unwrap();
        h.wait_for(|commands| commands.iter().any(|c| c == "pause"))
            .await;
        assert!(h.adapter.paused());
    }

    #[tokio::test]
    async fn destroyed_adapter_rejects_operations() {
        let h = harness();
        h.install();
        h.wait_for(|commands| !commands.is_empty()).await;

        h.adapter.destroy().await.unwrap();
        assert!(h.commands.lock().iter().any(|c| c == "destroy"));
        assert!(matches!(
            h.adapter.play().await,
            Err(RendererError::Destroyed)
        ));
    }

    #[test]
    fn capability_list_covers_hls_types_only() {
        assert!(crate::can_play_type("application/x-mpegURL"));
        assert!(crate::can_play_type("vnd.apple.mpegURL"));
        assert!(crate::can_play_type("audio/hls"));
        assert!(!crate::can_play_type("video/mp4"));
        assert!(!crate::can_play_type("application/dash+xml"));
    }
}
