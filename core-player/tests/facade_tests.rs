//! Facade behavior: selection, adapter caching, switching, and proxying.

use async_trait::async_trait;
use core_player::facade::{ERROR_CREATING_RENDERER, NO_RENDERER_FOUND};
use core_player::{native, MediaElementFacade, RendererRegistry};
use core_runtime::config::PlayerConfig;
use core_runtime::events::{MediaEvent, MediaEventKind};
use parking_lot::Mutex;
use renderer_traits::adapter::{RendererAdapter, TimeRanges};
use renderer_traits::descriptor::{CreateContext, RendererDescriptor};
use renderer_traits::element::ElementState;
use renderer_traits::error::{RendererError, Result as RendererResult};
use renderer_traits::source::{mime_matches, MediaSource};
use std::sync::Arc;

// ============================================================================
// Stub adapter
// ============================================================================

type CallLog = Arc<Mutex<Vec<String>>>;

struct StubAdapter {
    name: &'static str,
    element: ElementState,
    calls: CallLog,
}

impl StubAdapter {
    fn new(name: &'static str) -> Self {
        Self::with_log(name, Arc::new(Mutex::new(Vec::new())))
    }

    fn with_log(name: &'static str, calls: CallLog) -> Self {
        Self {
            name,
            element: ElementState::new(),
            calls,
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }
}

#[async_trait]
impl RendererAdapter for StubAdapter {
    fn name(&self) -> &str {
        self.name
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

    async fn set_src(&self, value: String) -> RendererResult<()> {
        self.record(&format!("set_src:{value}"));
        self.element.set_src(Some(value));
        Ok(())
    }

    async fn set_current_time(&self, value: f64) -> RendererResult<()> {
        self.element.set_current_time(value);
        Ok(())
    }

    async fn set_volume(&self, value: f64) -> RendererResult<()> {
        self.element.set_volume(value);
        Ok(())
    }

    async fn set_muted(&self, value: bool) -> RendererResult<()> {
        self.element.set_muted(value);
        Ok(())
    }

    async fn play(&self) -> RendererResult<()> {
        self.record("play");
        self.element.set_paused(false);
        Ok(())
    }

    async fn pause(&self) -> RendererResult<()> {
        self.record("pause");
        self.element.set_paused(true);
        Ok(())
    }

    async fn load(&self) -> RendererResult<()> {
        self.record("load");
        Ok(())
    }

    async fn stop(&self) -> RendererResult<()> {
        self.record("stop");
        Ok(())
    }

    fn show(&self) {
        self.record("show");
        self.element.set_visible(true);
    }

    async fn hide(&self) -> RendererResult<()> {
        self.pause().await?;
        self.record("hide");
        self.element.set_visible(false);
        Ok(())
    }

    fn set_size(&self, width: u32, height: u32) {
        self.element.set_size(width, height);
    }

    async fn destroy(&self) -> RendererResult<()> {
        self.record("destroy");
        Ok(())
    }
}

fn stub_descriptor(name: &'static str, types: &'static [&'static str]) -> RendererDescriptor {
    RendererDescriptor::new(
        name,
        move |mime| mime_matches(types, mime),
        move |_ctx: CreateContext| Ok(Arc::new(StubAdapter::new(name)) as Arc<dyn RendererAdapter>),
    )
}

fn logging_descriptor(
    name: &'static str,
    types: &'static [&'static str],
    calls: CallLog,
) -> RendererDescriptor {
    RendererDescriptor::new(
        name,
        move |mime| mime_matches(types, mime),
        move |_ctx: CreateContext| {
            Ok(Arc::new(StubAdapter::with_log(name, Arc::clone(&calls)))
                as Arc<dyn RendererAdapter>)
        },
    )
}

fn hls_stub() -> RendererDescriptor {
    stub_descriptor("stub_hls", &["application/x-mpegurl", "video/hls"])
}

fn registry_with(descriptors: Vec<RendererDescriptor>) -> Arc<RendererRegistry> {
    let registry = Arc::new(RendererRegistry::new());
    for descriptor in descriptors {
        registry.register(descriptor).unwrap();
    }
    registry
}

fn drain_events(
    receiver: &mut core_runtime::events::Receiver<MediaEvent>,
) -> Vec<MediaEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn set_source_activates_the_matching_renderer() {
    let registry = registry_with(vec![native::descriptor(), hls_stub()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    player
        .set_source("https://cdn.example.com/movie.mp4")
        .await
        .unwrap();

    assert_eq!(player.renderer_name().as_deref(), Some("html5"));
    assert_eq!(
        player.element().src(),
        Some("https://cdn.example.com/movie.mp4".to_string())
    );
}

#[tokio::test]
async fn unplayable_sources_dispatch_no_renderer_found() {
    let registry = registry_with(vec![native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());
    let mut events = player.events().subscribe();

    player
        .set_source(vec![MediaSource::new("a.xyz", "application/unknown")])
        .await
        .unwrap();

    let dispatched = drain_events(&mut events);
    assert!(dispatched.iter().any(|event| matches!(
        event,
        MediaEvent::Error { message } if message == NO_RENDERER_FOUND
    )));
    assert!(player.renderer_name().is_none());
}

#[tokio::test]
async fn empty_source_list_is_a_synchronous_error() {
    let registry = registry_with(vec![native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    let result = player.set_source(Vec::<MediaSource>::new()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn failed_construction_dispatches_error_creating_renderer() {
    let broken = RendererDescriptor::new(
        "broken",
        |mime| mime_matches(&["video/mp4"], mime),
        |_ctx| Err(RendererError::EngineCreation("backend exploded".into())),
    );
    let registry = registry_with(vec![broken]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());
    let mut events = player.events().subscribe();

    player.set_source("movie.mp4").await.unwrap();

    let dispatched = drain_events(&mut events);
    assert!(dispatched.iter().any(|event| matches!(
        event,
        MediaEvent::Error { message } if message == ERROR_CREATING_RENDERER
    )));
    assert!(player.active_adapter().is_none());
}

#[tokio::test]
async fn switching_back_reuses_the_cached_adapter() {
    let registry = registry_with(vec![native::descriptor(), hls_stub()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    player.set_source("movie.mp4").await.unwrap();
    let first_native = player.active_adapter().unwrap();

    player.set_source("live.m3u8").await.unwrap();
    assert_eq!(player.renderer_name().as_deref(), Some("stub_hls"));

    player.set_source("movie.mp4").await.unwrap();
    let second_native = player.active_adapter().unwrap();

    assert!(Arc::ptr_eq(&first_native, &second_native));
}

#[tokio::test]
async fn outgoing_adapter_is_paused_and_hidden_before_the_switch() {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let hls = logging_descriptor(
        "stub_hls",
        &["application/x-mpegurl", "video/hls"],
        Arc::clone(&calls),
    );
    let registry = registry_with(vec![hls, native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    player.set_source("live.m3u8").await.unwrap();
    player.play().await.unwrap();
    calls.lock().clear();

    player.set_source("movie.mp4").await.unwrap();
    assert_eq!(player.renderer_name().as_deref(), Some("html5"));

    // The outgoing adapter left the surface in pause → stop → hide order
    // (hide itself pauses again before hiding).
    assert_eq!(
        calls.lock().as_slice(),
        &["pause", "stop", "pause", "hide"]
    );
}

#[tokio::test]
async fn same_renderer_source_swap_keeps_the_adapter() {
    let registry = registry_with(vec![hls_stub()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    player.set_source("one.m3u8").await.unwrap();
    let adapter = player.active_adapter().unwrap();

    player.set_source("two.m3u8").await.unwrap();
    let same = player.active_adapter().unwrap();

    assert!(Arc::ptr_eq(&adapter, &same));
    assert_eq!(adapter.src(), Some("two.m3u8".to_string()));
}

#[tokio::test]
async fn preferred_renderer_order_overrides_registration_order() {
    let first = stub_descriptor("first", &["video/mp4"]);
    let second = stub_descriptor("second", &["video/mp4"]);
    let registry = registry_with(vec![first, second]);

    let config = PlayerConfig::default().with_renderers(["second"]);
    let player = MediaElementFacade::new(registry, config);

    player.set_source("movie.mp4").await.unwrap();
    assert_eq!(player.renderer_name().as_deref(), Some("second"));
}

#[tokio::test]
async fn proxy_surface_is_inert_without_an_adapter() {
    let registry = registry_with(vec![native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    assert_eq!(player.current_time(), None);
    assert_eq!(player.duration(), None);
    assert_eq!(player.paused(), None);
    assert_eq!(player.src(), None);

    // Method calls are no-ops, not errors.
    player.play().await.unwrap();
    player.pause().await.unwrap();
    player.set_volume(0.5).await.unwrap();
    player.set_size(640, 360);
}

#[tokio::test]
async fn proxy_surface_reaches_the_active_adapter() {
    let registry = registry_with(vec![native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    player.set_source("movie.mp4").await.unwrap();
    player.play().await.unwrap();
    assert_eq!(player.paused(), Some(false));

    player.set_volume(0.3).await.unwrap();
    assert_eq!(player.volume(), Some(0.3));

    player.set_current_time(17.0).await.unwrap();
    assert_eq!(player.current_time(), Some(17.0));
}

#[tokio::test]
async fn relative_sources_are_absolutized_against_the_base_url() {
    let registry = registry_with(vec![native::descriptor()]);
    let config = PlayerConfig::default()
        .with_base_url("https://media.example.com/library/")
        .unwrap();
    let player = MediaElementFacade::new(registry, config);

    player.set_source("clips/a.mp4").await.unwrap();
    assert_eq!(
        player.element().src(),
        Some("https://media.example.com/library/clips/a.mp4".to_string())
    );
}

#[tokio::test]
async fn renderer_ready_is_announced_on_construction() {
    let registry = registry_with(vec![native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());
    let mut events = player.events().subscribe();

    player.set_source("movie.mp4").await.unwrap();

    let dispatched = drain_events(&mut events);
    assert!(dispatched.iter().any(|event| matches!(
        event,
        MediaEvent::RendererReady { renderer } if renderer == "html5"
    )));
}

#[tokio::test]
async fn destroy_clears_every_cached_adapter() {
    let registry = registry_with(vec![native::descriptor(), hls_stub()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    player.set_source("movie.mp4").await.unwrap();
    player.set_source("live.m3u8").await.unwrap();
    assert!(player.active_adapter().is_some());

    player.destroy().await;
    assert!(player.active_adapter().is_none());
    assert!(player.renderer_name().is_none());
}

#[tokio::test]
async fn listener_registry_mirrors_the_event_target_interface() {
    let registry = registry_with(vec![native::descriptor()]);
    let player = MediaElementFacade::new(registry, PlayerConfig::default());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = player
        .events()
        .add_event_listener(MediaEventKind::Play, move |event| {
            sink.lock().push(event.kind());
        });

    player.set_source("movie.mp4").await.unwrap();
    player.play().await.unwrap();
    player.events().remove_event_listener(MediaEventKind::Play, id);
    player.play().await.unwrap();

    assert_eq!(seen.lock().as_slice(), &[MediaEventKind::Play]);
}
