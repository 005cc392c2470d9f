//! # Media Element Facade
//!
//! The single object applications hold. It owns the original element state,
//! normalizes assigned sources, asks the registry for the best renderer,
//! constructs or reuses the matching adapter, and proxies every property
//! and method of the uniform media surface to whichever adapter is active.
//!
//! Adapters are cached per renderer name for the lifetime of the facade:
//! switching back to a previously used renderer reuses the cached instance
//! instead of rebuilding the backend. An outgoing adapter is always paused,
//! stopped, and hidden before the next one takes the surface.
//!
//! Selection and construction failures are not errors to the caller — they
//! surface as `error` events on the facade's bus, and the facade stays
//! usable for another `set_source` call.

use crate::error::{PlayerError, Result};
use crate::registry::RendererRegistry;
use core_runtime::config::PlayerConfig;
use core_runtime::events::{MediaEvent, MediaEventBus};
use parking_lot::RwLock;
use renderer_traits::adapter::{RendererAdapter, TimeRanges};
use renderer_traits::descriptor::CreateContext;
use renderer_traits::element::ElementState;
use renderer_traits::source::{absolutize, MediaSource};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Error message dispatched when no registered renderer can play any source.
pub const NO_RENDERER_FOUND: &str = "No renderer found";
/// Error message dispatched when the selected renderer fails to construct.
pub const ERROR_CREATING_RENDERER: &str = "Error creating renderer";

/// Source assignment input: a bare URL or an explicit source list.
#[derive(Debug, Clone)]
pub enum SourceInput {
    Url(String),
    List(Vec<MediaSource>),
}

impl From<&str> for SourceInput {
    fn from(value: &str) -> Self {
        SourceInput::Url(value.to_string())
    }
}

impl From<String> for SourceInput {
    fn from(value: String) -> Self {
        SourceInput::Url(value)
    }
}

impl From<MediaSource> for SourceInput {
    fn from(value: MediaSource) -> Self {
        SourceInput::List(vec![value])
    }
}

impl From<Vec<MediaSource>> for SourceInput {
    fn from(value: Vec<MediaSource>) -> Self {
        SourceInput::List(value)
    }
}

#[derive(Default)]
struct FacadeState {
    adapters: HashMap<String, Arc<dyn RendererAdapter>>,
    active: Option<String>,
}

/// The player facade.
pub struct MediaElementFacade {
    id: String,
    config: PlayerConfig,
    registry: Arc<RendererRegistry>,
    element: Arc<ElementState>,
    events: Arc<MediaEventBus>,
    state: RwLock<FacadeState>,
}

impl MediaElementFacade {
    /// Create a facade with a fresh element state.
    pub fn new(registry: Arc<RendererRegistry>, config: PlayerConfig) -> Self {
        Self::from_element(registry, config, Arc::new(ElementState::new()))
    }

    /// Create a facade wrapping an existing element state.
    pub fn from_element(
        registry: Arc<RendererRegistry>,
        config: PlayerConfig,
        element: Arc<ElementState>,
    ) -> Self {
        let events = Arc::new(MediaEventBus::new(config.event_buffer_size));
        Self {
            id: format!("player_{}", Uuid::new_v4().simple()),
            config,
            registry,
            element,
            events,
            state: RwLock::new(FacadeState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn events(&self) -> Arc<MediaEventBus> {
        Arc::clone(&self.events)
    }

    pub fn element(&self) -> Arc<ElementState> {
        Arc::clone(&self.element)
    }

    pub fn registry(&self) -> Arc<RendererRegistry> {
        Arc::clone(&self.registry)
    }

    /// Name of the active renderer, if any.
    pub fn renderer_name(&self) -> Option<String> {
        self.state.read().active.clone()
    }

    /// The active adapter, if any.
    pub fn active_adapter(&self) -> Option<Arc<dyn RendererAdapter>> {
        let state = self.state.read();
        state
            .active
            .as_ref()
            .and_then(|name| state.adapters.get(name).cloned())
    }

    // ========================================================================
    // Source assignment
    // ========================================================================

    /// Assign a new source (or source list) to the player.
    ///
    /// The input is normalized (URLs absolutized against the configured base,
    /// missing MIME types derived from the extension), the first source is
    /// mirrored onto the original element, and the registry picks a
    /// renderer. Selection and construction failures are dispatched as
    /// `error` events, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::EmptySourceList`] for an empty source list.
    #[instrument(skip(self, input), fields(player = %self.id))]
    pub async fn set_source(&self, input: impl Into<SourceInput>) -> Result<()> {
        let sources = self.normalize(input.into());
        if sources.is_empty() {
            return Err(PlayerError::EmptySourceList);
        }

        // Keep the native fallback element consistent even when a non-native
        // adapter ends up driving playback.
        let first = &sources[0].src;
        if first.is_empty() {
            self.element.set_src(None);
        } else {
            self.element.set_src(Some(first.clone()));
        }

        let selection = self.registry.select(&sources, &self.config.renderers);
        let Some(selection) = selection else {
            warn!(sources = sources.len(), "no renderer matched the sources");
            self.events.dispatch_event(MediaEvent::Error {
                message: NO_RENDERER_FOUND.to_string(),
            });
            return Ok(());
        };

        info!(renderer = %selection.renderer_name, src = %selection.src, "source assigned");
        self.change_renderer(&selection.renderer_name, &sources)
            .await;

        if self.active_adapter().is_none() {
            self.events.dispatch_event(MediaEvent::Error {
                message: ERROR_CREATING_RENDERER.to_string(),
            });
        }

        Ok(())
    }

    /// Switch the active renderer.
    ///
    /// Same-name switches take a fast path: the adapter is paused, stopped,
    /// re-shown, and re-pointed at the first source without a backend
    /// rebuild. Otherwise the outgoing adapter is paused, stopped, and
    /// hidden, and the target adapter is reused from the cache or
    /// constructed through its descriptor.
    ///
    /// Returns `false` when `name` is not registered or construction fails.
    pub async fn change_renderer(&self, name: &str, sources: &[MediaSource]) -> bool {
        let first_src = sources.first().map(|source| source.src.clone());

        let (active_name, active_adapter) = {
            let state = self.state.read();
            let adapter = state
                .active
                .as_ref()
                .and_then(|active| state.adapters.get(active).cloned());
            (state.active.clone(), adapter)
        };

        // Same renderer: re-point it instead of tearing the backend down.
        if active_name.as_deref() == Some(name) {
            if let Some(adapter) = active_adapter {
                adapter.pause().await.ok();
                adapter.stop().await.ok();
                adapter.show();
                if let Some(src) = first_src {
                    adapter.set_src(src).await.ok();
                }
                return true;
            }
        }

        // The outgoing adapter leaves the surface before anything else
        // touches it.
        if let Some(adapter) = active_adapter {
            adapter.pause().await.ok();
            adapter.stop().await.ok();
            adapter.hide().await.ok();
        }

        let cached = self.state.read().adapters.get(name).cloned();
        if let Some(adapter) = cached {
            debug!(renderer = %name, "reusing cached adapter");
            adapter.show();
            if let Some(src) = first_src {
                adapter.set_src(src).await.ok();
            }
            self.state.write().active = Some(name.to_string());
            return true;
        }

        let Some(descriptor) = self.registry.get(name) else {
            debug!(renderer = %name, "renderer not registered");
            return false;
        };

        let ctx = CreateContext {
            events: Arc::clone(&self.events),
            element: Arc::clone(&self.element),
            sources: sources.to_vec(),
            player: self.config.clone(),
        };

        match descriptor.create(ctx) {
            Ok(adapter) => {
                adapter.show();
                let mut state = self.state.write();
                state.adapters.insert(name.to_string(), Arc::clone(&adapter));
                state.active = Some(name.to_string());
                true
            }
            Err(err) => {
                error!(renderer = %name, %err, "renderer construction failed");
                false
            }
        }
    }

    fn normalize(&self, input: SourceInput) -> Vec<MediaSource> {
        let base = self.config.base_url.as_ref();
        match input {
            SourceInput::Url(src) => {
                let src = absolutize(&src, base);
                vec![MediaSource::from_url(src)]
            }
            SourceInput::List(list) => list
                .into_iter()
                .map(|source| {
                    let src = absolutize(&source.src, base);
                    MediaSource::new(src, source.mime)
                })
                .collect(),
        }
    }

    // ========================================================================
    // Proxied property surface
    // ========================================================================

    pub fn src(&self) -> Option<String> {
        self.active_adapter().and_then(|adapter| adapter.src())
    }

    pub fn current_time(&self) -> Option<f64> {
        self.active_adapter().map(|adapter| adapter.current_time())
    }

    pub fn duration(&self) -> Option<f64> {
        self.active_adapter().and_then(|adapter| adapter.duration())
    }

    pub fn volume(&self) -> Option<f64> {
        self.active_adapter().map(|adapter| adapter.volume())
    }

    pub fn muted(&self) -> Option<bool> {
        self.active_adapter().map(|adapter| adapter.muted())
    }

    pub fn paused(&self) -> Option<bool> {
        self.active_adapter().map(|adapter| adapter.paused())
    }

    pub fn ended(&self) -> Option<bool> {
        self.active_adapter().map(|adapter| adapter.ended())
    }

    pub fn buffered(&self) -> Option<TimeRanges> {
        self.active_adapter().map(|adapter| adapter.buffered())
    }

    pub async fn set_current_time(&self, value: f64) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.set_current_time(value).await?;
        }
        Ok(())
    }

    pub async fn set_volume(&self, value: f64) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.set_volume(value).await?;
        }
        Ok(())
    }

    pub async fn set_muted(&self, value: bool) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.set_muted(value).await?;
        }
        Ok(())
    }

    // ========================================================================
    // Proxied method surface
    // ========================================================================

    pub async fn play(&self) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.play().await?;
        }
        Ok(())
    }

    pub async fn pause(&self) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.pause().await?;
        }
        Ok(())
    }

    pub async fn load(&self) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.load().await?;
        }
        Ok(())
    }

    pub async fn stop(&self) -> Result<()> {
        if let Some(adapter) = self.active_adapter() {
            adapter.stop().await?;
        }
        Ok(())
    }

    /// Forward the display size to the active adapter.
    pub fn set_size(&self, width: u32, height: u32) {
        if let Some(adapter) = self.active_adapter() {
            adapter.set_size(width, height);
        }
    }

    /// Pause, hide, and destroy every cached adapter.
    #[instrument(skip(self), fields(player = %self.id))]
    pub async fn destroy(&self) {
        let adapters: Vec<Arc<dyn RendererAdapter>> = {
            let mut state = self.state.write();
            state.active = None;
            state.adapters.drain().map(|(_, adapter)| adapter).collect()
        };

        for adapter in adapters {
            adapter.pause().await.ok();
            adapter.hide().await.ok();
            adapter.destroy().await.ok();
        }
        info!("player destroyed");
    }
}

impl std::fmt::Debug for MediaElementFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("MediaElementFacade")
            .field("id", &self.id)
            .field("active", &state.active)
            .field("cached_adapters", &state.adapters.len())
            .finish()
    }
}
