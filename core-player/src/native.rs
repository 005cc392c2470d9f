//! # Native Renderer
//!
//! Default renderer for sources the host environment can play directly.
//! Unlike the streaming backends it has no asynchronous initialization: the
//! surface it drives is the facade's own element state, so it is ready at
//! construction and never queues operations.

use async_trait::async_trait;
use core_runtime::events::{MediaEvent, MediaEventBus};
use renderer_traits::adapter::{RendererAdapter, TimeRanges};
use renderer_traits::descriptor::{CreateContext, RendererDescriptor};
use renderer_traits::element::ElementState;
use renderer_traits::error::{RendererError, Result};
use renderer_traits::source::mime_matches;
use std::sync::Arc;
use tracing::debug;

/// Registered name of the native renderer.
pub const RENDERER_NAME: &str = "html5";

const SUPPORTED_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/ogg",
    "video/mov",
    "video/mpeg",
    "audio/mp3",
    "audio/mpeg",
    "audio/mp4",
    "audio/ogg",
    "audio/wav",
    "audio/webm",
    "audio/flac",
];

/// Descriptor registering the native renderer.
pub fn descriptor() -> RendererDescriptor {
    RendererDescriptor::new(
        RENDERER_NAME,
        |mime| mime_matches(SUPPORTED_TYPES, mime),
        NativeRenderer::create,
    )
}

/// Adapter driving the facade's own element state.
pub struct NativeRenderer {
    element: Arc<ElementState>,
    events: Arc<MediaEventBus>,
}

impl NativeRenderer {
    fn create(ctx: CreateContext) -> Result<Arc<dyn RendererAdapter>> {
        let adapter = Arc::new(Self {
            element: Arc::clone(&ctx.element),
            events: Arc::clone(&ctx.events),
        });

        if let Some(source) = ctx
            .sources
            .iter()
            .find(|source| mime_matches(SUPPORTED_TYPES, source.bare_mime()))
        {
            adapter.element.set_src(Some(source.src.clone()));
        }

        debug!("native renderer constructed");
        ctx.events.dispatch_event(MediaEvent::RendererReady {
            renderer: RENDERER_NAME.to_string(),
        });

        Ok(adapter)
    }
}

#[async_trait]
impl RendererAdapter for NativeRenderer {
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
        self.element.set_src(Some(value));
        self.element.reset_playback();
        Ok(())
    }

    async fn set_current_time(&self, value: f64) -> Result<()> {
        self.element.set_current_time(value);
        let position = self.element.current_time();
        self.events
            .dispatch_event(MediaEvent::TimeUpdate { current_time: position });
        self.events.dispatch_event(MediaEvent::Seeked { position });
        Ok(())
    }

    async fn set_volume(&self, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(RendererError::InvalidVolume(value));
        }
        self.element.set_volume(value);
        self.events.dispatch_event(MediaEvent::VolumeChange {
            volume: self.element.volume(),
            muted: self.element.muted(),
        });
        Ok(())
    }

    async fn set_muted(&self, value: bool) -> Result<()> {
        self.element.set_muted(value);
        self.events.dispatch_event(MediaEvent::VolumeChange {
            volume: self.element.volume(),
            muted: value,
        });
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        if self.element.ended() {
            self.element.set_current_time(0.0);
            self.element.set_ended(false);
        }
        self.element.set_paused(false);
        self.events.dispatch_event(MediaEvent::Play);
        self.events.dispatch_event(MediaEvent::Playing);
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.element.set_paused(true);
        self.events.dispatch_event(MediaEvent::Pause);
        Ok(())
    }

    async fn load(&self) -> Result<()> {
        self.element.set_current_time(0.0);
        self.element.set_ended(false);
        self.events.dispatch_event(MediaEvent::LoadedMetadata {
            duration: self.element.duration(),
        });
        Ok(())
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
        self.pause().await?;
        self.element.reset_playback();
        Ok(())
    }
}
