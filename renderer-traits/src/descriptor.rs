//! # Renderer Descriptors
//!
//! A [`RendererDescriptor`] is the registration record a backend contributes
//! to the renderer registry: its unique name, a capability predicate over
//! bare MIME types, and a factory producing adapter instances. Descriptors
//! are immutable after registration; only the registry's priority order can
//! change.

use crate::adapter::RendererAdapter;
use crate::element::ElementState;
use crate::error::Result;
use crate::source::MediaSource;
use core_runtime::config::PlayerConfig;
use core_runtime::events::MediaEventBus;
use std::fmt;
use std::sync::Arc;

/// Everything an adapter factory needs from the facade that owns it.
#[derive(Clone)]
pub struct CreateContext {
    /// The facade's event bus; adapters dispatch uniform events here.
    pub events: Arc<MediaEventBus>,
    /// The facade's original element state.
    pub element: Arc<ElementState>,
    /// Normalized candidate sources, in caller order.
    pub sources: Vec<MediaSource>,
    /// Player-level configuration.
    pub player: PlayerConfig,
}

type CanPlayFn = dyn Fn(&str) -> bool + Send + Sync;
type CreateFn = dyn Fn(CreateContext) -> Result<Arc<dyn RendererAdapter>> + Send + Sync;

/// Registration record for one renderer backend.
pub struct RendererDescriptor {
    name: String,
    can_play: Box<CanPlayFn>,
    create: Box<CreateFn>,
}

impl RendererDescriptor {
    pub fn new<P, C>(name: impl Into<String>, can_play: P, create: C) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
        C: Fn(CreateContext) -> Result<Arc<dyn RendererAdapter>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            can_play: Box::new(can_play),
            create: Box::new(create),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability test over a bare (codec-stripped) MIME type.
    pub fn can_play_type(&self, mime: &str) -> bool {
        (self.can_play)(mime)
    }

    /// Construct an adapter instance for a facade.
    pub fn create(&self, ctx: CreateContext) -> Result<Arc<dyn RendererAdapter>> {
        (self.create)(ctx)
    }
}

impl fmt::Debug for RendererDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererDescriptor")
            .field("name", &self.name)
            .finish()
    }
}
