//! # Renderer Registry
//!
//! Ordered catalog of renderer descriptors. Registration order defines the
//! default selection priority; hosts can reorder it or pass a preference
//! list per selection call.
//!
//! Selection is a renderer-major, source-minor nested scan: the first
//! renderer (in priority order) that can play any candidate source wins,
//! even when a later renderer could play an earlier source.

use crate::error::{PlayerError, Result};
use parking_lot::RwLock;
use renderer_traits::descriptor::RendererDescriptor;
use renderer_traits::source::MediaSource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Result of a successful renderer selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Name of the matching renderer.
    pub renderer_name: String,
    /// URL of the matching source.
    pub src: String,
}

#[derive(Default)]
struct RegistryInner {
    renderers: HashMap<String, Arc<RendererDescriptor>>,
    order: Vec<String>,
}

/// Catalog of registered renderer descriptors.
///
/// Expected to be populated during application setup; selection calls may
/// then run concurrently against the finished catalog.
#[derive(Default)]
pub struct RendererRegistry {
    inner: RwLock<RegistryInner>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor.
    ///
    /// Registering a name again replaces the stored descriptor in place;
    /// the priority order keeps the original position and never grows
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::MissingRendererName`] for an empty name.
    pub fn register(&self, descriptor: RendererDescriptor) -> Result<()> {
        if descriptor.name().is_empty() {
            return Err(PlayerError::MissingRendererName);
        }

        let name = descriptor.name().to_string();
        let mut inner = self.inner.write();
        let replaced = inner
            .renderers
            .insert(name.clone(), Arc::new(descriptor))
            .is_some();
        if !replaced {
            inner.order.push(name.clone());
        }
        debug!(renderer = %name, replaced, "renderer registered");
        Ok(())
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<Arc<RendererDescriptor>> {
        self.inner.read().renderers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().renderers.contains_key(name)
    }

    /// Current priority order.
    pub fn order(&self) -> Vec<String> {
        self.inner.read().order.clone()
    }

    /// Replace the priority order.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::UnknownRenderer`] when an entry names no
    /// registered renderer.
    pub fn set_order(&self, order: Vec<String>) -> Result<()> {
        let mut inner = self.inner.write();
        for name in &order {
            if !inner.renderers.contains_key(name) {
                return Err(PlayerError::UnknownRenderer(name.clone()));
            }
        }
        inner.order = order;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().renderers.is_empty()
    }

    /// Pick the first `(renderer, source)` pair where the renderer can play
    /// the source's codec-stripped MIME type.
    ///
    /// Candidates come from `preferred` when non-empty, else from the
    /// registry order. Renderer priority outranks source order.
    pub fn select(&self, sources: &[MediaSource], preferred: &[String]) -> Option<Selection> {
        let inner = self.inner.read();
        let candidates: &[String] = if preferred.is_empty() {
            &inner.order
        } else {
            preferred
        };

        for name in candidates {
            let Some(descriptor) = inner.renderers.get(name) else {
                continue;
            };

            for source in sources {
                if descriptor.can_play_type(source.bare_mime()) {
                    debug!(renderer = %name, src = %source.src, "renderer selected");
                    return Some(Selection {
                        renderer_name: name.clone(),
                        src: source.src.clone(),
                    });
                }
            }
        }

        debug!(candidates = candidates.len(), "no renderer matched");
        None
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("RendererRegistry")
            .field("order", &inner.order)
            .finish()
    }
}
