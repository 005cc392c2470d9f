//! # Engine Loader Gate
//!
//! Each backend crate keeps one process-wide [`EngineLoader`] holding the
//! host-installed engine factory for that backend. The gate plays the role a
//! script tag plays in a browser build: installation happens once, every
//! player instance that asks for the engine before installation waits on the
//! same completion signal, and all waiters are serviced in FIFO order the
//! moment the install lands. An in-flight wait is never cancelled.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{RendererError, Result};

enum LoadState<F: ?Sized> {
    Pending {
        waiters: Vec<oneshot::Sender<Arc<F>>>,
        requested: bool,
    },
    Ready(Arc<F>),
}

/// Shared install/acquire gate for one backend engine type.
///
/// `F` is the backend's engine factory trait object, e.g.
/// `EngineLoader<dyn HlsEngineFactory>`.
pub struct EngineLoader<F: ?Sized> {
    state: Mutex<LoadState<F>>,
}

impl<F: ?Sized> EngineLoader<F> {
    /// Create an empty gate. `const` so backend crates can keep one in a
    /// `static`.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(LoadState::Pending {
                waiters: Vec::new(),
                requested: false,
            }),
        }
    }

    /// Install the engine factory, waking every pending acquirer in FIFO
    /// order. Re-installing replaces the factory for future acquires.
    pub fn install(&self, engine: Arc<F>) {
        let waiters = {
            let mut state = self.state.lock();
            match &mut *state {
                LoadState::Pending { waiters, .. } => {
                    let waiters = std::mem::take(waiters);
                    *state = LoadState::Ready(Arc::clone(&engine));
                    waiters
                }
                LoadState::Ready(current) => {
                    warn!("engine factory replaced after initial install");
                    *current = Arc::clone(&engine);
                    Vec::new()
                }
            }
        };

        for waiter in waiters {
            // A dropped receiver only means that acquirer went away.
            let _ = waiter.send(Arc::clone(&engine));
        }
    }

    /// Wait until an engine factory is installed and return it. Concurrent
    /// callers before installation all wait on the same install.
    ///
    /// # Errors
    ///
    /// Returns [`RendererError::EngineUnavailable`] only if the loader is
    /// dropped while waiters are parked (not possible for the `static`
    /// loaders backend crates use).
    pub async fn acquire(&self) -> Result<Arc<F>> {
        let receiver = {
            let mut state = self.state.lock();
            match &mut *state {
                LoadState::Ready(engine) => return Ok(Arc::clone(engine)),
                LoadState::Pending { waiters, requested } => {
                    if !*requested {
                        *requested = true;
                        debug!("engine not installed yet; queueing acquirers");
                    }
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    receiver
                }
            }
        };

        receiver.await.map_err(|_| {
            RendererError::EngineUnavailable("engine loader dropped before install".into())
        })
    }

    /// The installed factory, if any, without waiting.
    pub fn try_engine(&self) -> Option<Arc<F>> {
        match &*self.state.lock() {
            LoadState::Ready(engine) => Some(Arc::clone(engine)),
            LoadState::Pending { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.lock(), LoadState::Ready(_))
    }

    /// Whether any acquirer has already asked for the engine.
    pub fn load_requested(&self) -> bool {
        match &*self.state.lock() {
            LoadState::Ready(_) => true,
            LoadState::Pending { requested, .. } => *requested,
        }
    }
}

impl<F: ?Sized> Default for EngineLoader<F> {
    fn default() -> Self {
        Self::new()
    }
}
