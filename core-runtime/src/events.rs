//! # Media Event System
//!
//! Defines the uniform event vocabulary shared by the player facade and every
//! renderer adapter, plus the bus used to deliver it.
//!
//! ## Overview
//!
//! Backends emit wildly different native events (streaming engines report
//! manifest and fragment milestones, remote views report handshake ticks).
//! Adapters translate all of them into [`MediaEvent`], so UI chrome and host
//! applications subscribe to one vocabulary regardless of which backend is
//! driving playback.
//!
//! Two consumption styles are supported:
//!
//! - **Broadcast subscription**: [`MediaEventBus::subscribe`] returns a
//!   `tokio::sync::broadcast` receiver. Multiple subscribers receive every
//!   event independently; slow subscribers observe `RecvError::Lagged`.
//! - **Listener registry**: [`MediaEventBus::add_event_listener`] /
//!   [`MediaEventBus::remove_event_listener`] mirror the DOM event-target
//!   interface for hosts without an async consumer, keyed by
//!   [`MediaEventKind`].
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{MediaEvent, MediaEventBus, MediaEventKind};
//!
//! let bus = MediaEventBus::default();
//! let id = bus.add_event_listener(MediaEventKind::TimeUpdate, |event| {
//!     if let MediaEvent::TimeUpdate { current_time } = event {
//!         println!("position: {current_time}");
//!     }
//! });
//!
//! bus.dispatch_event(MediaEvent::TimeUpdate { current_time: 12.5 });
//! bus.remove_event_listener(MediaEventKind::TimeUpdate, id);
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::RecvError;
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the broadcast side of the bus.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

// ============================================================================
// Event Types
// ============================================================================

/// Uniform media event vocabulary dispatched by the facade.
///
/// Adapters translate backend-native events into these variants. Hosts never
/// see a backend's own event names except through [`MediaEvent::Backend`],
/// which carries renderer-specific diagnostics verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum MediaEvent {
    /// Media metadata became available.
    LoadedMetadata {
        /// Total duration in seconds, when the backend knows it.
        duration: Option<f64>,
    },
    /// Playback position advanced or was reassigned.
    TimeUpdate {
        /// Current position in seconds.
        current_time: f64,
    },
    /// More data was buffered.
    Progress {
        /// End of the furthest buffered range, in seconds.
        buffered_end: f64,
    },
    /// Playback was requested.
    Play,
    /// Playback actually started producing frames.
    Playing,
    /// Playback was paused.
    Pause,
    /// A seek completed.
    Seeked {
        /// Position seeked to, in seconds.
        position: f64,
    },
    /// Volume or mute state changed.
    VolumeChange {
        /// Volume in `[0.0, 1.0]`.
        volume: f64,
        /// Whether output is muted.
        muted: bool,
    },
    /// Playback reached the end of the media.
    Ended,
    /// A renderer adapter finished construction and owns the surface.
    RendererReady {
        /// Registered renderer name.
        renderer: String,
    },
    /// A player-level error (selection or construction failure).
    Error {
        /// Human-readable error message.
        message: String,
    },
    /// Backend-specific event forwarded without translation.
    Backend {
        /// Renderer that produced the event.
        renderer: String,
        /// Backend-native event name.
        event: String,
        /// Backend-provided detail payload.
        detail: String,
    },
}

impl MediaEvent {
    /// Discriminant used for listener registration.
    pub fn kind(&self) -> MediaEventKind {
        match self {
            MediaEvent::LoadedMetadata { .. } => MediaEventKind::LoadedMetadata,
            MediaEvent::TimeUpdate { .. } => MediaEventKind::TimeUpdate,
            MediaEvent::Progress { .. } => MediaEventKind::Progress,
            MediaEvent::Play => MediaEventKind::Play,
            MediaEvent::Playing => MediaEventKind::Playing,
            MediaEvent::Pause => MediaEventKind::Pause,
            MediaEvent::Seeked { .. } => MediaEventKind::Seeked,
            MediaEvent::VolumeChange { .. } => MediaEventKind::VolumeChange,
            MediaEvent::Ended => MediaEventKind::Ended,
            MediaEvent::RendererReady { .. } => MediaEventKind::RendererReady,
            MediaEvent::Error { .. } => MediaEventKind::Error,
            MediaEvent::Backend { .. } => MediaEventKind::Backend,
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            MediaEvent::Error { .. } => EventSeverity::Error,
            MediaEvent::Backend { .. } => EventSeverity::Warning,
            MediaEvent::RendererReady { .. } | MediaEvent::LoadedMetadata { .. } => {
                EventSeverity::Info
            }
            _ => EventSeverity::Debug,
        }
    }
}

/// Fieldless discriminant for [`MediaEvent`], used as the listener key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaEventKind {
    LoadedMetadata,
    TimeUpdate,
    Progress,
    Play,
    Playing,
    Pause,
    Seeked,
    VolumeChange,
    Ended,
    RendererReady,
    Error,
    Backend,
}

impl MediaEventKind {
    /// DOM-style lowercase event name.
    pub fn name(&self) -> &'static str {
        match self {
            MediaEventKind::LoadedMetadata => "loadedmetadata",
            MediaEventKind::TimeUpdate => "timeupdate",
            MediaEventKind::Progress => "progress",
            MediaEventKind::Play => "play",
            MediaEventKind::Playing => "playing",
            MediaEventKind::Pause => "pause",
            MediaEventKind::Seeked => "seeked",
            MediaEventKind::VolumeChange => "volumechange",
            MediaEventKind::Ended => "ended",
            MediaEventKind::RendererReady => "rendererready",
            MediaEventKind::Error => "error",
            MediaEventKind::Backend => "backendevent",
        }
    }
}

impl fmt::Display for MediaEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Event Bus
// ============================================================================

type ListenerFn = dyn Fn(&MediaEvent) + Send + Sync;

/// Handle returned by [`MediaEventBus::add_event_listener`], used to remove
/// the listener later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event bus combining a broadcast channel with a DOM-style listener registry.
///
/// The broadcast side follows `tokio::sync::broadcast` semantics: each
/// [`subscribe`](Self::subscribe) call creates an independent receiver, and
/// events are cloned per subscriber. The listener side invokes callbacks
/// synchronously on the dispatching task, in registration order.
pub struct MediaEventBus {
    sender: broadcast::Sender<MediaEvent>,
    listeners: RwLock<HashMap<MediaEventKind, Vec<(ListenerId, Arc<ListenerFn>)>>>,
    next_listener: AtomicU64,
}

impl MediaEventBus {
    /// Create a bus with the given broadcast buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            listeners: RwLock::new(HashMap::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Dispatch an event to all registered listeners and broadcast
    /// subscribers. Returns the number of listeners invoked.
    pub fn dispatch_event(&self, event: MediaEvent) -> usize {
        let kind = event.kind();
        let callbacks: Vec<Arc<ListenerFn>> = {
            let listeners = self.listeners.read();
            listeners
                .get(&kind)
                .map(|entries| entries.iter().map(|(_, f)| Arc::clone(f)).collect())
                .unwrap_or_default()
        };

        for callback in &callbacks {
            callback(&event);
        }

        // A send error only means there is no broadcast subscriber right now.
        let _ = self.sender.send(event);

        callbacks.len()
    }

    /// Create a new broadcast subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<MediaEvent> {
        self.sender.subscribe()
    }

    /// Register a callback for one event kind. Callbacks run synchronously,
    /// in registration order, on the task that dispatches the event.
    pub fn add_event_listener<F>(&self, kind: MediaEventKind, callback: F) -> ListenerId
    where
        F: Fn(&MediaEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .entry(kind)
            .or_default()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a previously registered listener. Returns `true` if it was
    /// still registered.
    pub fn remove_event_listener(&self, kind: MediaEventKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        if let Some(entries) = listeners.get_mut(&kind) {
            let before = entries.len();
            entries.retain(|(entry_id, _)| *entry_id != id);
            return entries.len() != before;
        }
        false
    }

    /// Remove every listener for `kind`, or all listeners when `None`.
    pub fn remove_all_listeners(&self, kind: Option<MediaEventKind>) {
        let mut listeners = self.listeners.write();
        match kind {
            Some(kind) => {
                listeners.remove(&kind);
            }
            None => listeners.clear(),
        }
    }

    /// Number of registered listeners across all kinds.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().values().map(Vec::len).sum()
    }

    /// Number of active broadcast subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MediaEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for MediaEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaEventBus")
            .field("listener_count", &self.listener_count())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
