//! # Player Configuration
//!
//! Holds the settings a host passes when constructing a player facade.
//!
//! ## Overview
//!
//! `PlayerConfig` keeps player-level knobs only: renderer selection
//! preferences, the base URL used to absolutize relative media sources, and
//! the event bus capacity. Backend-specific tuning (HLS buffer lengths, FLV
//! stash sizes, ...) lives in the corresponding renderer crate.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::PlayerConfig;
//!
//! let config = PlayerConfig::default()
//!     .with_renderers(["native_hls", "html5"])
//!     .with_base_url("https://media.example.com/library/")
//!     .expect("valid base URL");
//!
//! assert_eq!(config.renderers, vec!["native_hls", "html5"]);
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use serde::{Deserialize, Serialize};
use url::Url;

/// Player-level configuration.
///
/// All fields have usable defaults; hosts typically override the renderer
/// preference order and, for relative playlists, the base URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Preferred renderer names, in priority order. When empty, the
    /// registry's full registration order is used.
    pub renderers: Vec<String>,

    /// Base URL that relative source URLs are resolved against. When unset,
    /// relative sources are passed through unchanged.
    pub base_url: Option<Url>,

    /// Broadcast buffer capacity of the facade's event bus.
    pub event_buffer_size: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            renderers: Vec::new(),
            base_url: None,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

impl PlayerConfig {
    /// Set the preferred renderer order.
    pub fn with_renderers<I, S>(mut self, renderers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.renderers = renderers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the base URL used to absolutize relative sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the value is not an absolute URL.
    pub fn with_base_url(mut self, base: impl AsRef<str>) -> Result<Self> {
        let parsed = Url::parse(base.as_ref())
            .map_err(|err| Error::Config(format!("invalid base URL `{}`: {err}", base.as_ref())))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Set the event bus broadcast capacity.
    pub fn with_event_buffer_size(mut self, capacity: usize) -> Self {
        self.event_buffer_size = capacity;
        self
    }
}
