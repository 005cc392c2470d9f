//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the media renderer core:
//! - Media event vocabulary and event bus
//! - Player configuration management
//! - Logging and tracing infrastructure
//!
//! ## Overview
//!
//! This crate contains the runtime utilities every other module depends on.
//! It establishes the event dispatch model shared by the facade and the
//! renderer adapters, the logging conventions, and the player-level
//! configuration surface.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::PlayerConfig;
pub use error::{Error, Result};
pub use events::{EventSeverity, MediaEvent, MediaEventBus, MediaEventKind};
