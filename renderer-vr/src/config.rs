//! VR view configuration.

use serde::{Deserialize, Serialize};

/// Configuration handed to the VR engine factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VrConfig {
    /// Render side-by-side stereo frames.
    pub is_stereo: bool,
    /// Disable automatic panning on idle.
    pub is_autopan_off: bool,
    /// Enable the remote view's debug overlay.
    pub is_debug: bool,
    /// Start with VR mode off (plain 360° pan).
    pub is_vr_off: bool,
    /// Initial yaw angle, in degrees.
    pub default_yaw: f64,
    /// Lock the camera to yaw-only movement.
    pub is_yaw_only: bool,
}

impl Default for VrConfig {
    fn default() -> Self {
        Self {
            is_stereo: true,
            is_autopan_off: true,
            is_debug: false,
            is_vr_off: false,
            default_yaw: 0.0,
            is_yaw_only: false,
        }
    }
}
