//! Workspace umbrella crate.
//!
//! Re-exports the member crates behind feature flags so host applications
//! can depend on `mrc-workspace` alone and enable the renderers they ship
//! engines for. The [`default_registry`] bootstrap registers the native
//! renderer plus every enabled backend in the conventional priority order:
//! native first, then HLS, DASH, FLV, and VR.

pub use core_i18n as i18n;
pub use core_player as player;
pub use core_runtime as runtime;
pub use renderer_traits as traits;

#[cfg(feature = "dash")]
pub use renderer_dash as dash;
#[cfg(feature = "flv")]
pub use renderer_flv as flv;
#[cfg(feature = "hls")]
pub use renderer_hls as hls;
#[cfg(feature = "vr")]
pub use renderer_vr as vr;

use core_player::{PlayerError, RendererRegistry};
use std::sync::Arc;

/// Build a registry with the native renderer and every enabled backend
/// registered in default priority order.
pub fn default_registry() -> Result<Arc<RendererRegistry>, PlayerError> {
    let registry = Arc::new(RendererRegistry::new());
    registry.register(core_player::native::descriptor())?;

    #[cfg(feature = "hls")]
    registry.register(renderer_hls::descriptor())?;

    #[cfg(feature = "dash")]
    registry.register(renderer_dash::descriptor())?;

    #[cfg(feature = "flv")]
    registry.register(renderer_flv::descriptor())?;

    #[cfg(feature = "vr")]
    registry.register(renderer_vr::descriptor())?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_orders_native_first() {
        let registry = default_registry().unwrap();
        let order = registry.order();
        assert_eq!(order.first().map(String::as_str), Some("html5"));

        #[cfg(all(feature = "hls", feature = "dash", feature = "flv", feature = "vr"))]
        assert_eq!(
            order,
            vec!["html5", "native_hls", "native_dash", "native_flv", "vr"]
        );
    }

    #[cfg(all(feature = "hls", feature = "vr"))]
    #[test]
    fn streaming_types_route_past_the_native_renderer() {
        use renderer_traits::source::MediaSource;

        let registry = default_registry().unwrap();
        let selection = registry
            .select(
                &[MediaSource::new("live.m3u8", "application/x-mpegURL")],
                &[],
            )
            .unwrap();
        assert_eq!(selection.renderer_name, "native_hls");

        // A plain mp4 stays on the native renderer even though VR could
        // present it.
        let selection = registry
            .select(&[MediaSource::new("movie.mp4", "video/mp4")], &[])
            .unwrap();
        assert_eq!(selection.renderer_name, "html5");
    }
}
