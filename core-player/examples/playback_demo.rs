//! Minimal end-to-end facade usage: register a renderer, assign a source,
//! drive playback, observe events.
//!
//! Run with: `cargo run --example playback_demo -p core-player`

use core_player::{native, MediaElementFacade, RendererRegistry};
use core_runtime::config::PlayerConfig;
use core_runtime::logging::{init_logging, LoggingConfig};
use renderer_traits::source::seconds_to_time_code;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default())?;

    let registry = Arc::new(RendererRegistry::new());
    registry.register(native::descriptor())?;

    let config = PlayerConfig::default().with_base_url("https://cdn.example.com/library/")?;
    let player = MediaElementFacade::new(registry, config);

    let mut events = player.events().subscribe();

    player.set_source("features/movie.mp4").await?;
    println!("renderer: {:?}", player.renderer_name());
    println!("element src: {:?}", player.element().src());

    player.play().await?;
    player.set_current_time(42.0).await?;
    println!(
        "position: {}",
        seconds_to_time_code(player.current_time().unwrap_or(0.0), false)
    );
    player.pause().await?;

    while let Ok(event) = events.try_recv() {
        println!("event: {:?} ({:?})", event.kind(), event.severity());
    }

    player.destroy().await;
    Ok(())
}
