//! Demonstrates the logging bootstrap and the media event bus.
//!
//! Run with: `cargo run --example logging_demo -p core-runtime`

use core_runtime::events::{MediaEvent, MediaEventBus, MediaEventKind};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use tracing::{info, Level};

#[tokio::main]
async fn main() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Pretty)
        .with_level(Level::DEBUG);
    init_logging(config).expect("Failed to initialize logging");

    info!("event bus demo starting");

    let bus = MediaEventBus::default();
    bus.add_event_listener(MediaEventKind::TimeUpdate, |event| {
        if let MediaEvent::TimeUpdate { current_time } = event {
            info!(current_time, "listener saw a time update");
        }
    });

    let mut subscriber = bus.subscribe();

    bus.dispatch_event(MediaEvent::RendererReady {
        renderer: "html5".into(),
    });
    bus.dispatch_event(MediaEvent::TimeUpdate { current_time: 1.5 });
    bus.dispatch_event(MediaEvent::TimeUpdate { current_time: 3.0 });

    while let Ok(event) = subscriber.try_recv() {
        info!(kind = %event.kind(), severity = ?event.severity(), "broadcast event");
    }

    info!("event bus demo finished");
}
