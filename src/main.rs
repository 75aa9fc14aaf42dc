//! AimBreak companion - entry point
//!
//! Wires the stdio host bridge, the idle controller, and the event loop
//! together, then dispatches events until the editor closes the connection.

use aimbreak::{
    core::{
        events::{self, AppEvent},
        settings::Settings,
        state::AppState,
    },
    editor::ActivityMulticaster,
    game::StatsRecorder,
    host::{HostBridge, OverlaySender},
    idle::IdleController,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr; stdout carries the host protocol)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting AimBreak companion");

    let settings = Settings::load()?;
    info!(
        "Settings loaded: idle timer {}ms, mode {:?}, enabled: {}",
        settings.idle_timer_ms, settings.game_mode, settings.enable_extension
    );

    let state = AppState::shared(&settings);
    let (event_tx, mut event_rx) = events::channel();
    let overlay = OverlaySender::stdout();
    let recorder = StatsRecorder::new()?;

    let mut controller = IdleController::new(
        settings,
        Arc::clone(&state),
        overlay.clone(),
        recorder,
        event_tx.clone(),
    )?;

    // Subscribe the event loop to the editor activity bus
    let mut multicaster = ActivityMulticaster::new();
    let activity_tx = event_tx.clone();
    multicaster.subscribe(Box::new(move |event| {
        let _ = activity_tx.send(AppEvent::Editor(event.clone()));
    }));

    let _bridge = HostBridge::spawn(multicaster, event_tx, state, overlay);

    // Single logical thread of control: every state transition happens here
    while let Some(event) = event_rx.recv().await {
        match event {
            AppEvent::Editor(editor_event) => controller.on_editor_event(&editor_event),
            AppEvent::IdleElapsed { generation } => controller.on_idle_elapsed(generation),
            AppEvent::GameCompleted { session_id, report } => {
                controller.on_game_completed(session_id, report)
            }
            AppEvent::GameFinished(stats) => controller.on_game_finished(stats),
            AppEvent::ToggleRequested => controller.toggle_extension(),
            AppEvent::HostDisconnected => {
                info!("Editor disconnected, shutting down");
                break;
            }
        }
    }

    controller.dispose();
    Ok(())
}
