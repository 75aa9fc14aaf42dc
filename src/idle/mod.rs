//! Idle detection and game session control
//!
//! Converts the editor's activity streams into one debounced idle timer and
//! flips a game session on and off. Two states: idle (countdown possibly
//! armed) and game active (countdown never armed). Entering the active state
//! while already active is a no-op, and activity during a game is ignored.

pub mod timer;

pub use timer::IdleTimer;

use crate::core::events::{AppEvent, EventSender};
use crate::core::settings::Settings;
use crate::core::state::SharedState;
use crate::editor::EditorEvent;
use crate::game::{GameMode, GameReport, GameStats, GameWindow, StatsRecorder};
use crate::host::bridge::OverlaySender;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Converts activity events into game sessions after a quiet period
pub struct IdleController {
    /// User preferences snapshot; `enable_extension` flips at runtime
    settings: Settings,
    /// Game mode parsed once at startup
    mode: GameMode,
    /// The single debounced countdown
    timer: IdleTimer,
    /// Live game window; at most one at a time
    window: Option<Arc<GameWindow>>,
    /// Whether a game session is in progress
    game_active: bool,
    /// Shared observable state
    state: SharedState,
    /// Writer for overlay commands
    overlay: OverlaySender,
    /// Session statistics sink
    recorder: StatsRecorder,
    /// Sender for the window completion callback
    event_tx: EventSender,
}

impl IdleController {
    /// Build the controller and arm the initial countdown
    ///
    /// Fails fast when the configured game mode doesn't parse.
    pub fn new(
        settings: Settings,
        state: SharedState,
        overlay: OverlaySender,
        recorder: StatsRecorder,
        event_tx: EventSender,
    ) -> Result<Self> {
        let mode = settings
            .parse_game_mode()
            .context("Invalid game mode in settings")?;

        let mut controller = Self {
            mode,
            timer: IdleTimer::new(event_tx.clone()),
            window: None,
            game_active: false,
            state,
            overlay,
            recorder,
            event_tx,
            settings,
        };
        controller.state.write().extension_enabled = controller.settings.enable_extension;
        controller.reset_idle_timer();
        Ok(controller)
    }

    /// Editor activity: restart the quiet-period countdown
    pub fn on_editor_event(&mut self, event: &EditorEvent) {
        debug!("Editor activity: {}", event.kind());
        self.reset_idle_timer();
    }

    /// Cancel the pending countdown and, when eligible, arm a fresh one
    pub fn reset_idle_timer(&mut self) {
        self.timer.cancel();

        if !self.settings.enable_extension || self.game_active {
            return;
        }

        self.timer.arm(self.settings.idle_duration());
    }

    /// Countdown expiry; stale generations are dropped
    pub fn on_idle_elapsed(&mut self, generation: u64) {
        if !self.timer.is_current(generation) {
            debug!("Ignoring stale idle expiry (generation {})", generation);
            return;
        }
        self.start_game();
    }

    /// Start a game session; no-op while one is active
    pub fn start_game(&mut self) {
        if self.game_active {
            return;
        }

        self.game_active = true;
        self.state.write().game_active = true;
        self.timer.cancel();

        let event_tx = self.event_tx.clone();
        let window = Arc::new(GameWindow::new(
            self.mode,
            &self.settings,
            self.overlay.clone(),
            Box::new(move |stats| {
                if let Err(e) = event_tx.send(AppEvent::GameFinished(stats)) {
                    warn!("Failed to send game finish: {}", e);
                }
            }),
        ));
        window.show();
        self.window = Some(window);
    }

    /// Overlay report for a session; routed to the live window when it matches
    pub fn on_game_completed(&mut self, session_id: Uuid, report: GameReport) {
        match &self.window {
            Some(window) if window.session_id() == session_id => {
                window.complete(report);
            }
            Some(window) => {
                debug!(
                    "Ignoring report for session {} (live session is {})",
                    session_id,
                    window.session_id()
                );
            }
            None => {
                debug!("Ignoring report for session {} (no active game)", session_id);
            }
        }
    }

    /// Completion callback fired: back to idle, stats recorded, countdown re-armed
    pub fn on_game_finished(&mut self, stats: GameStats) {
        self.game_active = false;
        {
            let mut state = self.state.write();
            state.game_active = false;
            state.sessions_completed += 1;
        }

        if let Some(window) = self.window.take() {
            window.dispose();
        }

        info!(
            "Game session {} finished: {}/{} targets hit",
            stats.session_id,
            stats.targets_hit,
            stats.targets_hit + stats.targets_missed
        );

        if self.settings.enable_stats_save {
            if let Err(e) = self.recorder.save(&stats) {
                warn!("Failed to save game stats: {}", e);
            }
        }

        self.reset_idle_timer();
    }

    /// Flip the enabled flag; a game in progress is not interrupted
    pub fn toggle_extension(&mut self) {
        self.settings.enable_extension = !self.settings.enable_extension;
        self.state.write().extension_enabled = self.settings.enable_extension;
        info!(
            "Idle detection {}",
            if self.settings.enable_extension {
                "enabled"
            } else {
                "disabled"
            }
        );

        if self.settings.enable_extension {
            self.reset_idle_timer();
        } else {
            self.timer.cancel();
        }
    }

    /// Cancel the countdown and dispose any active window. Idempotent.
    pub fn dispose(&mut self) {
        self.timer.cancel();
        if let Some(window) = self.window.take() {
            window.dispose();
        }
    }

    /// Whether a game session is in progress
    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    /// Whether the idle countdown is pending
    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Whether idle detection is enabled
    pub fn is_enabled(&self) -> bool {
        self.settings.enable_extension
    }

    /// Session id of the live game window, if any
    pub fn active_session_id(&self) -> Option<Uuid> {
        self.window.as_ref().map(|w| w.session_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events;
    use crate::core::state::AppState;
    use std::io;
    use tempfile::TempDir;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn test_settings() -> Settings {
        Settings {
            idle_timer_ms: 5_000,
            ..Settings::default()
        }
    }

    fn setup(
        settings: Settings,
    ) -> (
        IdleController,
        UnboundedReceiver<AppEvent>,
        StatsRecorder,
        TempDir,
    ) {
        let dir = TempDir::new().unwrap();
        let stats_path = dir.path().join("stats.json");
        let (event_tx, event_rx) = events::channel();
        let controller = IdleController::new(
            settings.clone(),
            AppState::shared(&settings),
            OverlaySender::new(Box::new(io::sink())),
            StatsRecorder::with_path(stats_path.clone()),
            event_tx,
        )
        .unwrap();

        (
            controller,
            event_rx,
            StatsRecorder::with_path(stats_path),
            dir,
        )
    }

    fn drain(rx: &mut UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn doc_changed() -> EditorEvent {
        EditorEvent::DocumentChanged { path: None }
    }

    #[tokio::test]
    async fn test_unknown_mode_fails_construction() {
        let settings = Settings {
            game_mode: "quake".to_string(),
            ..test_settings()
        };
        let (event_tx, _event_rx) = events::channel();
        let result = IdleController::new(
            settings.clone(),
            AppState::shared(&settings),
            OverlaySender::new(Box::new(io::sink())),
            StatsRecorder::with_path(std::env::temp_dir().join("unused.json")),
            event_tx,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_construction_arms_timer() {
        let (controller, _rx, _recorder, _dir) = setup(test_settings());
        assert!(controller.is_timer_armed());
        assert!(!controller.is_game_active());
    }

    #[tokio::test]
    async fn test_construction_disabled_leaves_timer_off() {
        let settings = Settings {
            enable_extension: false,
            ..test_settings()
        };
        let (controller, _rx, _recorder, _dir) = setup(settings);
        assert!(!controller.is_timer_armed());
    }

    #[tokio::test]
    async fn test_start_game_is_idempotent() {
        let (mut controller, _rx, _recorder, _dir) = setup(test_settings());

        controller.start_game();
        let first = controller.active_session_id().unwrap();

        controller.start_game();
        assert_eq!(controller.active_session_id().unwrap(), first);
        assert!(controller.is_game_active());
    }

    #[tokio::test]
    async fn test_activity_during_game_never_arms_timer() {
        let (mut controller, _rx, _recorder, _dir) = setup(test_settings());

        controller.start_game();
        assert!(!controller.is_timer_armed());

        controller.on_editor_event(&doc_changed());
        assert!(!controller.is_timer_armed());
    }

    #[tokio::test]
    async fn test_toggle_cancels_and_rearms() {
        let (mut controller, _rx, _recorder, _dir) = setup(test_settings());
        assert!(controller.is_timer_armed());

        controller.toggle_extension();
        assert!(!controller.is_enabled());
        assert!(!controller.is_timer_armed());

        controller.toggle_extension();
        assert!(controller.is_enabled());
        assert!(controller.is_timer_armed());
    }

    #[tokio::test]
    async fn test_disable_does_not_interrupt_game() {
        let (mut controller, _rx, _recorder, _dir) = setup(test_settings());

        controller.start_game();
        controller.toggle_extension();

        assert!(controller.is_game_active());
        assert!(controller.active_session_id().is_some());
    }

    #[tokio::test]
    async fn test_finish_returns_to_idle_and_records_stats() {
        let (mut controller, mut rx, recorder, _dir) = setup(test_settings());

        controller.start_game();
        let session_id = controller.active_session_id().unwrap();
        drain(&mut rx);

        controller.on_game_completed(
            session_id,
            GameReport {
                targets_hit: 8,
                targets_missed: 2,
                duration_ms: 30_000,
                abandoned: false,
            },
        );

        // the window callback forwards the finish through the channel
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        let stats = match events.into_iter().next().unwrap() {
            AppEvent::GameFinished(stats) => stats,
            other => panic!("unexpected event: {:?}", other),
        };
        assert_eq!(stats.session_id, session_id);

        controller.on_game_finished(stats);
        assert!(!controller.is_game_active());
        assert!(controller.is_timer_armed());
        assert!(controller.active_session_id().is_none());

        let history = recorder.load_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].targets_hit, 8);
    }

    #[tokio::test]
    async fn test_finish_with_stats_save_disabled_writes_nothing() {
        let settings = Settings {
            enable_stats_save: false,
            ..test_settings()
        };
        let (mut controller, mut rx, recorder, _dir) = setup(settings);

        controller.start_game();
        let session_id = controller.active_session_id().unwrap();
        controller.on_game_completed(session_id, GameReport::default());

        if let Some(AppEvent::GameFinished(stats)) = drain(&mut rx).into_iter().next() {
            controller.on_game_finished(stats);
        } else {
            panic!("expected a finish event");
        }

        assert!(recorder.load_history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_for_unknown_session_is_ignored() {
        let (mut controller, mut rx, _recorder, _dir) = setup(test_settings());

        controller.start_game();
        drain(&mut rx);

        controller.on_game_completed(Uuid::new_v4(), GameReport::default());
        assert!(drain(&mut rx).is_empty());
        assert!(controller.is_game_active());
    }

    #[tokio::test]
    async fn test_dispose_leaves_nothing_running() {
        let (mut controller, _rx, _recorder, _dir) = setup(test_settings());

        controller.start_game();
        controller.dispose();

        assert!(!controller.is_timer_armed());
        assert!(controller.active_session_id().is_none());

        // idempotent
        controller.dispose();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_after_activity_is_ignored() {
        let (mut controller, mut rx, _recorder, _dir) = setup(test_settings());

        // let the armed timer task register its deadline before advancing
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        tokio::time::advance(std::time::Duration::from_secs(5)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let fired = match drain(&mut rx).into_iter().next().unwrap() {
            AppEvent::IdleElapsed { generation } => generation,
            other => panic!("unexpected event: {:?}", other),
        };

        // activity arrives before the loop processes the expiry
        controller.on_editor_event(&doc_changed());
        controller.on_idle_elapsed(fired);

        assert!(!controller.is_game_active());
        assert!(controller.is_timer_armed());
    }
}
