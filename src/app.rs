use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

use crate::game::{GameConfig, GameSession, Intent, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Terminal front end: owns the session, the tick timer, and the screen
pub struct App {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let tick_interval = config.tick_interval();

        Self {
            session: GameSession::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The game ticker exists only while the session is Running; it is
        // armed on entering Running and dropped on leaving, so no queued
        // fire can slip through a pause or a game over.
        let mut ticker: Option<Interval> = None;

        // Render at 30 FPS regardless of game phase
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, pending forever while not Running
                _ = tick_or_never(ticker.as_mut()) => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.sync_ticker(&mut ticker);
        }

        Ok(())
    }

    /// Keep the ticker lifecycle bound one-to-one to the Running phase
    fn sync_ticker(&self, ticker: &mut Option<Interval>) {
        let running = self.session.phase() == Phase::Running;

        if running && ticker.is_none() {
            // First fire a full period from now, not immediately
            let mut t = interval_at(Instant::now() + self.tick_interval, self.tick_interval);
            t.set_missed_tick_behavior(MissedTickBehavior::Skip);
            *ticker = Some(t);
        } else if !running && ticker.is_some() {
            *ticker = None;
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            // Starting is an explicit action outside the intent mapper
            if self.session.phase() == Phase::NotStarted && key.code == KeyCode::Enter {
                self.session.start();
                self.metrics.on_round_start();
                return;
            }

            match self.input_handler.map_key(key, self.session.phase()) {
                KeyAction::Game(intent) => {
                    self.session.apply(intent);
                    if intent == Intent::Restart && self.session.phase() == Phase::Running {
                        self.metrics.on_round_start();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn on_tick(&mut self) {
        let result = self.session.tick();

        if result.collision.is_some() {
            self.metrics.on_game_over(self.session.score());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Await the next game tick, or pend forever when no ticker is armed
async fn tick_or_never(ticker: Option<&mut Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_app_starts_idle() {
        let app = App::new(GameConfig::default());
        assert_eq!(app.session.phase(), Phase::NotStarted);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_enter_starts_the_game() {
        let mut app = App::new(GameConfig::default());

        app.handle_event(press(KeyCode::Enter));
        assert_eq!(app.session.phase(), Phase::Running);

        // Enter does nothing once running
        app.handle_event(press(KeyCode::Enter));
        assert_eq!(app.session.phase(), Phase::Running);
    }

    #[test]
    fn test_movement_keys_dead_before_start() {
        let mut app = App::new(GameConfig::default());

        app.handle_event(press(KeyCode::Left));
        app.handle_event(press(KeyCode::Char(' ')));
        assert_eq!(app.session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_quit_key_sets_flag() {
        let mut app = App::new(GameConfig::default());

        app.handle_event(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ticker_lifecycle_follows_phase() {
        let mut app = App::new(GameConfig::default());
        let mut ticker: Option<Interval> = None;

        app.sync_ticker(&mut ticker);
        assert!(ticker.is_none());

        app.handle_event(press(KeyCode::Enter));
        app.sync_ticker(&mut ticker);
        assert!(ticker.is_some());

        app.handle_event(press(KeyCode::Char(' ')));
        assert_eq!(app.session.phase(), Phase::Paused);
        app.sync_ticker(&mut ticker);
        assert!(ticker.is_none());

        app.handle_event(press(KeyCode::Char(' ')));
        app.sync_ticker(&mut ticker);
        assert!(ticker.is_some());
    }

    #[test]
    fn test_game_over_records_metrics() {
        let mut app = App::new(GameConfig::default());
        app.handle_event(press(KeyCode::Enter));

        // Drive the snake straight up into the wall
        for _ in 0..20 {
            app.on_tick();
        }

        assert_eq!(app.session.phase(), Phase::GameOver);
        assert_eq!(app.metrics.rounds_played, 1);
    }
}
