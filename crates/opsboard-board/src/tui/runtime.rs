/*
[INPUT]:  Gateway, board configuration, log buffer, shutdown token
[OUTPUT]: Ratatui run loop multiplexing input, ticks and gateway results
[POS]:    TUI runtime loop
[UPDATE]: When changing loop timing or event sources
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use opsboard_adapter::TaskGateway;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::app::AppState;
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::draw_ui;
use crate::config::BoardConfig;
use crate::logging::LogBufferHandle;
use crate::persistence::StatusDispatcher;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
}

pub async fn run_tui(
    gateway: Arc<dyn TaskGateway>,
    config: &BoardConfig,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = shutdown.child_token();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let (dispatcher, mut gateway_rx) = StatusDispatcher::new(gateway, shutdown.child_token());
    let mut app = AppState::new(
        dispatcher,
        log_buffer,
        config.board.project_id.clone(),
        config.refresh_interval(),
        config.board.toast_ticks,
    );
    app.request_refresh();

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("shutdown requested; leaving board");
                should_quit = true;
            }
            _ = tick.tick() => {
                app.on_tick();
            }
            Some(event) = gateway_rx.recv() => {
                app.handle_gateway_event(event);
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key_event(&mut app, key.code) {
                            should_quit = true;
                        }
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &app))?;
    }

    input_shutdown.cancel();
    Ok(())
}
