/*
[INPUT]:  Crossterm key codes
[OUTPUT]: AppState transitions (selection, drag lifecycle, status actions, tabs)
[POS]:    TUI key routing
[UPDATE]: When keybindings change
*/

use crossterm::event::KeyCode;

use super::app::{AppState, Tab};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(crate) fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if app.pending_delete.is_some() {
        handle_confirm_key(app, key);
        return false;
    }
    if app.coordinator.is_dragging() {
        handle_drag_key(app, key);
        return false;
    }

    match key {
        KeyCode::Char('q') => true,
        KeyCode::Tab => {
            app.next_tab();
            false
        }
        KeyCode::Char('1') => {
            app.set_tab(Tab::Board);
            false
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Logs);
            false
        }
        KeyCode::Char('r') => {
            app.status_message = "Refreshing...".to_string();
            app.request_refresh();
            false
        }
        _ if app.current_tab == Tab::Board => {
            handle_board_key(app, key);
            false
        }
        _ => false,
    }
}

fn handle_board_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.move_column(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_column(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_row(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_row(1),
        KeyCode::Char(' ') => app.start_drag(),
        KeyCode::Char('s') => app.advance_selected(),
        KeyCode::Char('c') => app.cancel_selected(),
        KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}

fn handle_drag_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.move_pointer_column(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_pointer_column(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_pointer_row(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_pointer_row(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.drop_drag(),
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
}

fn handle_confirm_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.dismiss_delete(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::logging::LogBuffer;
    use crate::persistence::{GatewayEvent, StatusDispatcher};
    use opsboard_adapter::{InMemoryGateway, Task, TaskStatus};
    use tokio_util::sync::CancellationToken;

    fn app() -> AppState {
        let tasks = vec![
            Task::new("t-1", "First", TaskStatus::Todo),
            Task::new("t-2", "Second", TaskStatus::InProgress),
        ];
        let gateway = Arc::new(InMemoryGateway::new(tasks.clone()));
        let (dispatcher, _rx) = StatusDispatcher::new(gateway, CancellationToken::new());
        let mut app = AppState::new(
            dispatcher,
            LogBuffer::handle(8),
            None,
            Duration::from_secs(15),
            4,
        );
        app.handle_gateway_event(GatewayEvent::Loaded {
            mark: 1,
            result: Ok(tasks),
        });
        app
    }

    #[tokio::test]
    async fn quit_and_tab_keys() {
        let mut app = app();
        assert!(!handle_key_event(&mut app, KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Logs);
        assert!(!handle_key_event(&mut app, KeyCode::Char('1')));
        assert_eq!(app.current_tab, Tab::Board);
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
    }

    #[tokio::test]
    async fn drag_keys_route_to_the_coordinator() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Char(' '));
        assert!(app.coordinator.is_dragging());

        // q is not quit while dragging.
        assert!(!handle_key_event(&mut app, KeyCode::Char('q')));
        handle_key_event(&mut app, KeyCode::Right);
        assert_eq!(
            app.store.task("t-1").map(|t| t.status),
            Some(TaskStatus::InProgress)
        );
        handle_key_event(&mut app, KeyCode::Esc);
        assert!(!app.coordinator.is_dragging());
        assert_eq!(
            app.store.task("t-1").map(|t| t.status),
            Some(TaskStatus::InProgress)
        );
    }

    #[tokio::test]
    async fn delete_confirmation_swallows_other_keys() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Char('d'));
        assert!(app.pending_delete.is_some());

        assert!(!handle_key_event(&mut app, KeyCode::Char('q')));
        assert!(app.pending_delete.is_some());
        handle_key_event(&mut app, KeyCode::Char('n'));
        assert!(app.pending_delete.is_none());
        assert!(app.store.task("t-1").is_some());
    }
}
