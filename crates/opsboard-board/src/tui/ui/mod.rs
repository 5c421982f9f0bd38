/*
[INPUT]:  AppState and board view model
[OUTPUT]: Full-frame rendering and shared styles
[POS]:    TUI UI module root
[UPDATE]: When adding panels or changing the frame layout
*/

mod board;
mod layout;
mod logs;
mod modal;
mod toast;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};

use super::app::{AppState, Tab};
use crate::board::Accent;

pub(in crate::tui) fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    match app.current_tab {
        Tab::Board => board::draw_board(frame, layout[0], app),
        Tab::Logs => logs::draw_logs(frame, layout[0], &app.log_buffer),
    }
    layout::draw_tabs(frame, layout[1], app.current_tab);
    layout::draw_footer(frame, layout[2], app);

    toast::draw_toast(frame, layout[0], app.store.notifications());

    if let Some(pending) = app.pending_delete.as_ref() {
        modal::draw_confirm_delete(frame, area, &pending.title);
    }
}

pub(super) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(super) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn key_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Slate => Color::Gray,
        Accent::Blue => Color::LightBlue,
        Accent::Violet => Color::LightMagenta,
        Accent::Green => Color::LightGreen,
        Accent::Red => Color::LightRed,
    }
}
